//! Pitch-class arithmetic and note-name conversion.

/// Canonical sharp spellings, indexed by pitch class.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings, indexed by pitch class.
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

fn letter_semitone(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Split a leading note name (letter plus any run of accidentals) off `text`.
///
/// Returns the pitch class and the number of bytes consumed, or `None` when
/// `text` does not start with a note letter.
///
/// # Examples
/// ```
/// use songsmith_model::theory::split_note_name;
///
/// assert_eq!(split_note_name("C#m7"), Some((1, 2)));
/// assert_eq!(split_note_name("Bb:maj"), Some((10, 2)));
/// assert_eq!(split_note_name("H"), None);
/// ```
pub fn split_note_name(text: &str) -> Option<(u8, usize)> {
    let mut chars = text.char_indices();
    let (_, letter) = chars.next()?;
    let base = letter_semitone(letter)?;

    let mut accidental: i32 = 0;
    let mut end = letter.len_utf8();
    for (idx, ch) in chars {
        match ch {
            '#' | '♯' => accidental += 1,
            'b' | '♭' => accidental -= 1,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    Some(((base + accidental).rem_euclid(12) as u8, end))
}

/// Parse a pitch class name (e.g., "C", "F#", "Bb", "Cb") into a semitone value (0-11).
///
/// Sharp and flat spellings of the same pitch resolve to the same class.
pub fn pitch_class(name: &str) -> Option<u8> {
    let trimmed = name.trim();
    match split_note_name(trimmed) {
        Some((pc, used)) if used == trimmed.len() => Some(pc),
        _ => None,
    }
}

/// Canonical (sharp) spelling of a pitch class. Values above 11 wrap.
pub fn pitch_class_name(pc: u8) -> &'static str {
    SHARP_NAMES[(pc % 12) as usize]
}

/// Flat spelling of a pitch class. Values above 11 wrap.
pub fn flat_pitch_class_name(pc: u8) -> &'static str {
    FLAT_NAMES[(pc % 12) as usize]
}

/// Ascending interval in semitones (0-11) from `from` to `to`.
pub fn interval(from: u8, to: u8) -> u8 {
    (to as i32 - from as i32).rem_euclid(12) as u8
}

/// Transpose a pitch class by a signed number of semitones.
pub fn transpose(pc: u8, semitones: i32) -> u8 {
    (pc as i32 + semitones).rem_euclid(12) as u8
}

/// Semitone offset of a chord degree such as "3", "b7" or "#11".
///
/// Degrees follow Harte conventions: an unaltered 7 is the major seventh.
pub fn degree_semitones(degree: &str) -> Option<i32> {
    let trimmed = degree.trim();
    let mut accidental = 0i32;
    let mut rest = trimmed;
    loop {
        if let Some(stripped) = rest.strip_prefix('b') {
            accidental -= 1;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('#') {
            accidental += 1;
            rest = stripped;
        } else {
            break;
        }
    }

    let base = match rest.parse::<u8>().ok()? {
        1 | 8 => 0,
        2 | 9 => 2,
        3 | 10 => 4,
        4 | 11 => 5,
        5 | 12 => 7,
        6 | 13 => 9,
        7 => 11,
        _ => return None,
    };
    Some(base + accidental)
}
