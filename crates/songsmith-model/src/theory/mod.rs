//! Music theory primitives: pitch classes, chord qualities, keys, chord
//! symbols and harmonic analysis.

mod analysis;
mod key;
mod pitch;
mod quality;
mod symbol;


pub use analysis::{
    chord_role, detect_key, harmonic_function, roman_numeral, ChordRole, HarmonicFunction,
    KeyEstimate, ROMAN_NUMERALS,
};
pub use key::{Key, Mode};
pub use pitch::{
    degree_semitones, flat_pitch_class_name, interval, pitch_class, pitch_class_name,
    split_note_name, transpose, FLAT_NAMES, SHARP_NAMES,
};
pub use quality::{chord_notes, Chord, ChordQuality, QualityFamily};
pub use symbol::{
    format_chord_symbol, format_harte_symbol, is_no_chord, normalize_chord_symbol,
    parse_chord_symbol, ParsedSymbol, NO_CHORD_SYMBOLS,
};
