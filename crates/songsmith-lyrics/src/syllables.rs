//! Heuristic syllable counting.
//!
//! Counts vowel groups (so diphthongs count once), then corrects for a
//! silent final `e` and a silent `-ed`. A consonant followed by `-le` keeps
//! its syllable (`table`), as does `-ed` after `t` or `d` (`wanted`).

use crate::words::{is_vowel, letters, words};

/// Syllables in one word. `0` for input without letters, otherwise at
/// least `1`.
///
/// # Examples
/// ```
/// use songsmith_lyrics::count_syllables;
///
/// assert_eq!(count_syllables("table"), 2);
/// assert_eq!(count_syllables("make"), 1);
/// assert_eq!(count_syllables("wanted"), 2);
/// assert_eq!(count_syllables(""), 0);
/// ```
pub fn count_syllables(word: &str) -> usize {
    let letters = letters(word);
    if letters.is_empty() {
        return 0;
    }

    let mut count = vowel_groups(&letters);
    if silent_final_e(&letters) || silent_ed(&letters) {
        count = count.saturating_sub(1);
    }
    count.max(1)
}

/// Syllables in a line of lyrics.
pub fn count_line_syllables(line: &str) -> usize {
    words(line).map(count_syllables).sum()
}

fn vowel_groups(letters: &[char]) -> usize {
    let mut groups = 0;
    let mut previous_vowel = false;
    for &c in letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }
    groups
}

/// `make`, `the`; not `table`, `see`.
fn silent_final_e(letters: &[char]) -> bool {
    let n = letters.len();
    if n < 2 || letters[n - 1] != 'e' || is_vowel(letters[n - 2]) {
        return false;
    }
    let consonant_le = letters[n - 2] == 'l' && n >= 3 && !is_vowel(letters[n - 3]);
    !consonant_le
}

/// `walked`; not `wanted`, `played`.
fn silent_ed(letters: &[char]) -> bool {
    let n = letters.len();
    n >= 4
        && letters[n - 2] == 'e'
        && letters[n - 1] == 'd'
        && !is_vowel(letters[n - 3])
        && !matches!(letters[n - 3], 't' | 'd')
}
