//! Musical keys.

use serde::{Deserialize, Serialize};

use super::pitch::{pitch_class_name, split_note_name};

/// Key mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    /// Returns the serialized name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

/// A key: tonic pitch class plus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Key {
    pub root: u8,
    pub mode: Mode,
}

impl Key {
    /// C major.
    pub const C_MAJOR: Key = Key {
        root: 0,
        mode: Mode::Major,
    };

    pub fn new(root: u8, mode: Mode) -> Self {
        Self {
            root: root % 12,
            mode,
        }
    }

    /// Parse a key string.
    ///
    /// Accepts `"C major"`, `"C:maj"`, `"A:minor"`, `"Am"`, `"F# min"` and a
    /// bare tonic (`"Eb"`, major). Modal names other than major/minor are
    /// rejected.
    ///
    /// # Examples
    /// ```
    /// use songsmith_model::theory::{Key, Mode};
    ///
    /// assert_eq!(Key::parse("A:min"), Some(Key::new(9, Mode::Minor)));
    /// assert_eq!(Key::parse("Db major"), Some(Key::new(1, Mode::Major)));
    /// assert_eq!(Key::parse("C:dorian"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Key> {
        let trimmed = text.trim();
        let (root, used) = split_note_name(trimmed)?;
        let rest = trimmed[used..]
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
            .trim();

        let mode = match rest {
            "" | "M" => Mode::Major,
            "m" | "-" => Mode::Minor,
            other => match other.to_ascii_lowercase().as_str() {
                "maj" | "major" | "ionian" => Mode::Major,
                "min" | "minor" | "aeolian" => Mode::Minor,
                _ => return None,
            },
        };
        Some(Key::new(root, mode))
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", pitch_class_name(self.root), self.mode.as_str())
    }
}
