//! Songsmith Model Library
//!
//! Chord model, harmonic analysis and the project representation shared by
//! the import pipeline and the editing layer.
//!
//! # Example
//!
//! ```
//! use songsmith_model::theory::{chord_role, parse_chord_symbol, HarmonicFunction, Key};
//!
//! let parsed = parse_chord_symbol("G:7").unwrap();
//! let role = chord_role(parsed.chord.root, parsed.chord.quality, &Key::C_MAJOR);
//! assert_eq!(role.roman_numeral, "V");
//! assert_eq!(role.function, HarmonicFunction::Dominant);
//! ```
//!
//! # Modules
//!
//! - [`theory`]: pitch classes, chord qualities, keys, chord symbols, analysis
//! - [`project`]: project, sections, chords and progressions
//! - [`error`]: project invariant errors

pub mod error;
pub mod project;
pub mod theory;

pub use error::ProjectError;
pub use project::{
    bars_from_duration, Harmony, Progression, ProgressionChord, Project, ProjectMetadata,
    Section, SectionChord, SectionType, Structure, TIME_SIGNATURE,
};
pub use theory::{Chord, ChordQuality, HarmonicFunction, Key, Mode};
