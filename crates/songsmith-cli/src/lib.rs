//! Songsmith CLI library.
//!
//! Command implementations behind the `songsmith` binary: format detection,
//! annotation import, JAMS export and lyric analysis.

pub mod commands;
pub mod input;
pub mod logging;
