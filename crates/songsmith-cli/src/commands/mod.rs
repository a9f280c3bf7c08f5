//! CLI command implementations

pub mod detect;
pub mod export;
pub mod import;
pub mod json_output;
pub mod lyrics;
