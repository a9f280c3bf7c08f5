//! Error types for project validation.

use thiserror::Error;

/// A broken project invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectError {
    #[error("section {index} has start bar {actual}, expected {expected}")]
    StartBarMismatch {
        index: usize,
        expected: u32,
        actual: u32,
    },
    #[error("section {index} has zero bars")]
    ZeroBars { index: usize },
    #[error("section {index} has invalid time range {start}..{end}")]
    InvalidTimeRange { index: usize, start: f64, end: f64 },
    #[error("duplicate section id '{id}'")]
    DuplicateSectionId { id: String },
    #[error("project bpm must be positive, got {bpm}")]
    InvalidBpm { bpm: f64 },
    #[error("section {index} pushes the bar count past {}", u32::MAX)]
    BarOverflow { index: usize },
}

impl ProjectError {
    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ProjectError::StartBarMismatch { .. } => "PROJECT_001",
            ProjectError::ZeroBars { .. } => "PROJECT_002",
            ProjectError::InvalidTimeRange { .. } => "PROJECT_003",
            ProjectError::DuplicateSectionId { .. } => "PROJECT_004",
            ProjectError::InvalidBpm { .. } => "PROJECT_005",
            ProjectError::BarOverflow { .. } => "PROJECT_006",
        }
    }
}
