use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or decoding venue data.
///
/// A load that fails with any of these leaves the venue empty, never
/// partially populated.
#[derive(Error, Debug)]
pub enum MapDataError {
    #[error("Map data file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid map data: {0}")]
    InvalidData(String),
    #[error("Failed to decode map data: {0}")]
    Decoding(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Reasons a route request between two landmarks is rejected before searching.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Please select both a starting point and destination")]
    MissingSelection,
    #[error("Starting point and destination cannot be the same")]
    SameLocation,
}

/// Coarse classification of a failed load, kept by [`crate::Venue`] after the
/// error itself has been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    NotFound,
    InvalidData,
    Decoding,
}

impl MapDataError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            MapDataError::NotFound(_) => LoadErrorKind::NotFound,
            MapDataError::InvalidData(_) => LoadErrorKind::InvalidData,
            MapDataError::Decoding(_) | MapDataError::Io(_) | MapDataError::Snapshot(_) => {
                LoadErrorKind::Decoding
            }
        }
    }
}
