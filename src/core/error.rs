//! Error types for the fade core and content sources.

use std::path::PathBuf;

use thiserror::Error;

use super::fade::ScrollMetrics;

/// Invalid controller configuration.
#[derive(Debug, Error, PartialEq)]
pub enum FadeError {
    #[error("fade distance must be a positive, finite number (got {0})")]
    InvalidFadeDistance(f64),
}

/// A viewport could not report usable metrics.
#[derive(Debug, Error, PartialEq)]
pub enum ViewportError {
    /// The viewport is gone or cannot be read right now.
    #[error("viewport is detached")]
    Detached,
    #[error("viewport reported malformed metrics: {0:?}")]
    Malformed(ScrollMetrics),
}

/// Failure to read a pager content source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },
}
