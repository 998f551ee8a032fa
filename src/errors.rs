//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! Nothing in the posing or interpolation core is fatal: degenerate
//! geometry, missing joints, and coincident timestamps all degrade to a
//! defined fallback instead of raising. [`RigError`] therefore only
//! covers the edges of the system — project loading/saving and clip
//! management.
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, RigError>`.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the stickrig crate.
#[derive(Error, Debug)]
pub enum RigError {
    // ========================================================================
    // Project Format Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but is not a project layout this crate knows.
    #[error("Unsupported project format: {0}")]
    UnsupportedFormat(String),

    /// The document is a recognized layout but carries no usable pose data.
    #[error("Project contains no clips or keyframes")]
    EmptyProject,

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Clip Management Errors
    // ========================================================================
    /// The requested clip does not exist in the project.
    #[error("Clip not found: {0}")]
    ClipNotFound(Uuid),

    /// A keyframe commit was requested with no clip selected.
    #[error("No active clip to commit into")]
    NoActiveClip,

    /// A keyframe already exists at this timestamp.
    ///
    /// Duplicate timestamps are rejected outright; replace semantics are
    /// achieved by removing the existing keyframe first.
    #[error("Keyframe already exists at {timestamp}s")]
    DuplicateKeyframe {
        /// The contested timestamp in seconds.
        timestamp: f32,
    },
}

/// Alias for `Result<T, RigError>`.
pub type Result<T> = std::result::Result<T, RigError>;
