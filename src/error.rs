//! Error type for the mount pipeline.
//!
//! Rendering itself is permissive: malformed props are dropped or passed
//! through untouched. Only the host document side can fail.

use thiserror::Error;

/// Errors produced while mounting or writing markup into a host document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// No container in the host document matches the mount selector.
    #[error("no element matches mount selector `{0}`")]
    MountPointNotFound(String),

    /// The host document refused the markup write.
    #[error("document rejected markup for `{selector}`: {reason}")]
    Document { selector: String, reason: String },
}
