//! Error types module
//!
//! All terminal failure modes of an acquisition request are unified under
//! [`AcquisitionError`]. None of them are fatal to the host process: the
//! flow maps each variant to its outcome (silent end, alert, or empty
//! completion) and nothing is retried automatically.

use crate::models::MediaSource;

/// Failure taxonomy for one acquisition request.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    /// A required source is denied or restricted. The flow presents the
    /// settings alert and ends without delivering a completion.
    #[error("{0} access is denied or restricted")]
    PermissionDenied(MediaSource),

    /// The user dismissed the asset picker or the cropping UI. Silent for
    /// media requests.
    #[error("cancelled by the user")]
    UserCancelled,

    /// The selected asset could not be materialized to a local file, e.g. a
    /// cloud-only asset. Silent.
    #[error("asset could not be materialized to a local file")]
    AssetResolutionFailed,

    /// The materialized file could not be read or decoded into a bitmap.
    /// Silent.
    #[error("image data could not be decoded")]
    DecodeFailed,

    /// The validator rejected the file. The reason is shown to the user and
    /// an empty completion is delivered.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Writing the cropped image failed. Logged and non-fatal: the flow
    /// continues with the intended path.
    #[error("failed to persist cropped image: {0}")]
    PersistenceFailed(String),
}
