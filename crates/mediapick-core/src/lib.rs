//! Mediapick Core Library
//!
//! This crate provides the domain types shared by the acquisition flow:
//! media/source/permission enums, the opaque UI handles, the failure
//! taxonomy, and configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AcquisitionConfig, ValidationLimits};
pub use error::AcquisitionError;
pub use models::{
    AssetHandle, MediaSource, MediaType, PermissionState, Screen, ValidationOutcome,
};
