//! Mediapick Flow Library
//!
//! Orchestrates a single media-acquisition request: permission gate, system
//! asset or document picker, optional crop + persistence, file validation,
//! and exactly-once completion. The host UI toolkit plugs in through the
//! collaborator traits in [`traits`]; this crate contains no platform
//! bindings.

pub mod flow;
pub mod persist;
pub mod traits;
pub mod validator;

// Re-export commonly used types
pub use flow::{AbandonReason, AcquisitionOutcome, Collaborators, MediaAcquisitionFlow};
pub use persist::PersistError;
pub use traits::{
    AlertChoice, AlertPresenter, AssetKind, AssetPicker, AssetResolver, CropRect, CroppedImage,
    CroppingUi, DocumentPicker, FileValidator, PermissionProvider, PickerOptions,
};
pub use validator::RuleValidator;
