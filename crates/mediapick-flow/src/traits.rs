//! Collaborator contracts consumed by the acquisition flow.
//!
//! Host applications implement these against their UI toolkit and hand them
//! to [`MediaAcquisitionFlow`](crate::MediaAcquisitionFlow) as `Arc<dyn _>`
//! trait objects. Every presentable collaborator receives the [`Screen`]
//! handle at call time; none of them should cache it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::DynamicImage;

use mediapick_core::models::{
    AssetHandle, MediaSource, MediaType, PermissionState, Screen, ValidationOutcome,
};

/// Asset class offered by the system picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Photos,
    Videos,
}

/// System picker configuration.
///
/// The flow always pins selection to a single item and forbids the picker
/// from closing itself on selection; dismissal stays under flow control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerOptions {
    pub single_select: bool,
    pub auto_close_on_select: bool,
    pub max_items: usize,
    pub kind: AssetKind,
}

impl PickerOptions {
    /// The pinned single-selection configuration for the given asset class.
    pub fn single(kind: AssetKind) -> Self {
        PickerOptions {
            single_select: true,
            auto_close_on_select: false,
            max_items: 1,
            kind,
        }
    }
}

/// Crop geometry reported by the cropping UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    /// Rotation applied during cropping, in degrees.
    pub angle: i32,
}

/// Output of a confirmed crop.
pub struct CroppedImage {
    pub image: DynamicImage,
    pub rect: CropRect,
}

/// Action chosen on the permission-required alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertChoice {
    Cancel,
    OpenSettings,
}

/// Authorization status lookup for one source.
///
/// Querying may itself raise the OS's first-time prompt; the flow treats
/// that as a side effect of the host platform, not of this contract.
pub trait PermissionProvider: Send + Sync {
    fn status(&self, source: MediaSource) -> PermissionState;
}

/// System asset picker. Returns the selected handles, empty on cancel.
#[async_trait]
pub trait AssetPicker: Send + Sync {
    async fn pick(&self, screen: &Screen, options: PickerOptions) -> Vec<AssetHandle>;
}

/// Materializes an asset handle to a local file.
///
/// `None` when no file can be produced, e.g. a cloud-only asset that has
/// not been downloaded.
#[async_trait]
pub trait AssetResolver: Send + Sync {
    async fn resolve(&self, asset: &AssetHandle) -> Option<PathBuf>;
}

/// Cropping UI seeded with a decoded bitmap. `None` on cancel.
#[async_trait]
pub trait CroppingUi: Send + Sync {
    async fn crop(
        &self,
        screen: &Screen,
        image: DynamicImage,
        confirm_title: &str,
    ) -> Option<CroppedImage>;
}

/// Document picker restricted to a content-type allow-list. Returns the
/// picked file paths, empty on cancel.
#[async_trait]
pub trait DocumentPicker: Send + Sync {
    async fn pick(&self, screen: &Screen, content_types: &[&str]) -> Vec<PathBuf>;
}

/// Type/size/content policy check applied to an acquired file.
///
/// Must be fast and side-effect-free; for a fixed file the outcome is a
/// pure function of `(media_type, url)`.
pub trait FileValidator: Send + Sync {
    fn validate(&self, media_type: MediaType, url: &Path) -> ValidationOutcome;
}

/// Modal alert presentation on the current screen.
#[async_trait]
pub trait AlertPresenter: Send + Sync {
    /// Alert with Cancel / Settings actions; resolves to the chosen action.
    async fn present_permission_alert(&self, screen: &Screen, message: &str) -> AlertChoice;

    /// Notice with a single dismiss action.
    async fn present_notice(&self, screen: &Screen, message: &str);

    /// Deep-link to the system settings page for this application.
    fn open_settings(&self);
}
