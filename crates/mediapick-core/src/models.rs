use std::any::Any;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of content being requested.
///
/// `Image` and `Logo` go through the crop step and a photo-filtered picker;
/// `Catalogue` is the document kind used by the PDF picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Logo,
    Video,
    Catalogue,
}

impl MediaType {
    /// Kinds that are cropped before being handed to the caller.
    pub fn is_croppable(self) -> bool {
        matches!(self, MediaType::Image | MediaType::Logo)
    }

    /// Kinds the device camera can produce. Documents cannot, so requesting
    /// them never requires camera permission.
    pub fn is_camera_capable(self) -> bool {
        matches!(self, MediaType::Image | MediaType::Logo | MediaType::Video)
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Logo => write!(f, "logo"),
            MediaType::Video => write!(f, "video"),
            MediaType::Catalogue => write!(f, "catalogue"),
        }
    }
}

/// Acquisition channel for media requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSource {
    Camera,
    PhotoLibrary,
}

impl MediaSource {
    /// Short name, matching the per-app toggle in system settings.
    pub fn name(self) -> &'static str {
        match self {
            MediaSource::Camera => "Camera",
            MediaSource::PhotoLibrary => "Photos",
        }
    }

    /// Longer human-readable description used in alert bodies.
    pub fn description(self) -> &'static str {
        match self {
            MediaSource::Camera => "Camera",
            MediaSource::PhotoLibrary => "Photos or Videos",
        }
    }
}

impl Display for MediaSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

/// Unified authorization state across camera and photo library.
///
/// Queried fresh on every request; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    NotDetermined,
    Restricted,
    Denied,
    Authorized,
}

impl PermissionState {
    /// Denied and restricted both block presentation. Not-determined is let
    /// through because the system picker raises its own first-time prompt.
    pub fn blocks_presentation(self) -> bool {
        matches!(self, PermissionState::Denied | PermissionState::Restricted)
    }
}

/// Result of validating a materialized file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationOutcome {
    Valid,
    Invalid { reason: String },
}

impl ValidationOutcome {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ValidationOutcome::Invalid {
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Opaque handle to the host screen onto which pickers and alerts are
/// presented.
///
/// Callers pass it explicitly into each request and the flow hands it to
/// every collaborator at presentation time; the flow itself never stores
/// one across requests. Host adapters recover their concrete view handle
/// with [`Screen::downcast_ref`].
#[derive(Clone)]
pub struct Screen {
    inner: Arc<dyn Any + Send + Sync>,
}

impl Screen {
    pub fn new<T: Any + Send + Sync>(handle: T) -> Self {
        Screen {
            inner: Arc::new(handle),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Screen").finish_non_exhaustive()
    }
}

/// Opaque reference to an item in the system media library, not yet
/// materialized to a local file.
///
/// The `id` exists only for log correlation; the payload is whatever the
/// host's picker adapter put in and the resolver adapter takes out.
#[derive(Clone)]
pub struct AssetHandle {
    id: Uuid,
    inner: Arc<dyn Any + Send + Sync>,
}

impl AssetHandle {
    pub fn new<T: Any + Send + Sync>(asset: T) -> Self {
        AssetHandle {
            id: Uuid::new_v4(),
            inner: Arc::new(asset),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for AssetHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AssetHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
