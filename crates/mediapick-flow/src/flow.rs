//! The acquisition orchestrator.
//!
//! Drives one request from permission check through validated file path:
//! permission gate, system picker, asset materialization, optional crop and
//! persistence, validation, completion. All collaborator calls happen on
//! the caller's task; only decode/encode and file I/O leave it, and their
//! results are awaited before anything user-visible happens.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use tokio::fs;

use mediapick_core::config::AcquisitionConfig;
use mediapick_core::error::AcquisitionError;
use mediapick_core::models::{MediaSource, MediaType, Screen, ValidationOutcome};

use crate::persist;
use crate::traits::{
    AlertChoice, AlertPresenter, AssetKind, AssetPicker, AssetResolver, CroppingUi,
    DocumentPicker, FileValidator, PermissionProvider, PickerOptions,
};

/// Confirm-button title shown on the cropping UI.
const CROP_CONFIRM_TITLE: &str = "Upload";

/// Content types offered by the document picker.
const DOCUMENT_CONTENT_TYPES: &[&str] = &["application/pdf"];

/// Why a media request ended without delivering a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbandonReason {
    /// A required source is denied or restricted; the settings alert was
    /// shown.
    PermissionDenied(MediaSource),
    /// The user dismissed the picker or the cropping UI.
    Cancelled,
    /// The selected asset could not be materialized to a local file.
    ResolutionFailed,
    /// The materialized file could not be read or decoded.
    DecodeFailed,
}

/// How a media request ended.
///
/// `Delivered` is the completion handed to the caller: empty on a
/// user-visible failure, exactly one path on success. `Abandoned` covers
/// the paths where no completion fires and the user must re-initiate. A
/// request produces exactly one of these, once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionOutcome {
    Delivered(Vec<PathBuf>),
    Abandoned(AbandonReason),
}

impl AcquisitionOutcome {
    /// The delivered paths, if a completion fired.
    pub fn delivered(&self) -> Option<&[PathBuf]> {
        match self {
            AcquisitionOutcome::Delivered(urls) => Some(urls),
            AcquisitionOutcome::Abandoned(_) => None,
        }
    }
}

/// The UI-side collaborators the flow presents through.
pub struct Collaborators {
    pub permissions: Arc<dyn PermissionProvider>,
    pub asset_picker: Arc<dyn AssetPicker>,
    pub resolver: Arc<dyn AssetResolver>,
    pub cropper: Arc<dyn CroppingUi>,
    pub documents: Arc<dyn DocumentPicker>,
    pub validator: Arc<dyn FileValidator>,
    pub alerts: Arc<dyn AlertPresenter>,
}

/// Orchestrates media acquisition requests.
pub struct MediaAcquisitionFlow {
    config: AcquisitionConfig,
    ui: Collaborators,
}

impl MediaAcquisitionFlow {
    pub fn new(config: AcquisitionConfig, collaborators: Collaborators) -> Self {
        MediaAcquisitionFlow {
            config,
            ui: collaborators,
        }
    }

    /// Acquire a single media item of `media_type`.
    ///
    /// Presents onto `screen`. The returned outcome is the completion: it
    /// resolves exactly once, after every alert and validation step for
    /// this request has finished.
    pub async fn request_media(
        &self,
        screen: &Screen,
        media_type: MediaType,
        enable_camera: bool,
    ) -> AcquisitionOutcome {
        match self.run_media(screen, media_type, enable_camera).await {
            Ok(urls) => AcquisitionOutcome::Delivered(urls),
            Err(err) => {
                tracing::debug!(%media_type, error = %err, "media request ended");
                match err {
                    AcquisitionError::PermissionDenied(source) => {
                        AcquisitionOutcome::Abandoned(AbandonReason::PermissionDenied(source))
                    }
                    AcquisitionError::UserCancelled => {
                        AcquisitionOutcome::Abandoned(AbandonReason::Cancelled)
                    }
                    AcquisitionError::AssetResolutionFailed => {
                        AcquisitionOutcome::Abandoned(AbandonReason::ResolutionFailed)
                    }
                    AcquisitionError::DecodeFailed => {
                        AcquisitionOutcome::Abandoned(AbandonReason::DecodeFailed)
                    }
                    // Validation rejection signals the caller explicitly;
                    // the alert was already presented.
                    AcquisitionError::ValidationFailed(_) => {
                        AcquisitionOutcome::Delivered(Vec::new())
                    }
                    // Persistence failures are handled inline and never
                    // terminate the flow.
                    AcquisitionError::PersistenceFailed(_) => {
                        AcquisitionOutcome::Delivered(Vec::new())
                    }
                }
            }
        }
    }

    /// Acquire a single PDF through the document picker.
    ///
    /// Unlike media requests, cancellation here delivers an empty list.
    pub async fn request_document(&self, screen: &Screen) -> Vec<PathBuf> {
        let mut urls = self
            .ui
            .documents
            .pick(screen, DOCUMENT_CONTENT_TYPES)
            .await;
        let Some(url) = urls.drain(..).next() else {
            tracing::debug!("document picker cancelled");
            return Vec::new();
        };

        match self
            .deliver_validated(screen, MediaType::Catalogue, url)
            .await
        {
            Ok(urls) => urls,
            Err(_) => Vec::new(),
        }
    }

    async fn run_media(
        &self,
        screen: &Screen,
        media_type: MediaType,
        enable_camera: bool,
    ) -> Result<Vec<PathBuf>, AcquisitionError> {
        self.check_permissions(screen, media_type, enable_camera)
            .await?;

        let kind = if media_type.is_croppable() {
            AssetKind::Photos
        } else {
            AssetKind::Videos
        };
        let assets = self
            .ui
            .asset_picker
            .pick(screen, PickerOptions::single(kind))
            .await;
        let Some(asset) = assets.into_iter().next() else {
            return Err(AcquisitionError::UserCancelled);
        };
        tracing::debug!(asset = %asset.id(), %media_type, "asset selected");

        let url = self
            .ui
            .resolver
            .resolve(&asset)
            .await
            .ok_or(AcquisitionError::AssetResolutionFailed)?;
        tracing::debug!(asset = %asset.id(), url = %url.display(), "asset materialized");

        if media_type.is_croppable() {
            self.crop_and_persist(screen, media_type, url).await
        } else {
            self.deliver_validated(screen, media_type, url).await
        }
    }

    /// Permission gate. Photo library is always required; camera only when
    /// enabled and the request type can come from it. The first blocked
    /// source aborts with the settings alert.
    async fn check_permissions(
        &self,
        screen: &Screen,
        media_type: MediaType,
        enable_camera: bool,
    ) -> Result<(), AcquisitionError> {
        let mut required = vec![MediaSource::PhotoLibrary];
        if enable_camera && media_type.is_camera_capable() {
            required.push(MediaSource::Camera);
        }

        for source in required {
            let state = self.ui.permissions.status(source);
            if state.blocks_presentation() {
                tracing::info!(%source, ?state, "permission gate blocked presentation");
                self.present_permission_alert(screen, source).await;
                return Err(AcquisitionError::PermissionDenied(source));
            }
        }
        Ok(())
    }

    async fn present_permission_alert(&self, screen: &Screen, source: MediaSource) {
        let message = format!(
            "{} does not have access to your {}. To enable access, tap Settings and turn on {}.",
            self.config.app_name,
            source.description(),
            source.name()
        );
        let choice = self
            .ui
            .alerts
            .present_permission_alert(screen, &message)
            .await;
        if choice == AlertChoice::OpenSettings {
            self.ui.alerts.open_settings();
        }
    }

    /// Image/logo branch: decode, crop, persist, then validate the
    /// persisted path.
    async fn crop_and_persist(
        &self,
        screen: &Screen,
        media_type: MediaType,
        url: PathBuf,
    ) -> Result<Vec<PathBuf>, AcquisitionError> {
        let data = fs::read(&url).await.map_err(|err| {
            tracing::debug!(url = %url.display(), error = %err, "could not read materialized file");
            AcquisitionError::DecodeFailed
        })?;
        let bitmap = persist::decode_bitmap(Bytes::from(data)).await.map_err(|err| {
            tracing::debug!(url = %url.display(), error = %err, "bitmap decode failed");
            AcquisitionError::DecodeFailed
        })?;

        let Some(cropped) = self
            .ui
            .cropper
            .crop(screen, bitmap, CROP_CONFIRM_TITLE)
            .await
        else {
            return Err(AcquisitionError::UserCancelled);
        };
        tracing::debug!(rect = ?cropped.rect, "crop confirmed");

        let path = match persist::save_cropped_jpeg(
            &self.config.media_dir,
            cropped.image,
            self.config.jpeg_quality,
        )
        .await
        {
            Ok(path) => path,
            Err(err) => {
                // Non-fatal by policy: keep the intended path and let
                // validation report on it.
                let err_msg = err.to_string();
                tracing::warn!(
                    error = %AcquisitionError::PersistenceFailed(err_msg),
                    "continuing with intended path"
                );
                err.into_path()
            }
        };

        self.deliver_validated(screen, media_type, path).await
    }

    /// Final validation step shared by all branches. Rejection presents the
    /// reason and maps to an empty completion.
    async fn deliver_validated(
        &self,
        screen: &Screen,
        media_type: MediaType,
        url: PathBuf,
    ) -> Result<Vec<PathBuf>, AcquisitionError> {
        match self.ui.validator.validate(media_type, &url) {
            ValidationOutcome::Valid => {
                tracing::info!(%media_type, url = %url.display(), "acquisition complete");
                Ok(vec![url])
            }
            ValidationOutcome::Invalid { reason } => {
                tracing::info!(%media_type, url = %url.display(), %reason, "validation rejected file");
                self.ui.alerts.present_notice(screen, &reason).await;
                Err(AcquisitionError::ValidationFailed(reason))
            }
        }
    }
}
