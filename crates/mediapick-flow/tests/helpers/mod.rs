//! Test helpers: mock collaborators and a flow fixture wired against a
//! temporary directory.

// Each test binary uses a different subset of the mocks.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::DynamicImage;
use tempfile::TempDir;

use mediapick_core::{
    AcquisitionConfig, AssetHandle, MediaSource, MediaType, PermissionState, Screen,
    ValidationOutcome,
};
use mediapick_flow::{
    AlertChoice, AlertPresenter, AssetPicker, AssetResolver, Collaborators, CropRect,
    CroppedImage, CroppingUi, DocumentPicker, FileValidator, MediaAcquisitionFlow,
    PermissionProvider, PickerOptions,
};

pub fn screen() -> Screen {
    Screen::new("test-screen")
}

pub struct MockPermissions {
    states: HashMap<MediaSource, PermissionState>,
}

impl MockPermissions {
    pub fn all_authorized() -> Self {
        MockPermissions {
            states: HashMap::new(),
        }
    }

    /// All sources authorized except `source`.
    pub fn with(source: MediaSource, state: PermissionState) -> Self {
        let mut states = HashMap::new();
        states.insert(source, state);
        MockPermissions { states }
    }
}

impl PermissionProvider for MockPermissions {
    fn status(&self, source: MediaSource) -> PermissionState {
        self.states
            .get(&source)
            .copied()
            .unwrap_or(PermissionState::Authorized)
    }
}

pub struct MockAssetPicker {
    assets: Vec<AssetHandle>,
    pub calls: AtomicUsize,
    pub last_options: Mutex<Option<PickerOptions>>,
}

impl MockAssetPicker {
    pub fn returning(assets: Vec<AssetHandle>) -> Self {
        MockAssetPicker {
            assets,
            calls: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        }
    }

    pub fn cancelling() -> Self {
        Self::returning(Vec::new())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetPicker for MockAssetPicker {
    async fn pick(&self, _screen: &Screen, options: PickerOptions) -> Vec<AssetHandle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(options);
        self.assets.clone()
    }
}

pub struct MockResolver {
    url: Option<PathBuf>,
}

impl MockResolver {
    pub fn resolving(url: PathBuf) -> Self {
        MockResolver { url: Some(url) }
    }

    pub fn failing() -> Self {
        MockResolver { url: None }
    }
}

#[async_trait]
impl AssetResolver for MockResolver {
    async fn resolve(&self, _asset: &AssetHandle) -> Option<PathBuf> {
        self.url.clone()
    }
}

pub struct MockCropper {
    confirm: bool,
    pub calls: AtomicUsize,
}

impl MockCropper {
    pub fn confirming() -> Self {
        MockCropper {
            confirm: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn cancelling() -> Self {
        MockCropper {
            confirm: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CroppingUi for MockCropper {
    async fn crop(
        &self,
        _screen: &Screen,
        image: DynamicImage,
        _confirm_title: &str,
    ) -> Option<CroppedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.confirm {
            return None;
        }
        let cropped = image.crop_imm(0, 0, 4, 4);
        Some(CroppedImage {
            image: cropped,
            rect: CropRect {
                x: 0,
                y: 0,
                width: 4,
                height: 4,
                angle: 0,
            },
        })
    }
}

pub struct MockDocumentPicker {
    urls: Vec<PathBuf>,
    pub calls: AtomicUsize,
    pub last_content_types: Mutex<Vec<String>>,
}

impl MockDocumentPicker {
    pub fn returning(urls: Vec<PathBuf>) -> Self {
        MockDocumentPicker {
            urls,
            calls: AtomicUsize::new(0),
            last_content_types: Mutex::new(Vec::new()),
        }
    }

    pub fn cancelling() -> Self {
        Self::returning(Vec::new())
    }
}

#[async_trait]
impl DocumentPicker for MockDocumentPicker {
    async fn pick(&self, _screen: &Screen, content_types: &[&str]) -> Vec<PathBuf> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_content_types.lock().unwrap() =
            content_types.iter().map(|t| t.to_string()).collect();
        self.urls.clone()
    }
}

pub struct MockValidator {
    outcome: ValidationOutcome,
    pub calls: AtomicUsize,
}

impl MockValidator {
    pub fn accepting() -> Self {
        MockValidator {
            outcome: ValidationOutcome::Valid,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(reason: &str) -> Self {
        MockValidator {
            outcome: ValidationOutcome::invalid(reason),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FileValidator for MockValidator {
    fn validate(&self, _media_type: MediaType, _url: &std::path::Path) -> ValidationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

pub struct MockAlerts {
    choice: AlertChoice,
    pub permission_alerts: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<String>>,
    pub settings_opened: AtomicBool,
}

impl MockAlerts {
    pub fn choosing(choice: AlertChoice) -> Self {
        MockAlerts {
            choice,
            permission_alerts: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
            settings_opened: AtomicBool::new(false),
        }
    }

    pub fn permission_alert_count(&self) -> usize {
        self.permission_alerts.lock().unwrap().len()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn settings_was_opened(&self) -> bool {
        self.settings_opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertPresenter for MockAlerts {
    async fn present_permission_alert(&self, _screen: &Screen, message: &str) -> AlertChoice {
        self.permission_alerts.lock().unwrap().push(message.to_string());
        self.choice
    }

    async fn present_notice(&self, _screen: &Screen, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn open_settings(&self) {
        self.settings_opened.store(true, Ordering::SeqCst);
    }
}

/// A flow wired with mocks against a temp directory. Defaults to the happy
/// path: all permissions authorized, one asset selected that resolves to a
/// real JPEG, crop confirmed, validator accepting. Tests replace individual
/// mocks before calling [`FlowFixture::flow`].
pub struct FlowFixture {
    pub permissions: Arc<MockPermissions>,
    pub picker: Arc<MockAssetPicker>,
    pub resolver: Arc<MockResolver>,
    pub cropper: Arc<MockCropper>,
    pub documents: Arc<MockDocumentPicker>,
    pub validator: Arc<MockValidator>,
    pub alerts: Arc<MockAlerts>,
    pub config: AcquisitionConfig,
    pub source_image: PathBuf,
    pub temp: TempDir,
}

impl FlowFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let source_image = write_source_jpeg(&temp);
        let config = AcquisitionConfig {
            media_dir: temp.path().join("media"),
            ..AcquisitionConfig::default()
        };

        FlowFixture {
            permissions: Arc::new(MockPermissions::all_authorized()),
            picker: Arc::new(MockAssetPicker::returning(vec![AssetHandle::new(
                "asset-1",
            )])),
            resolver: Arc::new(MockResolver::resolving(source_image.clone())),
            cropper: Arc::new(MockCropper::confirming()),
            documents: Arc::new(MockDocumentPicker::cancelling()),
            validator: Arc::new(MockValidator::accepting()),
            alerts: Arc::new(MockAlerts::choosing(AlertChoice::Cancel)),
            config,
            source_image,
            temp,
        }
    }

    pub fn flow(&self) -> MediaAcquisitionFlow {
        self.flow_with_validator(self.validator.clone())
    }

    pub fn flow_with_validator(&self, validator: Arc<dyn FileValidator>) -> MediaAcquisitionFlow {
        MediaAcquisitionFlow::new(
            self.config.clone(),
            Collaborators {
                permissions: self.permissions.clone(),
                asset_picker: self.picker.clone(),
                resolver: self.resolver.clone(),
                cropper: self.cropper.clone(),
                documents: self.documents.clone(),
                validator,
                alerts: self.alerts.clone(),
            },
        )
    }
}

/// Write a small real JPEG the resolver can point at.
pub fn write_source_jpeg(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("source.jpg");
    DynamicImage::new_rgb8(8, 8).save(&path).unwrap();
    path
}
