//! Configuration module
//!
//! Env-driven configuration for the acquisition flow: application name used
//! in permission alerts, the app-private directory cropped images are
//! written to, JPEG quality, and per-media-type validation limits.

use std::env;
use std::path::PathBuf;

use crate::models::MediaType;

// Defaults
const DEFAULT_APP_NAME: &str = "mediapick";
const DEFAULT_MEDIA_DIR: &str = "media";
const DEFAULT_JPEG_QUALITY: u8 = 30;
const DEFAULT_MAX_IMAGE_SIZE_MB: usize = 10;
const DEFAULT_MAX_LOGO_SIZE_MB: usize = 2;
const DEFAULT_MAX_VIDEO_SIZE_MB: usize = 100;
const DEFAULT_MAX_CATALOGUE_SIZE_MB: usize = 25;

/// Size and extension rules for one media type.
#[derive(Clone, Debug)]
pub struct ValidationLimits {
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

impl ValidationLimits {
    pub fn new(max_file_size_bytes: usize, allowed_extensions: &[&str]) -> Self {
        ValidationLimits {
            max_file_size_bytes,
            allowed_extensions: allowed_extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Acquisition flow configuration.
#[derive(Clone, Debug)]
pub struct AcquisitionConfig {
    /// Application name, shown in the permission-required alert.
    pub app_name: String,
    /// App-private directory cropped images are persisted to. Created on
    /// demand.
    pub media_dir: PathBuf,
    /// JPEG quality (1-100) for persisted crops.
    pub jpeg_quality: u8,
    pub image_limits: ValidationLimits,
    pub logo_limits: ValidationLimits,
    pub video_limits: ValidationLimits,
    pub catalogue_limits: ValidationLimits,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        AcquisitionConfig {
            app_name: DEFAULT_APP_NAME.to_string(),
            media_dir: PathBuf::from(DEFAULT_MEDIA_DIR),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            image_limits: ValidationLimits::new(
                DEFAULT_MAX_IMAGE_SIZE_MB * 1024 * 1024,
                &["jpg", "jpeg", "png"],
            ),
            logo_limits: ValidationLimits::new(
                DEFAULT_MAX_LOGO_SIZE_MB * 1024 * 1024,
                &["jpg", "jpeg", "png"],
            ),
            video_limits: ValidationLimits::new(
                DEFAULT_MAX_VIDEO_SIZE_MB * 1024 * 1024,
                &["mp4", "mov", "m4v"],
            ),
            catalogue_limits: ValidationLimits::new(
                DEFAULT_MAX_CATALOGUE_SIZE_MB * 1024 * 1024,
                &["pdf"],
            ),
        }
    }
}

impl AcquisitionConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let defaults = AcquisitionConfig::default();

        Ok(AcquisitionConfig {
            app_name: env::var("APP_NAME").unwrap_or(defaults.app_name),
            media_dir: env::var("MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.media_dir),
            jpeg_quality: env::var("CROPPED_JPEG_QUALITY")
                .unwrap_or_else(|_| DEFAULT_JPEG_QUALITY.to_string())
                .parse()?,
            image_limits: limits_from_env("IMAGE", defaults.image_limits)?,
            logo_limits: limits_from_env("LOGO", defaults.logo_limits)?,
            video_limits: limits_from_env("VIDEO", defaults.video_limits)?,
            catalogue_limits: limits_from_env("CATALOGUE", defaults.catalogue_limits)?,
        })
    }

    /// Validation limits for a media type.
    pub fn limits_for(&self, media_type: MediaType) -> &ValidationLimits {
        match media_type {
            MediaType::Image => &self.image_limits,
            MediaType::Logo => &self.logo_limits,
            MediaType::Video => &self.video_limits,
            MediaType::Catalogue => &self.catalogue_limits,
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.app_name.trim().is_empty() {
            anyhow::bail!("APP_NAME must not be empty");
        }
        if self.media_dir.as_os_str().is_empty() {
            anyhow::bail!("MEDIA_DIR must not be empty");
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            anyhow::bail!(
                "CROPPED_JPEG_QUALITY must be between 1 and 100, got {}",
                self.jpeg_quality
            );
        }
        for limits in [
            &self.image_limits,
            &self.logo_limits,
            &self.video_limits,
            &self.catalogue_limits,
        ] {
            if limits.max_file_size_bytes == 0 {
                anyhow::bail!("max file size must be greater than zero");
            }
            if limits.allowed_extensions.is_empty() {
                anyhow::bail!("allowed extension list must not be empty");
            }
        }
        Ok(())
    }
}

/// Read `<PREFIX>_MAX_SIZE_MB` and `<PREFIX>_ALLOWED_EXTENSIONS` (comma
/// separated), falling back to the coded defaults.
fn limits_from_env(
    prefix: &str,
    defaults: ValidationLimits,
) -> Result<ValidationLimits, anyhow::Error> {
    let max_file_size_bytes = match env::var(format!("{prefix}_MAX_SIZE_MB")) {
        Ok(raw) => raw.parse::<usize>()? * 1024 * 1024,
        Err(_) => defaults.max_file_size_bytes,
    };
    let allowed_extensions = match env::var(format!("{prefix}_ALLOWED_EXTENSIONS")) {
        Ok(raw) => raw
            .split(',')
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect(),
        Err(_) => defaults.allowed_extensions,
    };
    Ok(ValidationLimits {
        max_file_size_bytes,
        allowed_extensions,
    })
}
