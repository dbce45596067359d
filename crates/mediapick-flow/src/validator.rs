//! Rule-based file validation.
//!
//! Default [`FileValidator`] implementation driven by the per-media-type
//! limits in [`AcquisitionConfig`]: extension allow-list, maximum size, and
//! empty-file rejection. For a fixed file the outcome is deterministic, so
//! repeated validation of the same `(type, url)` pair agrees.

use std::path::Path;

use mediapick_core::config::{AcquisitionConfig, ValidationLimits};
use mediapick_core::models::{MediaType, ValidationOutcome};

use crate::traits::FileValidator;

/// Validates acquired files against configured size and extension rules.
pub struct RuleValidator {
    image: ValidationLimits,
    logo: ValidationLimits,
    video: ValidationLimits,
    catalogue: ValidationLimits,
}

impl RuleValidator {
    pub fn new(config: &AcquisitionConfig) -> Self {
        RuleValidator {
            image: config.image_limits.clone(),
            logo: config.logo_limits.clone(),
            video: config.video_limits.clone(),
            catalogue: config.catalogue_limits.clone(),
        }
    }

    fn limits_for(&self, media_type: MediaType) -> &ValidationLimits {
        match media_type {
            MediaType::Image => &self.image,
            MediaType::Logo => &self.logo,
            MediaType::Video => &self.video,
            MediaType::Catalogue => &self.catalogue,
        }
    }
}

impl FileValidator for RuleValidator {
    fn validate(&self, media_type: MediaType, url: &Path) -> ValidationOutcome {
        let limits = self.limits_for(media_type);

        let Some(extension) = url
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
        else {
            return ValidationOutcome::invalid(format!(
                "Invalid filename: {}",
                url.display()
            ));
        };

        if !limits.allowed_extensions.contains(&extension) {
            return ValidationOutcome::invalid(format!(
                "Invalid file extension: {} (allowed: {})",
                extension,
                limits.allowed_extensions.join(", ")
            ));
        }

        let size = match std::fs::metadata(url) {
            Ok(metadata) => metadata.len() as usize,
            Err(err) => {
                return ValidationOutcome::invalid(format!(
                    "File could not be read: {}",
                    err
                ));
            }
        };

        if size == 0 {
            return ValidationOutcome::invalid("Empty file");
        }
        if size > limits.max_file_size_bytes {
            return ValidationOutcome::invalid(format!(
                "File too large: {} bytes (max: {} bytes)",
                size, limits.max_file_size_bytes
            ));
        }

        ValidationOutcome::Valid
    }
}
