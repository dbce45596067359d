//! Bitmap decode and cropped-image persistence.
//!
//! Decode and encode are CPU-bound and run on the blocking pool; directory
//! creation and the write itself go through `tokio::fs`. The write is
//! atomic (temp file + rename) so a crash never leaves a partial JPEG at
//! the final path.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytes::Bytes;
use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType};
use tokio::fs;

/// Filename timestamp format for persisted crops.
const CROP_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S%3f";

/// A cropped image could not be written. Non-fatal by policy: the flow logs
/// it and continues with the intended path.
#[derive(Debug, thiserror::Error)]
#[error("failed to write cropped image to {}: {source}", path.display())]
pub struct PersistError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl PersistError {
    /// The path the image was meant to land at.
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Decode an in-memory payload into a bitmap.
pub async fn decode_bitmap(data: Bytes) -> Result<DynamicImage> {
    tokio::task::spawn_blocking(move || {
        image::load_from_memory(&data).context("image decode failed")
    })
    .await
    .context("decode task panicked")?
}

/// Encode `image` as JPEG at `quality` and write it under `dir` with a
/// timestamp-derived filename, creating the directory if absent. Returns
/// the final path.
pub async fn save_cropped_jpeg(
    dir: &Path,
    image: DynamicImage,
    quality: u8,
) -> Result<PathBuf, PersistError> {
    let filename = format!("{}.jpg", Utc::now().format(CROP_TIMESTAMP_FORMAT));
    let path = dir.join(filename);

    let encoded = match encode_jpeg(image, quality).await {
        Ok(data) => data,
        Err(err) => {
            return Err(PersistError {
                path,
                source: io::Error::other(err.to_string()),
            })
        }
    };

    if let Err(source) = write_atomic(dir, &path, &encoded).await {
        return Err(PersistError { path, source });
    }
    Ok(path)
}

async fn encode_jpeg(image: DynamicImage, quality: u8) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, quality)
            .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
            .context("JPEG encode failed")?;
        Ok(buffer)
    })
    .await
    .context("encode task panicked")?
}

async fn write_atomic(dir: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    fs::create_dir_all(dir).await?;
    let tmp = path.with_extension("jpg.tmp");
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await
}
