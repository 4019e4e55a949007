// src/materialize.rs
//! Turning one fetched payload into one file on disk.
//!
//! The working format comes from the URL path's extension; anything unknown (or a
//! query-only URL like a favicon service) is treated as PNG. Icons are never kept as
//! `.ico`: an `.ico` URL, or a payload starting with the ICO magic, is decoded and
//! re-encoded as PNG. Everything else is written byte-for-byte.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;

use crate::config::consts::{CANONICAL_EXT, SUPPORTED_EXTS};
use crate::config::options::ImagePolicy;
use crate::core::net::{path_extension, FetchResult};
use crate::file::with_ext;

const ICO_MAGIC: [u8; 4] = [0x00, 0x00, 0x01, 0x00];

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("empty body")]
    Empty,
    #[error("textual response ({0})")]
    Textual(String),
    #[error("cannot decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Extension the payload is saved under when it is not transcoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingFormat(String);

impl WorkingFormat {
    pub fn from_url(url: &str) -> Self {
        let ext = path_extension(url)
            .filter(|e| SUPPORTED_EXTS.contains(&e.as_str()))
            .unwrap_or_else(|| s!(CANONICAL_EXT));
        Self(ext)
    }

    pub fn ext(&self) -> &str {
        &self.0
    }

    pub fn is_icon(&self) -> bool {
        self.0 == "ico"
    }
}

pub fn looks_like_ico(bytes: &[u8]) -> bool {
    bytes.starts_with(&ICO_MAGIC)
}

/// Write `resp` under `base` (a path without extension) and return the file written.
pub fn materialize(
    resp: &FetchResult,
    source_url: &str,
    base: &Path,
    policy: &ImagePolicy,
) -> Result<PathBuf, MaterializeError> {
    if !resp.is_success() {
        return Err(MaterializeError::Status(resp.status));
    }
    if resp.body.is_empty() {
        return Err(MaterializeError::Empty);
    }
    if policy.reject_textual {
        if let Some(mime) = resp.textual_type() {
            return Err(MaterializeError::Textual(mime));
        }
    }

    let format = WorkingFormat::from_url(source_url);
    if format.is_icon() || looks_like_ico(&resp.body) || policy.transcode_all {
        return transcode_png(&resp.body, base);
    }

    let path = with_ext(base, format.ext());
    fs::write(&path, &resp.body)?;
    Ok(path)
}

fn transcode_png(bytes: &[u8], base: &Path) -> Result<PathBuf, MaterializeError> {
    let decoded = image::load_from_memory(bytes)
        .or_else(|_| image::load_from_memory_with_format(bytes, ImageFormat::Ico))?;
    let path = with_ext(base, CANONICAL_EXT);
    decoded.to_rgba8().save_with_format(&path, ImageFormat::Png)?;
    Ok(path)
}
