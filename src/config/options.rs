// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// How whitespace inside a title is carried into a filename.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlugStyle {
    /// `Acme Cloud CRM` → `acme-cloud-crm`
    #[default]
    Hyphenated,
    /// `Acme Cloud CRM` → `acmecloudcrm`
    Compact,
}

/// What happens when two records (or two runs) want the same filename.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Collision {
    /// Probe `-1`, `-2`, … until a free name turns up. Re-runs add files.
    #[default]
    AutoUnique,
    /// Reuse the name. Re-runs replace files.
    Overwrite,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilenamePolicy {
    pub style: SlugStyle,
    /// Append `-<category>` to titled records.
    pub with_category: bool,
    pub collision: Collision,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImagePolicy {
    /// Refuse `text/*` responses (error pages served with a 200).
    pub reject_textual: bool,
    /// Decode every payload and write PNG. Undecodable payloads fail the attempt.
    pub transcode_all: bool,
}

impl ImagePolicy {
    pub fn strict() -> Self {
        Self { reject_textual: true, transcode_all: true }
    }
}

/// Where the catalog matcher starts, if it runs at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListingEntry {
    /// Cascade only: every record goes straight to the fallback chain.
    #[default]
    None,
    /// First page of a category listing.
    Url(String),
    /// Look the category up by its link text on a directory page.
    Directory { url: String, category: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub out_dir: PathBuf,
    pub naming: FilenamePolicy,
    pub image: ImagePolicy,
    /// Favicon-by-domain URL templates, tried in order as the last cascade step.
    pub services: Vec<String>,
    pub listing: ListingEntry,
    pub max_pages: Option<usize>,
    pub workers: usize,
    pub timeout: Duration,
    pub report: Option<PathBuf>,
    /// Catalog column holding the homepage. `None` → first of `HOMEPAGE_COLUMNS`.
    pub homepage_column: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_SUBDIR),
            naming: FilenamePolicy::default(),
            image: ImagePolicy::default(),
            services: vec![s!(FAVICON_SERVICE)],
            listing: ListingEntry::None,
            max_pages: None,
            workers: WORKERS,
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            report: None,
            homepage_column: None,
        }
    }
}

impl RunOptions {
    /// Worker count clamped to `1..=MAX_WORKERS`.
    pub fn worker_count(&self) -> usize {
        self.workers.clamp(1, MAX_WORKERS)
    }
}
