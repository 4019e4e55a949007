// src/error.rs
//! Run-level failures.
//!
//! Only input problems abort a run: an unreadable catalog, a catalog without the
//! columns we key on, an unusable output directory, or a listing entry point that
//! cannot be reached. Everything that goes wrong for a single record is recovered
//! locally (next cascade step, skipped card) and never shows up here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("catalog has neither a `Title` nor a homepage column (found: {found})")]
    CatalogColumns { found: String },

    #[error("output directory {path} is not usable: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("category `{0}` not found on the directory page")]
    CategoryNotFound(String),

    #[error("listing page {url} unavailable: {reason}")]
    ListingUnavailable { url: String, reason: String },

    #[error("cannot write report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
