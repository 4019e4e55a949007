// src/naming.rs
//! Output filenames.
//!
//! One `FilenamePolicy` is active per run and applies to listing saves and cascade
//! saves alike. Under `Collision::AutoUnique` a stem is taken when a file with that
//! stem and any supported image extension exists on disk, or when another record of
//! this run already reserved it; the next free `stem-N` is used instead.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::catalog::CatalogRecord;
use crate::config::consts::{CANONICAL_EXT, FALLBACK_STEM, SUPPORTED_EXTS};
use crate::config::options::{Collision, FilenamePolicy, SlugStyle};
use crate::error::{Error, Result};
use crate::file::{ensure_directory, with_ext};

/// Keep ASCII alphanumerics, `-` and `_`, lower-cased. Whitespace runs become a
/// single `-` (`Hyphenated`) or vanish (`Compact`); everything else is dropped.
pub fn safe_slug(text: &str, style: SlugStyle) -> String {
    let mut out = String::with_capacity(text.len());
    let mut gap = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            gap = true;
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            if gap && style == SlugStyle::Hyphenated && !out.is_empty() {
                out.push('-');
            }
            out.push(ch);
            gap = false;
        }
    }
    out
}

/// File stem for a record: title slug (plus category under `with_category`), else
/// the domain with dots as dashes, else `logo`.
pub fn record_stem(record: &CatalogRecord, domain: Option<&str>, policy: &FilenamePolicy) -> String {
    let title = safe_slug(&record.title, policy.style);
    if !title.is_empty() {
        let category = safe_slug(&record.category, policy.style);
        if policy.with_category && !category.is_empty() {
            return join!(&title, "-", &category);
        }
        return title;
    }
    domain
        .map(|d| safe_slug(&d.replace('.', "-"), policy.style))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| s!(FALLBACK_STEM))
}

fn numbered(stem: &str, n: usize) -> String {
    if n == 0 { s!(stem) } else { format!("{stem}-{n}") }
}

fn stem_occupied(dir: &Path, stem: &str) -> bool {
    SUPPORTED_EXTS
        .iter()
        .any(|ext| with_ext(&dir.join(stem), ext).exists())
}

fn first_free(dir: &Path, stem: &str, taken: impl Fn(&str) -> bool) -> String {
    (0..)
        .map(|n| numbered(stem, n))
        .find(|candidate| !taken(candidate) && !stem_occupied(dir, candidate))
        .unwrap_or_else(|| s!(stem))
}

/// `dir/stem.png` when free, else `dir/stem-1.png`, `dir/stem-2.png`, … Stems for
/// which `reserved` returns true count as occupied too.
pub fn unique_output_path(dir: &Path, stem: &str, reserved: impl Fn(&str) -> bool) -> PathBuf {
    let free = first_free(dir, stem, reserved);
    with_ext(&dir.join(free), CANONICAL_EXT)
}

/// The flat output directory plus this run's reservations.
pub struct OutputDir {
    dir: PathBuf,
    policy: FilenamePolicy,
    claimed: Mutex<HashSet<String>>,
}

impl OutputDir {
    pub fn create(dir: impl Into<PathBuf>, policy: FilenamePolicy) -> Result<Self> {
        let dir = dir.into();
        ensure_directory(&dir).map_err(|source| Error::OutputDir { path: dir.clone(), source })?;
        Ok(Self { dir, policy, claimed: Mutex::new(HashSet::new()) })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn policy(&self) -> FilenamePolicy {
        self.policy
    }

    /// Base path (no extension) for `stem`. The materializer adds the extension.
    pub fn reserve(&self, stem: &str) -> PathBuf {
        match self.policy.collision {
            Collision::Overwrite => self.dir.join(stem),
            Collision::AutoUnique => {
                let mut claimed = self.claimed.lock().unwrap_or_else(PoisonError::into_inner);
                let base = unique_output_path(&self.dir, stem, |c| claimed.contains(c)).with_extension("");
                if let Some(free) = base.file_name().and_then(|n| n.to_str()) {
                    claimed.insert(s!(free));
                }
                base
            }
        }
    }

    pub fn base_for(&self, record: &CatalogRecord, domain: Option<&str>) -> PathBuf {
        self.reserve(&record_stem(record, domain, &self.policy))
    }

    /// Give back a reservation that never got a file.
    pub fn release(&self, base: &Path) {
        if let Some(stem) = base.file_name().and_then(|n| n.to_str()) {
            self.claimed.lock().unwrap_or_else(PoisonError::into_inner).remove(stem);
        }
    }
}
