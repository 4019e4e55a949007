// src/scrape/mod.rs
//! Resolution engine: the listing matcher, the pending set it drains and the fallback
//! cascade both phases end in.
pub mod cascade;
pub mod matcher;
pub mod pending;
pub mod source;

use std::path::{Path, PathBuf};

use crate::catalog::CatalogRecord;
use crate::core::net::Fetch;
use crate::naming::OutputDir;

pub use cascade::{Cascade, Resolved, SourceKind, CASCADE};
pub use matcher::{Matcher, ScanEnd, ScanSummary};
pub use pending::PendingSet;
pub use source::{HttpListing, ListingCandidate, ListingPage, PageSource};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub record: CatalogRecord,
    pub kind: SourceKind,
    pub path: PathBuf,
}

/// Final outcome for one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disposition {
    Resolved(ResolvedAsset),
    NotFound { record: CatalogRecord, domain: Option<String> },
}

impl Disposition {
    pub fn record(&self) -> &CatalogRecord {
        match self {
            Disposition::Resolved(asset) => &asset.record,
            Disposition::NotFound { record, .. } => record,
        }
    }

    pub fn kind(&self) -> Option<SourceKind> {
        match self {
            Disposition::Resolved(asset) => Some(asset.kind),
            Disposition::NotFound { .. } => None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Disposition::Resolved(asset) => Some(&asset.path),
            Disposition::NotFound { .. } => None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind().map_or("not-found", SourceKind::label)
    }
}

/// Resolve one record that has left the pending set: the listing image first when
/// there is one, then the cascade on the record's own homepage domain.
pub fn resolve_record<F: Fetch>(
    cascade: &Cascade<'_, F>,
    out: &OutputDir,
    record: CatalogRecord,
    listing_image: Option<&str>,
) -> Disposition {
    let domain = record.domain();
    if listing_image.is_none() && domain.is_none() {
        return Disposition::NotFound { record, domain };
    }

    let base = out.base_for(&record, domain.as_deref());
    if let Some(url) = listing_image {
        if let Some(path) = cascade.try_url(url, &base) {
            return Disposition::Resolved(ResolvedAsset { record, kind: SourceKind::Listing, path });
        }
    }
    match domain.as_deref().and_then(|d| cascade.resolve(d, &base)) {
        Some(Resolved { kind, path }) => Disposition::Resolved(ResolvedAsset { record, kind, path }),
        None => {
            out.release(&base);
            Disposition::NotFound { record, domain }
        }
    }
}
