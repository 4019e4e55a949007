// src/runner.rs
//! Resolution driver.
//!
//! 1. Seed the pending set from the catalog.
//! 2. Find the first listing page (given, looked up on the directory, or none).
//! 3. Scan listing pages until the pending set is empty or the pages run out.
//! 4. Run the cascade over whatever is left, optionally on a worker pool.
//! 5. Count dispositions and write the report.
//!
//! Nothing here is global: counts come back in `RunReport`.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use log::info;

use crate::catalog::{Catalog, CatalogRecord};
use crate::config::options::{ListingEntry, RunOptions};
use crate::core::net::Fetch;
use crate::error::{Error, Result};
use crate::naming::OutputDir;
use crate::progress::Progress;
use crate::report::write_report;
use crate::scrape::{
    resolve_record, Cascade, Disposition, HttpListing, Matcher, PageSource, PendingSet, ScanEnd,
    SourceKind,
};
use crate::specs::directory::find_category_url;

/// Disposition counts for one run. After `run`, `total` is every catalog record seen:
/// the resolved kinds, `not_found` and `superseded` add up to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub listing: usize,
    pub site_logo: usize,
    pub html_favicon: usize,
    pub well_known_favicon: usize,
    pub favicon_service: usize,
    pub not_found: usize,
    /// Dropped because a later catalog record had the same normalized title.
    pub superseded: usize,
}

impl Tally {
    pub fn from_dispositions(dispositions: &[Disposition]) -> Self {
        let mut tally = Tally::default();
        for d in dispositions {
            tally.record(d);
        }
        tally
    }

    pub fn record(&mut self, disposition: &Disposition) {
        self.total += 1;
        match disposition.kind() {
            Some(SourceKind::Listing) => self.listing += 1,
            Some(SourceKind::SiteLogo) => self.site_logo += 1,
            Some(SourceKind::HtmlFavicon) => self.html_favicon += 1,
            Some(SourceKind::WellKnownFavicon) => self.well_known_favicon += 1,
            Some(SourceKind::FaviconService) => self.favicon_service += 1,
            None => self.not_found += 1,
        }
    }

    pub fn count(&self, kind: SourceKind) -> usize {
        match kind {
            SourceKind::Listing => self.listing,
            SourceKind::SiteLogo => self.site_logo,
            SourceKind::HtmlFavicon => self.html_favicon,
            SourceKind::WellKnownFavicon => self.well_known_favicon,
            SourceKind::FaviconService => self.favicon_service,
        }
    }

    pub fn resolved(&self) -> usize {
        self.listing + self.site_logo + self.html_favicon + self.well_known_favicon + self.favicon_service
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub tally: Tally,
    /// One per catalog record except superseded duplicates: listing matches in match
    /// order, then the rest in catalog order.
    pub dispositions: Vec<Disposition>,
    pub pending_remaining: usize,
    pub pages_scanned: usize,
    pub scan_end: Option<ScanEnd>,
    pub out_dir: PathBuf,
}

/// Run the whole resolution over `catalog`. `source` replaces the default
/// `HttpListing` page source; `progress` receives per-record updates.
pub fn run<F: Fetch>(
    opts: &RunOptions,
    catalog: &Catalog,
    fetch: &F,
    source: Option<&mut dyn PageSource>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunReport> {
    let out = OutputDir::create(&opts.out_dir, opts.naming)?;
    let cascade = Cascade::new(fetch, opts.image, opts.services.clone());

    if let Some(p) = progress.as_deref_mut() {
        p.begin(catalog.len());
    }

    let (mut pending, unkeyed) = PendingSet::seed(catalog.records.iter().cloned());
    for (pos, record) in pending.superseded() {
        info!("Row {}: '{}' superseded by a later record with the same title", pos + 1, record.label());
    }
    let mut dispositions: Vec<Disposition> = Vec::with_capacity(catalog.len());
    let mut pages_scanned = 0;
    let mut scan_end = None;

    if let Some(first_url) = first_listing_url(&opts.listing, fetch)? {
        info!("Matching {} records against {first_url}", pending.len());
        let mut http = HttpListing::new(fetch);
        let source: &mut dyn PageSource = match source {
            Some(s) => s,
            None => &mut http,
        };
        let matcher = Matcher::new(&cascade, &out, opts.max_pages);
        let summary = matcher.scan(
            source,
            &first_url,
            &mut pending,
            progress.as_mut().map(|p| &mut **p as &mut dyn Progress),
            &mut dispositions,
        )?;
        pages_scanned = summary.pages;
        scan_end = Some(summary.end);
    }

    let mut leftovers = pending.drain();
    leftovers.extend(unkeyed);
    leftovers.sort_by_key(|(pos, _)| *pos);
    let leftovers: Vec<CatalogRecord> = leftovers.into_iter().map(|(_, r)| r).collect();
    if !leftovers.is_empty() {
        info!("Fallback cascade for {} records", leftovers.len());
    }
    resolve_leftovers(
        &cascade,
        &out,
        leftovers,
        opts.worker_count(),
        progress.as_mut().map(|p| &mut **p as &mut dyn Progress),
        &mut dispositions,
    );

    let mut tally = Tally::from_dispositions(&dispositions);
    tally.superseded = pending.superseded().len();
    tally.total = catalog.len();
    if let Some(path) = &opts.report {
        write_report(path, &dispositions)?;
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish(&tally);
    }

    Ok(RunReport {
        tally,
        dispositions,
        pending_remaining: pending.len(),
        pages_scanned,
        scan_end,
        out_dir: out.path().to_path_buf(),
    })
}

fn first_listing_url<F: Fetch>(entry: &ListingEntry, fetch: &F) -> Result<Option<String>> {
    match entry {
        ListingEntry::None => Ok(None),
        ListingEntry::Url(url) => Ok(Some(url.clone())),
        ListingEntry::Directory { url, category } => {
            let resp = fetch.get(url);
            if !resp.is_success() {
                return Err(Error::ListingUnavailable {
                    url: url.clone(),
                    reason: format!("directory page returned status {}", resp.status),
                });
            }
            let found = find_category_url(&resp.text(), url, category)
                .ok_or_else(|| Error::CategoryNotFound(category.clone()))?;
            info!("Category '{category}' → {found}");
            Ok(Some(found))
        }
    }
}

/// Cascade every leftover record. With more than one worker the records are pulled
/// off a shared index by scoped threads; results are put back in input order.
fn resolve_leftovers<F: Fetch>(
    cascade: &Cascade<'_, F>,
    out: &OutputDir,
    records: Vec<CatalogRecord>,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
    sink: &mut Vec<Disposition>,
) {
    if workers <= 1 || records.len() <= 1 {
        for record in records {
            let disposition = resolve_record(cascade, out, record, None);
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(&disposition);
            }
            sink.push(disposition);
        }
        return;
    }

    let workers = workers.min(records.len());
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, Disposition)>();
    let mut done: Vec<(usize, Disposition)> = Vec::with_capacity(records.len());

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            let records = &records;
            scope.spawn(move || loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                let Some(record) = records.get(i) else { break };
                let disposition = resolve_record(cascade, out, record.clone(), None);
                if tx.send((i, disposition)).is_err() {
                    break;
                }
            });
        }
        drop(tx); // collector is the only receiver now

        for (i, disposition) in rx {
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(&disposition);
            }
            done.push((i, disposition));
        }
    });

    done.sort_by_key(|(i, _)| *i);
    sink.extend(done.into_iter().map(|(_, d)| d));
}
