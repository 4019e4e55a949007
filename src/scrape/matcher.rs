// src/scrape/matcher.rs
//! Page-by-page listing scan against the pending set.
//!
//! Scanning stops when the pending set is empty, when a page has no next link, when
//! the next link points at a page already seen, or at the page cap. A first page that
//! cannot be loaded is a run-level error; a later one just ends the scan.

use std::collections::HashSet;

use log::{info, warn};

use crate::core::net::Fetch;
use crate::error::{Error, Result};
use crate::ident::normalize_title;
use crate::naming::OutputDir;
use crate::progress::Progress;

use super::{resolve_record, Cascade, Disposition, PageSource, PendingSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanEnd {
    AllResolved,
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanSummary {
    pub end: ScanEnd,
    pub pages: usize,
}

pub struct Matcher<'m, F: Fetch> {
    cascade: &'m Cascade<'m, F>,
    out: &'m OutputDir,
    max_pages: Option<usize>,
}

impl<'m, F: Fetch> Matcher<'m, F> {
    pub fn new(cascade: &'m Cascade<'m, F>, out: &'m OutputDir, max_pages: Option<usize>) -> Self {
        Self { cascade, out, max_pages }
    }

    /// Scan from `first_url`, resolving every matched record on the spot. Dispositions
    /// are appended to `sink` in match order.
    pub fn scan(
        &self,
        source: &mut dyn PageSource,
        first_url: &str,
        pending: &mut PendingSet,
        mut progress: Option<&mut dyn Progress>,
        sink: &mut Vec<Disposition>,
    ) -> Result<ScanSummary> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut url = s!(first_url);
        let mut pages = 0usize;

        while !pending.is_empty() {
            if self.max_pages.is_some_and(|cap| pages >= cap) {
                info!("Page cap of {pages} reached");
                break;
            }
            if !visited.insert(url.clone()) {
                warn!("Listing page {url} already scanned; stopping");
                break;
            }

            let page = match source.load(&url) {
                Ok(page) => page,
                Err(reason) if pages == 0 => return Err(Error::ListingUnavailable { url, reason }),
                Err(reason) => {
                    warn!("Listing page {url}: {reason}; ending scan");
                    break;
                }
            };
            pages += 1;
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!(
                    "Page {pages}: {} cards, {} records pending",
                    page.candidates.len(),
                    pending.len()
                ));
            }

            for candidate in page.candidates {
                if pending.is_empty() {
                    break;
                }
                let name = normalize_title(&candidate.raw_name);
                let Some((_, record)) = pending.take_match(&name) else { continue };
                let disposition = resolve_record(self.cascade, self.out, record, candidate.image_url.as_deref());
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&disposition);
                }
                sink.push(disposition);
            }

            match page.next {
                Some(next) => url = next,
                None => break,
            }
        }

        let end = if pending.is_empty() { ScanEnd::AllResolved } else { ScanEnd::Exhausted };
        Ok(ScanSummary { end, pages })
    }
}
