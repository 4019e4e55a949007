// src/scrape/source.rs
//! Where listing pages come from.
//!
//! The matcher only needs "page URL in, candidates + next link out". `HttpListing`
//! does that with a plain GET and the listing reader; pages that only render their
//! cards client-side need a different `PageSource` (and tests use a canned one).

use crate::core::net::Fetch;
use crate::specs::listing::parse_page;

pub use crate::specs::listing::{ListingCandidate, ListingPage};

pub trait PageSource {
    /// One listing page, or a short reason why it could not be read.
    fn load(&mut self, url: &str) -> Result<ListingPage, String>;
}

pub struct HttpListing<'f, F: Fetch> {
    fetch: &'f F,
}

impl<'f, F: Fetch> HttpListing<'f, F> {
    pub fn new(fetch: &'f F) -> Self {
        Self { fetch }
    }
}

impl<F: Fetch> PageSource for HttpListing<'_, F> {
    fn load(&mut self, url: &str) -> Result<ListingPage, String> {
        let resp = self.fetch.get(url);
        if !resp.is_success() {
            return Err(match resp.status {
                0 => s!("no response"),
                code => format!("HTTP {code}"),
            });
        }
        Ok(parse_page(&resp.text(), url))
    }
}
