// src/scrape/cascade.rs
//! Ordered fallback strategies for one domain.
//!
//! Each strategy only proposes image URLs; the cascade fetches and materializes them
//! in order and stops at the first file written. The homepage is fetched at most
//! once, and only when a markup-reading step runs. A failed homepage leaves those
//! steps with nothing to propose; the URL-only steps still run.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::consts::{DOMAIN_PLACEHOLDER, WELL_KNOWN_FAVICON};
use crate::config::options::ImagePolicy;
use crate::core::net::Fetch;
use crate::materialize::materialize;
use crate::specs::site::{icon_link_urls, logo_image_urls};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Listing,
    SiteLogo,
    HtmlFavicon,
    WellKnownFavicon,
    FaviconService,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Listing => "listing",
            SourceKind::SiteLogo => "site-logo",
            SourceKind::HtmlFavicon => "html-favicon",
            SourceKind::WellKnownFavicon => "well-known-favicon",
            SourceKind::FaviconService => "favicon-service",
        }
    }
}

/// Fallback order after the listing image.
pub const CASCADE: [SourceKind; 4] = [
    SourceKind::SiteLogo,
    SourceKind::HtmlFavicon,
    SourceKind::WellKnownFavicon,
    SourceKind::FaviconService,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub kind: SourceKind,
    pub path: PathBuf,
}

/// What the strategies see for one domain.
struct Context<'c, F: Fetch> {
    fetch: &'c F,
    domain: &'c str,
    homepage: String,
    services: &'c [String],
    markup: OnceCell<Option<String>>,
}

impl<'c, F: Fetch> Context<'c, F> {
    fn new(fetch: &'c F, domain: &'c str, services: &'c [String]) -> Self {
        Self { fetch, domain, homepage: join!("https://", domain), services, markup: OnceCell::new() }
    }

    fn markup(&self) -> Option<&str> {
        self.markup
            .get_or_init(|| {
                let resp = self.fetch.get(&self.homepage);
                if resp.is_success() {
                    Some(resp.text())
                } else {
                    debug!("{}: homepage unavailable (status {}), skipping markup steps", self.domain, resp.status);
                    None
                }
            })
            .as_deref()
    }
}

fn site_logo<F: Fetch>(ctx: &Context<'_, F>) -> Vec<String> {
    ctx.markup().map(|doc| logo_image_urls(doc, &ctx.homepage)).unwrap_or_default()
}

fn html_favicon<F: Fetch>(ctx: &Context<'_, F>) -> Vec<String> {
    ctx.markup().map(|doc| icon_link_urls(doc, &ctx.homepage)).unwrap_or_default()
}

fn well_known_favicon<F: Fetch>(ctx: &Context<'_, F>) -> Vec<String> {
    vec![format!("https://{}/{WELL_KNOWN_FAVICON}", ctx.domain)]
}

fn favicon_service<F: Fetch>(ctx: &Context<'_, F>) -> Vec<String> {
    ctx.services
        .iter()
        .map(|template| template.replace(DOMAIN_PLACEHOLDER, ctx.domain))
        .collect()
}

fn proposals<F: Fetch>(kind: SourceKind, ctx: &Context<'_, F>) -> Vec<String> {
    match kind {
        SourceKind::SiteLogo => site_logo(ctx),
        SourceKind::HtmlFavicon => html_favicon(ctx),
        SourceKind::WellKnownFavicon => well_known_favicon(ctx),
        SourceKind::FaviconService => favicon_service(ctx),
        SourceKind::Listing => Vec::new(),
    }
}

pub struct Cascade<'a, F: Fetch> {
    fetch: &'a F,
    image: ImagePolicy,
    services: Vec<String>,
    steps: Vec<SourceKind>,
}

impl<'a, F: Fetch> Cascade<'a, F> {
    pub fn new(fetch: &'a F, image: ImagePolicy, services: Vec<String>) -> Self {
        Self { fetch, image, services, steps: CASCADE.to_vec() }
    }

    /// Restrict or reorder the steps.
    pub fn with_steps(mut self, steps: &[SourceKind]) -> Self {
        self.steps = steps.to_vec();
        self
    }

    /// Run the steps for `domain`, writing under `base`. `None` when every step came up
    /// empty.
    pub fn resolve(&self, domain: &str, base: &Path) -> Option<Resolved> {
        let ctx = Context::new(self.fetch, domain, &self.services);
        for &kind in &self.steps {
            for url in proposals(kind, &ctx) {
                if let Some(path) = self.try_url(&url, base) {
                    debug!("{domain}: {} via {url}", kind.label());
                    return Some(Resolved { kind, path });
                }
            }
        }
        debug!("{domain}: cascade exhausted");
        None
    }

    /// Fetch one image URL and write it under `base`.
    pub fn try_url(&self, url: &str, base: &Path) -> Option<PathBuf> {
        let resp = self.fetch.get(url);
        match materialize(&resp, url, base, &self.image) {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("{url}: {e}");
                None
            }
        }
    }
}
