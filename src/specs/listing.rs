// src/specs/listing.rs
//! Reader for category listing pages.
//!
//! A card is a `<div class="card …">` block. Its name is the text of the anchor in
//! the first `<h2>` (or the `<h2>` text itself), its image the first `<img>`. Lazy
//! cards keep the real URL in `data-src` and friends while `src` holds a `data:`
//! placeholder. The next page is `<a rel="next">`, or an `<li class="… next …">`
//! wrapping a link.

use url::Url;

use crate::config::consts::{
    CARD_CLASS, CARD_NAME_TAG, CARD_TAG, IMGIX_HOST, LAZY_SRC_ATTRS, NEXT_PAGE_CLASS,
};
use crate::core::html::{attr, blocks_ci, blocks_with_class, has_class, open_tags_ci, text_of};
use crate::core::net::resolve_url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingCandidate {
    pub raw_name: String,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub candidates: Vec<ListingCandidate>,
    pub next: Option<String>,
}

pub fn parse_page(doc: &str, page_url: &str) -> ListingPage {
    let candidates = blocks_with_class(doc, CARD_TAG, CARD_CLASS)
        .into_iter()
        .filter_map(|card| parse_card(card, page_url))
        .collect();
    ListingPage { candidates, next: next_page(doc, page_url) }
}

fn parse_card(card: &str, page_url: &str) -> Option<ListingCandidate> {
    let heading = blocks_ci(card, CARD_NAME_TAG).into_iter().next()?;
    let name = blocks_ci(heading, "a")
        .into_iter()
        .next()
        .map(text_of)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| text_of(heading));
    if name.is_empty() {
        return None;
    }

    let img = open_tags_ci(card, "img").into_iter().next()?;
    let image_url = image_src(img).and_then(|src| resolve_url(page_url, &src)).map(|u| prefer_png(&u));

    Some(ListingCandidate { raw_name: name, image_url })
}

fn image_src(img: &str) -> Option<String> {
    let src = attr(img, "src").filter(|s| !s.is_empty() && !s.starts_with("data:"));
    src.or_else(|| {
        LAZY_SRC_ATTRS
            .iter()
            .find_map(|a| attr(img, a).filter(|s| !s.is_empty()))
    })
}

/// imgix serves a PNG rendition when asked; an explicit `fm` is left alone.
pub fn prefer_png(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else { return s!(url) };
    let on_imgix = parsed.host_str().is_some_and(|h| h.ends_with(IMGIX_HOST));
    if !on_imgix || parsed.query_pairs().any(|(k, _)| k == "fm") {
        return s!(url);
    }
    parsed.query_pairs_mut().append_pair("fm", "png");
    parsed.to_string()
}

fn next_page(doc: &str, page_url: &str) -> Option<String> {
    let by_rel = open_tags_ci(doc, "a").into_iter().find_map(|a| {
        let rel = attr(a, "rel")?;
        rel.split_whitespace()
            .any(|r| r.eq_ignore_ascii_case("next"))
            .then(|| attr(a, "href"))
            .flatten()
    });
    let href = by_rel.or_else(|| {
        blocks_ci(doc, "li")
            .into_iter()
            .filter(|li| open_tags_ci(li, "li").first().is_some_and(|t| has_class(t, NEXT_PAGE_CLASS)))
            .find_map(|li| open_tags_ci(li, "a").into_iter().find_map(|a| attr(a, "href")))
    })?;
    resolve_url(page_url, &href)
}
