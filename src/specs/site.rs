// src/specs/site.rs
//! Reader for a product's homepage.

use crate::config::consts::{ICON_MARKER, LOGO_MARKER};
use crate::core::html::{attr, open_tags_ci};
use crate::core::net::resolve_url;

/// `<img>` sources whose `alt`, `class` or `id` mentions "logo", in that order of
/// precedence: every alt hit comes before any class hit. Resolved, deduplicated.
pub fn logo_image_urls(doc: &str, homepage: &str) -> Vec<String> {
    let imgs = open_tags_ci(doc, "img");
    let mut out: Vec<String> = Vec::new();
    for key in ["alt", "class", "id"] {
        for img in &imgs {
            let marked = attr(img, key).is_some_and(|v| v.to_ascii_lowercase().contains(LOGO_MARKER));
            if !marked {
                continue;
            }
            let Some(url) = attr(img, "src").and_then(|src| resolve_url(homepage, &src)) else { continue };
            if !out.contains(&url) {
                out.push(url);
            }
        }
    }
    out
}

/// `<link>` hrefs whose `rel` mentions "icon" (`icon`, `shortcut icon`,
/// `apple-touch-icon`), in document order.
pub fn icon_link_urls(doc: &str, homepage: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for link in open_tags_ci(doc, "link") {
        let is_icon = attr(link, "rel").is_some_and(|rel| {
            let words: Vec<&str> = rel.split_whitespace().collect();
            words.join(" ").to_ascii_lowercase().contains(ICON_MARKER)
        });
        if !is_icon {
            continue;
        }
        if let Some(url) = attr(link, "href").and_then(|href| resolve_url(homepage, &href)) {
            if !out.contains(&url) {
                out.push(url);
            }
        }
    }
    out
}
