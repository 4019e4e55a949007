// src/ident.rs
//! Comparison keys and canonical domains.
//!
//! Titles from the catalog and names scraped from listing cards never agree on
//! punctuation, casing or branding suffixes, so both sides are reduced to a key of
//! `[a-z0-9 ]` before comparing. Matching is plain containment in either direction:
//! `"acme"` matches `"acme software"`, at the price of short keys matching a lot.
//!
//! Homepage cells are messy too (`"(old) https://acme.com"`, `[www.acme.com]`);
//! `extract_domain` reduces them to a lower-cased host without a leading `www.`.

use url::Url;

use crate::core::sanitize::{normalize_ws, strip_enclosed, strip_quoting};

/// Lower-case, keep only `[a-z0-9 ]`, collapse runs of spaces, trim. Total: any
/// input (including empty) yields a key, possibly empty.
pub fn normalize_title(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | ' '))
        .collect();
    normalize_ws(&kept)
}

/// True when either key contains the other.
pub fn titles_match(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Canonical domain of a raw homepage cell, or `None` when no dotted host comes out.
pub fn extract_domain(raw: &str) -> Option<String> {
    let cleaned = strip_quoting(&strip_enclosed(raw, '(', ')'));
    let token = cleaned.split_whitespace().next()?;

    let with_scheme = if token.contains("://") {
        s!(token)
    } else {
        join!("https://", token)
    };
    let parsed = Url::parse(&with_scheme).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).trim_end_matches('.');

    host.contains('.').then(|| s!(host))
}
