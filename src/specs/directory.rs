// src/specs/directory.rs
//! Reader for the category directory page.
//!
//! Categories are `<a class="list-group-item" href="/1234/crm/software">CRM</a>`.
//! Link text and the wanted category are compared as normalized title keys, so
//! `project-management` (from a file name) finds "Project Management". When the page
//! has no matching list-group link, any anchor with matching text is accepted.

use log::debug;

use crate::config::consts::CATEGORY_LINK_CLASS;
use crate::core::html::{attr, blocks_ci, has_class, open_tags_ci, text_of};
use crate::core::net::resolve_url;
use crate::ident::normalize_title;

pub fn find_category_url(doc: &str, page_url: &str, category: &str) -> Option<String> {
    let wanted = normalize_title(category);
    if wanted.is_empty() {
        return None;
    }

    let anchors: Vec<&str> = blocks_ci(doc, "a")
        .into_iter()
        .filter(|a| normalize_title(&text_of(a)) == wanted)
        .collect();

    if let Some(url) = anchors.iter().filter(|a| is_category_link(a)).find_map(|a| href_of(a, page_url)) {
        return Some(url);
    }
    let fallback = anchors.iter().find_map(|a| href_of(a, page_url));
    if fallback.is_some() {
        debug!("No {CATEGORY_LINK_CLASS} link for '{category}'; using a plain anchor");
    }
    fallback
}

fn href_of(block: &str, page_url: &str) -> Option<String> {
    let open = open_tags_ci(block, "a").into_iter().next()?;
    resolve_url(page_url, &attr(open, "href")?)
}

fn is_category_link(block: &str) -> bool {
    open_tags_ci(block, "a")
        .first()
        .is_some_and(|open| has_class(open, CATEGORY_LINK_CLASS))
}
