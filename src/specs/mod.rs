// src/specs/mod.rs
//! # Page readers
//!
//! Each reader knows where the interesting bits live in one kind of page and pulls
//! them out of raw markup with the `core::html` helpers. Readers are pure: they take
//! the document text plus the URL it came from (for resolving relative links) and
//! return plain data. Fetching, matching and saving happen elsewhere.
//!
//! ## Current readers
//! - `listing` – category listing pages: one `(name, image URL)` candidate per card,
//!   plus the next-page link.
//! - `directory` – the category directory: category link text → listing URL.
//! - `site` – a product homepage: logo `<img>` sources and `<link rel=icon>` hrefs.
//!
//! ## Conventions
//! - Case-insensitive tag and attribute lookup; attribute order and quoting do not
//!   matter.
//! - Missing pieces are skipped, never errors. A card without a name or an image
//!   is simply not a candidate.
//! - Only `http(s)` URLs come out, already resolved against the page URL.
//! - Keep logs for precedence decisions (e.g. "no list-group link, falling back to
//!   any anchor"), not for every skipped element.
//!
//! Readers are tested offline against small inline fixtures.
pub mod directory;
pub mod listing;
pub mod site;
