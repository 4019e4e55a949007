// src/lib.rs
//! Catalog logo resolver: match catalog titles against a paginated directory
//! listing, save the listing's logo image, and fall back to a per-domain favicon
//! cascade for everything the listing does not cover.

#[macro_use]
pub mod macros;

pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod file;
pub mod ident;
pub mod log;
pub mod materialize;
pub mod naming;
pub mod progress;
pub mod report;
pub mod runner;
pub mod scrape;
pub mod specs;

pub use error::{Error, Result};
