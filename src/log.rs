// src/log.rs
// Console logging setup and run-clock helpers.
// Library code logs through the `log` facade; only the CLI installs a backend.

use std::sync::OnceLock;
use std::time::Instant;

static START: OnceLock<Instant> = OnceLock::new();

/// Instant the run clock started. The first call pins it.
pub fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

/// Time since `start()` as `HH:MM:SS.mmm`.
pub fn elapsed() -> String {
    fmt_elapsed(start().elapsed().as_millis())
}

pub fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Install the colored console logger at `level` and start the run clock.
#[cfg(feature = "cli")]
pub fn init(level: ::log::LevelFilter) {
    let mut builder = colog::default_builder();
    builder.filter(None, level);
    // ureq narrates every connection at debug.
    builder.filter(Some("ureq"), ::log::LevelFilter::Warn);
    builder.init();
    start();
}
