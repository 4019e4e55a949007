// src/core/net.rs
// Blocking HTTP GET with bounded timeouts.
// Nothing here returns an error: a transport failure is a response with status 0,
// and callers treat it exactly like any other non-success status.

use std::io::Read;
use std::time::Duration;

use log::debug;
use url::Url;

use crate::config::consts::{ACCEPT, CONNECT_TIMEOUT_SECS, MAX_BODY_BYTES, USER_AGENT};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchResult {
    /// HTTP status after redirects; 0 when no response arrived.
    pub status: u16,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchResult {
    pub fn new(status: u16, body: Vec<u8>, content_type: Option<&str>) -> Self {
        Self { status, body, content_type: content_type.map(str::to_owned) }
    }

    /// No response at all (connect error, timeout, TLS failure, unreadable body).
    pub fn failed() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Declared media type when it is `text/*`, lower-cased and without parameters.
    pub fn textual_type(&self) -> Option<String> {
        let ct = self.content_type.as_deref()?;
        let mime = ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase();
        mime.starts_with("text/").then_some(mime)
    }
}

/// The one network seam. Implementations must never panic on bad input and must
/// surface every failure as a non-success `FetchResult`.
pub trait Fetch: Sync {
    fn get(&self, url: &str) -> FetchResult;
}

pub struct HttpFetch {
    agent: ureq::Agent,
}

impl HttpFetch {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .timeout_read(timeout)
            .timeout_write(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Fetch for HttpFetch {
    fn get(&self, url: &str) -> FetchResult {
        match self.agent.get(url).set("Accept", ACCEPT).call() {
            Ok(resp) => read_body(url, resp),
            Err(ureq::Error::Status(code, resp)) => {
                debug!("GET {url}: HTTP {code}");
                FetchResult::new(code, Vec::new(), resp.header("Content-Type"))
            }
            Err(e) => {
                debug!("GET {url}: {e}");
                FetchResult::failed()
            }
        }
    }
}

fn read_body(url: &str, resp: ureq::Response) -> FetchResult {
    let status = resp.status();
    let content_type = resp.header("Content-Type").map(str::to_owned);
    let mut body = Vec::new();
    if let Err(e) = resp.into_reader().take(MAX_BODY_BYTES).read_to_end(&mut body) {
        debug!("GET {url}: body read failed: {e}");
        return FetchResult::failed();
    }
    FetchResult { status, body, content_type }
}

/// Resolve `href` against `base` (or take it as-is when absolute). Only http(s)
/// targets come back; `data:`, `javascript:` and `mailto:` links are dropped.
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let resolved = match Url::parse(href) {
        Ok(abs) => abs,
        Err(_) => Url::parse(base).ok()?.join(href).ok()?,
    };
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// Lower-cased extension of the URL's path, if any (`/img/Logo.PNG?v=2` → `png`).
pub fn path_extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last = parsed.path_segments()?.last()?;
    let (_, ext) = last.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
}
