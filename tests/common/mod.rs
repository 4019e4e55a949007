// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use logo_scrape::core::net::{Fetch, FetchResult};
use logo_scrape::scrape::{ListingCandidate, ListingPage, PageSource};

/// Canned responses by exact URL; anything else is a 404. Every call is logged.
#[derive(Default)]
pub struct FakeFetch {
    routes: HashMap<String, FetchResult>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, status: u16, body: impl Into<Vec<u8>>, content_type: &str) -> Self {
        self.routes
            .insert(url.to_string(), FetchResult::new(status, body.into(), Some(content_type)));
        self
    }

    pub fn html(self, url: &str, body: &str) -> Self {
        self.route(url, 200, body, "text/html; charset=utf-8")
    }

    pub fn png(self, url: &str) -> Self {
        self.route(url, 200, png_bytes(8, 8), "image/png")
    }

    pub fn ico(self, url: &str) -> Self {
        self.route(url, 200, ico_bytes(16, 16), "image/x-icon")
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, url: &str) -> usize {
        self.calls().iter().filter(|c| *c == url).count()
    }
}

impl Fetch for FakeFetch {
    fn get(&self, url: &str) -> FetchResult {
        self.calls.lock().unwrap().push(url.to_string());
        self.routes
            .get(url)
            .cloned()
            .unwrap_or_else(|| FetchResult::new(404, Vec::new(), Some("text/html")))
    }
}

/// Listing pages by URL; unknown URLs fail to load.
#[derive(Default)]
pub struct FakePages {
    pages: HashMap<String, ListingPage>,
    pub loads: Vec<String>,
}

impl FakePages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, cards: &[(&str, Option<&str>)], next: Option<&str>) -> Self {
        let candidates = cards
            .iter()
            .map(|(name, image)| ListingCandidate {
                raw_name: name.to_string(),
                image_url: image.map(str::to_string),
            })
            .collect();
        self.pages
            .insert(url.to_string(), ListingPage { candidates, next: next.map(str::to_string) });
        self
    }
}

impl PageSource for FakePages {
    fn load(&mut self, url: &str) -> Result<ListingPage, String> {
        self.loads.push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| "HTTP 404".to_string())
    }
}

fn encode(w: u32, h: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([200, 30, 30, 128])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    encode(w, h, ImageFormat::Png)
}

pub fn ico_bytes(w: u32, h: u32) -> Vec<u8> {
    encode(w, h, ImageFormat::Ico)
}

pub fn service_url(domain: &str) -> String {
    logo_scrape::config::consts::FAVICON_SERVICE.replace("{domain}", domain)
}
