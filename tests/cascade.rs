// tests/cascade.rs
mod common;

use std::path::Path;

use logo_scrape::catalog::CatalogRecord;
use logo_scrape::config::options::{FilenamePolicy, ImagePolicy};
use logo_scrape::naming::OutputDir;
use logo_scrape::scrape::{resolve_record, Cascade, Disposition, SourceKind};

use common::{service_url, FakeFetch};

const HOME: &str = "https://acme.com";

fn cascade(fetch: &FakeFetch) -> Cascade<'_, FakeFetch> {
    Cascade::new(fetch, ImagePolicy::default(), vec![service_url("{domain}")])
}

fn base(dir: &Path) -> std::path::PathBuf {
    dir.join("acme")
}

#[test]
fn site_logo_stops_the_cascade() {
    let tmp = tempfile::tempdir().unwrap();
    let fetch = FakeFetch::new()
        .html(HOME, r#"<header><img src="/img/brand.png" alt="Acme logo"></header>"#)
        .png("https://acme.com/img/brand.png")
        .ico("https://acme.com/favicon.ico")
        .png(&service_url("acme.com"));

    let resolved = cascade(&fetch).resolve("acme.com", &base(tmp.path())).unwrap();
    assert_eq!(resolved.kind, SourceKind::SiteLogo);
    assert_eq!(resolved.path, tmp.path().join("acme.png"));
    assert!(resolved.path.is_file());
    assert_eq!(fetch.calls(), vec![HOME, "https://acme.com/img/brand.png"]);
}

#[test]
fn html_favicon_reuses_the_homepage() {
    let tmp = tempfile::tempdir().unwrap();
    let fetch = FakeFetch::new()
        .html(HOME, r#"<head><link rel="shortcut icon" href="/static/fav.ico"></head>"#)
        .ico("https://acme.com/static/fav.ico");

    let resolved = cascade(&fetch).resolve("acme.com", &base(tmp.path())).unwrap();
    assert_eq!(resolved.kind, SourceKind::HtmlFavicon);
    assert_eq!(resolved.path, tmp.path().join("acme.png"));
    assert_eq!(fetch.calls(), vec![HOME, "https://acme.com/static/fav.ico"]);
}

#[test]
fn failing_candidates_fall_through_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let fetch = FakeFetch::new()
        .html(
            HOME,
            r#"<link rel="icon" href="/missing.png"><img class="logo" src="/gone.svg">"#,
        )
        .ico("https://acme.com/favicon.ico");

    let resolved = cascade(&fetch).resolve("acme.com", &base(tmp.path())).unwrap();
    assert_eq!(resolved.kind, SourceKind::WellKnownFavicon);
    assert_eq!(
        fetch.calls(),
        vec![HOME, "https://acme.com/gone.svg", "https://acme.com/missing.png", "https://acme.com/favicon.ico"]
    );
    assert_eq!(fetch.count(HOME), 1);
}

#[test]
fn exhaustion_skips_markup_steps_when_homepage_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let fetch = FakeFetch::new().route(HOME, 503, "down", "text/plain");

    assert_eq!(cascade(&fetch).resolve("acme.com", &base(tmp.path())), None);

    let attempts: Vec<String> = fetch.calls().into_iter().filter(|c| c != HOME).collect();
    assert_eq!(attempts, vec!["https://acme.com/favicon.ico".to_string(), service_url("acme.com")]);
    assert_eq!(fetch.count(HOME), 1);
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn services_are_tried_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let second = "https://icons.example.net/ip3/acme.com.ico";
    let fetch = FakeFetch::new().ico(second);
    let cascade = Cascade::new(
        &fetch,
        ImagePolicy::default(),
        vec![service_url("{domain}"), "https://icons.example.net/ip3/{domain}.ico".to_string()],
    );

    let resolved = cascade.resolve("acme.com", &base(tmp.path())).unwrap();
    assert_eq!(resolved.kind, SourceKind::FaviconService);
    assert_eq!(fetch.calls().last().map(String::as_str), Some(second));
    assert_eq!(fetch.count(&service_url("acme.com")), 1);
}

#[test]
fn strict_policy_refuses_textual_payloads() {
    let home = r#"<img id="logo" src="/logo.png">"#;
    let soft_404 = "<html><body>Page not found</body></html>";

    let lenient_dir = tempfile::tempdir().unwrap();
    let fetch = FakeFetch::new()
        .html(HOME, home)
        .route("https://acme.com/logo.png", 200, soft_404, "text/html")
        .png(&service_url("acme.com"));
    let lenient = cascade(&fetch).resolve("acme.com", &base(lenient_dir.path())).unwrap();
    assert_eq!(lenient.kind, SourceKind::SiteLogo);

    let strict_dir = tempfile::tempdir().unwrap();
    let fetch = FakeFetch::new()
        .html(HOME, home)
        .route("https://acme.com/logo.png", 200, soft_404, "text/html")
        .png(&service_url("acme.com"));
    let strict = Cascade::new(&fetch, ImagePolicy::strict(), vec![service_url("{domain}")])
        .resolve("acme.com", &base(strict_dir.path()))
        .unwrap();
    assert_eq!(strict.kind, SourceKind::FaviconService);
    assert!(image::open(&strict.path).is_ok());
}

#[test]
fn restricted_steps_only_run_what_was_asked() {
    let tmp = tempfile::tempdir().unwrap();
    let fetch = FakeFetch::new().png(&service_url("acme.com"));
    let resolved = cascade(&fetch)
        .with_steps(&[SourceKind::FaviconService])
        .resolve("acme.com", &base(tmp.path()))
        .unwrap();
    assert_eq!(resolved.kind, SourceKind::FaviconService);
    assert_eq!(fetch.calls(), vec![service_url("acme.com")]);
}

#[test]
fn listing_image_comes_before_the_cascade() {
    let tmp = tempfile::tempdir().unwrap();
    let out = OutputDir::create(tmp.path(), FilenamePolicy::default()).unwrap();
    let fetch = FakeFetch::new().png("https://img.example.com/acme.png");
    let record = CatalogRecord::new("Acme CRM", "https://www.acme.com", "");

    let d = resolve_record(&cascade(&fetch), &out, record, Some("https://img.example.com/acme.png"));
    assert_eq!(d.kind(), Some(SourceKind::Listing));
    assert_eq!(d.path(), Some(tmp.path().join("acme-crm.png").as_path()));
    assert_eq!(fetch.calls(), vec!["https://img.example.com/acme.png"]);
}

#[test]
fn broken_listing_image_falls_back_to_the_record_domain() {
    let tmp = tempfile::tempdir().unwrap();
    let out = OutputDir::create(tmp.path(), FilenamePolicy::default()).unwrap();
    let fetch = FakeFetch::new().ico("https://acme.com/favicon.ico");
    let record = CatalogRecord::new("Acme CRM", "(old) acme.com", "");

    let d = resolve_record(&cascade(&fetch), &out, record, Some("https://img.example.com/broken.png"));
    assert_eq!(d.kind(), Some(SourceKind::WellKnownFavicon));
    assert_eq!(d.path(), Some(tmp.path().join("acme-crm.png").as_path()));
}

#[test]
fn no_domain_and_no_listing_image_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let out = OutputDir::create(tmp.path(), FilenamePolicy::default()).unwrap();
    let fetch = FakeFetch::new();
    let record = CatalogRecord::new("Acme CRM", "n/a", "");

    let d = resolve_record(&cascade(&fetch), &out, record.clone(), None);
    assert_eq!(d, Disposition::NotFound { record: record.clone(), domain: None });
    assert!(fetch.calls().is_empty());

    let d = resolve_record(&cascade(&fetch), &out, record, Some("https://img.example.com/broken.png"));
    assert_eq!(d.kind(), None);
    assert_eq!(fetch.calls().len(), 1);
}
