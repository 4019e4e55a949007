// src/config/consts.rs

// Net
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
pub const ACCEPT: &str = "text/html,image/avif,image/webp,image/*,*/*;q=0.8";
pub const HTTP_TIMEOUT_SECS: u64 = 20;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

// Catalog columns
pub const TITLE_COLUMN: &str = "Title";
pub const CATEGORY_COLUMN: &str = "Product Category";
// First one present wins unless the caller names a column.
pub const HOMEPAGE_COLUMNS: &[&str] = &[
    "product.metafields.custom.custom",
    "Homepage",
    "Website",
    "URL",
];

// Directory listing markup
pub const DIRECTORY_URL: &str = "https://www.capterra.in/directory";
pub const CATEGORY_LINK_CLASS: &str = "list-group-item";
pub const CARD_TAG: &str = "div";
pub const CARD_CLASS: &str = "card";
pub const CARD_NAME_TAG: &str = "h2";
pub const NEXT_PAGE_CLASS: &str = "next";
pub const LAZY_SRC_ATTRS: &[&str] = &["data-src", "data-lazy-src", "data-original"];
pub const IMGIX_HOST: &str = "imgix.net";

// Cascade
pub const LOGO_MARKER: &str = "logo";
pub const ICON_MARKER: &str = "icon";
pub const WELL_KNOWN_FAVICON: &str = "favicon.ico";
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";
pub const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?domain={domain}&sz=256";

// Output
pub const DEFAULT_OUT_SUBDIR: &str = "logos";
pub const FALLBACK_STEM: &str = "logo";
pub const CANONICAL_EXT: &str = "png";
pub const SUPPORTED_EXTS: &[&str] = &["png", "jpg", "jpeg", "webp", "svg", "avif", "ico"];

// Concurrency
pub const WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 16;
