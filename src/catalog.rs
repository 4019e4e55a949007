// src/catalog.rs
//! Catalog CSV → records.
//!
//! Columns are found by header name: `Title`, a homepage column (the caller's choice,
//! else the first of `HOMEPAGE_COLUMNS` present) and optionally `Product Category`.
//! Exact header matches win over case-insensitive ones. A catalog needs at least a
//! title or a homepage column; a record without a title can still be resolved by
//! domain.

use std::fs;
use std::path::Path;

use crate::config::consts::{CATEGORY_COLUMN, HOMEPAGE_COLUMNS, TITLE_COLUMN};
use crate::csv::parse_rows;
use crate::error::{Error, Result};
use crate::ident::{extract_domain, normalize_title};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogRecord {
    pub title: String,
    pub homepage_raw: String,
    pub category: String,
}

impl CatalogRecord {
    pub fn new(title: &str, homepage_raw: &str, category: &str) -> Self {
        Self { title: s!(title), homepage_raw: s!(homepage_raw), category: s!(category) }
    }

    /// Normalized title key used for listing matches.
    pub fn key(&self) -> String {
        normalize_title(&self.title)
    }

    pub fn domain(&self) -> Option<String> {
        extract_domain(&self.homepage_raw)
    }

    /// Title for humans, falling back to the raw homepage cell.
    pub fn label(&self) -> &str {
        if self.title.is_empty() { &self.homepage_raw } else { &self.title }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub records: Vec<CatalogRecord>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn load_catalog(path: &Path, homepage_column: Option<&str>) -> Result<Catalog> {
    let text = fs::read_to_string(path)
        .map_err(|source| Error::CatalogRead { path: path.to_path_buf(), source })?;
    parse_catalog(&text, homepage_column)
}

fn find_column(header: &[String], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|h| h == name)
        .or_else(|| header.iter().position(|h| h.eq_ignore_ascii_case(name)))
}

pub fn parse_catalog(text: &str, homepage_column: Option<&str>) -> Result<Catalog> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = parse_rows(text, ',').into_iter();
    let header: Vec<String> = rows
        .next()
        .unwrap_or_default()
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let title_col = find_column(&header, TITLE_COLUMN);
    let homepage_col = match homepage_column {
        Some(name) => find_column(&header, name),
        None => HOMEPAGE_COLUMNS.iter().find_map(|name| find_column(&header, name)),
    };
    let category_col = find_column(&header, CATEGORY_COLUMN);

    if title_col.is_none() && homepage_col.is_none() {
        return Err(Error::CatalogColumns { found: header.join(", ") });
    }

    let cell = |row: &[String], col: Option<usize>| -> String {
        col.and_then(|i| row.get(i)).map(|c| c.trim().to_string()).unwrap_or_default()
    };

    let records = rows
        .map(|row| CatalogRecord {
            title: cell(&row, title_col),
            homepage_raw: cell(&row, homepage_col),
            category: cell(&row, category_col),
        })
        .filter(|r| !r.title.is_empty() || !r.homepage_raw.is_empty())
        .collect();

    Ok(Catalog { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_by_name_in_any_order() {
        let text = "\u{feff}Handle,product.metafields.custom.custom,Title,Product Category\n\
                    acme,https://www.acme.com, Acme CRM ,Sales\n\
                    globex,,Globex,\n";
        let catalog = parse_catalog(text, None).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records[0], CatalogRecord::new("Acme CRM", "https://www.acme.com", "Sales"));
        assert_eq!(catalog.records[0].domain().as_deref(), Some("acme.com"));
        assert_eq!(catalog.records[1].domain(), None);
    }

    #[test]
    fn named_homepage_column_wins() {
        let text = "title,Homepage,Docs\nAcme,https://acme.com,https://docs.acme.io\n";
        let catalog = parse_catalog(text, Some("docs")).unwrap();
        assert_eq!(catalog.records[0].title, "Acme");
        assert_eq!(catalog.records[0].homepage_raw, "https://docs.acme.io");
    }

    #[test]
    fn untitled_rows_survive_but_empty_rows_do_not() {
        let text = "Title,Website\n,acme.com\n , \nGlobex,\n";
        let catalog = parse_catalog(text, None).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records[0].label(), "acme.com");
        assert_eq!(catalog.records[0].key(), "");
    }

    #[test]
    fn missing_columns_is_an_input_error() {
        let err = parse_catalog("Name,Price\nAcme,10\n", None).unwrap_err();
        assert!(matches!(err, Error::CatalogColumns { .. }));
        assert!(matches!(parse_catalog("", None), Err(Error::CatalogColumns { .. })));
    }

    #[test]
    fn unreadable_catalog_is_an_input_error() {
        let err = load_catalog(Path::new("/definitely/not/here.csv"), None).unwrap_err();
        assert!(matches!(err, Error::CatalogRead { .. }));
    }
}
