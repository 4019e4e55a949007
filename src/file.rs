// src/file.rs

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use crate::config::consts::DEFAULT_OUT_SUBDIR;

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// `logos/` next to the catalog file.
pub fn default_out_dir(catalog: &Path) -> PathBuf {
    catalog
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_OUT_SUBDIR)
}

/// `base` + `.` + `ext`, without treating anything in `base` as an existing extension.
pub fn with_ext(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Catalog file stem as category text: `project-management.csv` → `project management`.
pub fn category_from_catalog(catalog: &Path) -> String {
    catalog
        .file_stem()
        .map(|s| s.to_string_lossy().replace(['-', '_'], " "))
        .unwrap_or_default()
}
