// src/report.rs
//! Per-record disposition CSV: `Title,Domain,Disposition,File`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::csv::write_row;
use crate::error::{Error, Result};
use crate::scrape::Disposition;

pub const REPORT_HEADERS: [&str; 4] = ["Title", "Domain", "Disposition", "File"];

pub fn write_report(path: &Path, dispositions: &[Disposition]) -> Result<()> {
    let to_error = |source| Error::Report { path: path.to_path_buf(), source };
    let file = File::create(path).map_err(to_error)?;
    write_rows(BufWriter::new(file), dispositions).map_err(to_error)
}

fn write_rows<W: Write>(mut w: W, dispositions: &[Disposition]) -> io::Result<()> {
    write_row(&mut w, &REPORT_HEADERS, ',')?;
    for d in dispositions {
        let record = d.record();
        let domain = match d {
            Disposition::NotFound { domain, .. } => domain.clone(),
            Disposition::Resolved(_) => record.domain(),
        }
        .unwrap_or_default();
        let file = d
            .path()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        write_row(&mut w, &[record.title.as_str(), domain.as_str(), d.label(), file.as_str()], ',')?;
    }
    w.flush()
}
