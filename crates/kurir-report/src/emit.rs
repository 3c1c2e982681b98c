//! Report emitter: one CSV file per sheet, then hand the directory to the
//! OS viewer.

use std::path::{Path, PathBuf};

use crate::table::Report;
use crate::ReportError;

/// Writes `report` under `<output_dir>/<title>/`, one CSV per sheet, and
/// returns the report directory.
///
/// When `open_after` is set the directory is handed to the system's
/// default viewer; a viewer failure is logged and swallowed — the files
/// are already on disk, which is the part that matters.
///
/// # Errors
///
/// Returns [`ReportError::FileWrite`] if the destination cannot be
/// created or written, [`ReportError::Csv`] on serialization failure.
pub fn write_report(
    report: &Report,
    output_dir: &Path,
    open_after: bool,
) -> Result<PathBuf, ReportError> {
    let dir = output_dir.join(sanitize(&report.title));
    std::fs::create_dir_all(&dir).map_err(|e| ReportError::FileWrite {
        path: dir.display().to_string(),
        source: e,
    })?;

    for sheet in &report.sheets {
        let path = dir.join(format!("{}.csv", sanitize(&sheet.name)));
        let file = std::fs::File::create(&path).map_err(|e| ReportError::FileWrite {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(&sheet.columns)?;
        for row in &sheet.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|e| ReportError::FileWrite {
            path: path.display().to_string(),
            source: e,
        })?;

        tracing::info!(sheet = %sheet.name, rows = sheet.rows.len(), path = %path.display(), "wrote sheet");
    }

    if open_after {
        if let Err(e) = open::that(&dir) {
            tracing::warn!(path = %dir.display(), error = %e, "could not open report in viewer");
        }
    }

    Ok(dir)
}

/// Replaces path-hostile characters in titles and sheet names.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect()
}
