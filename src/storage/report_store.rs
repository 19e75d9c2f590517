//! Timestamped report files.

use crate::core::models::AuditReport;
use crate::display::{format_json_report, format_text_report};
use crate::error::{AppError, StorageError};
use crate::utils::file::ensure_directory_exists;
use chrono::{DateTime, Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "audit_reports";

/// `audit_<YYYYMMDD_HHMMSS>.<json|txt>` for the given moment
pub fn report_file_name<Tz: TimeZone>(timestamp: &DateTime<Tz>, as_json: bool) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let extension = if as_json { "json" } else { "txt" };
    format!("audit_{}.{}", timestamp.format("%Y%m%d_%H%M%S"), extension)
}

/// Write the report into `directory`, creating it if needed.
///
/// Files are named by local time to the second, so two runs within the same
/// second overwrite each other.
pub fn save_report(report: &AuditReport, directory: &Path, as_json: bool) -> Result<PathBuf, AppError> {
    ensure_directory_exists(directory)?;

    let content = if as_json {
        format_json_report(report)?
    } else {
        format_text_report(report)?
    };

    let path = directory.join(report_file_name(&Local::now(), as_json));
    fs::write(&path, content).map_err(|source| StorageError::FileIo {
        path: path.to_string_lossy().to_string(),
        source,
    })?;

    Ok(path)
}
