//! Presentation of audit results.

pub mod diagnostics;
pub mod report;

pub use report::{format_json_report, format_text_report};
