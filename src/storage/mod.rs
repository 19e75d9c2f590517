//! Storage layer for gmp-audit
//!
//! Handles the JSON configuration file, service account key files and
//! timestamped report output.

pub mod config;
pub mod credentials;
pub mod report_store;
