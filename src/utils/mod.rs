//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Conversions from transport errors into `ApiError`
pub mod error_helpers;

/// File system operations and path handling
pub mod file;

/// Status and verbose output on the error stream
pub mod logging;

/// Text truncation helpers
pub mod text;

/// Resource name and configuration value validation
pub mod validation;
