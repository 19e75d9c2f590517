pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → API → Storage)
pub mod cli; // Command-line interface
pub mod core; // Audit traversal and domain model
pub mod storage; // Configuration, credentials and report files

/// Support modules (used across layers)
pub mod api; // Tag Manager and Analytics Admin clients
pub mod display; // Report rendering
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
