pub mod audit_service;
pub mod fetcher;
pub mod traits;

pub use audit_service::AuditService;
pub use fetcher::{build_ga_accounts, build_gtm_accounts};
pub use traits::{AnalyticsAdminSource, TagManagerSource};
