use crate::core::models::AuditReport;
use crate::core::services::fetcher::{build_ga_accounts, build_gtm_accounts};
use crate::core::services::traits::{AnalyticsAdminSource, TagManagerSource};
use crate::error::ApiError;
use crate::utils::logging::Logger;
use std::sync::Arc;

/// Runs a full audit: the GTM tree first, then the GA4 tree.
pub struct AuditService {
    tag_manager: Arc<dyn TagManagerSource>,
    analytics: Arc<dyn AnalyticsAdminSource>,
    logger: Logger,
    max_concurrency: usize,
}

impl AuditService {
    pub fn new(
        tag_manager: Arc<dyn TagManagerSource>,
        analytics: Arc<dyn AnalyticsAdminSource>,
        logger: Logger,
    ) -> Self {
        Self {
            tag_manager,
            analytics,
            logger,
            max_concurrency: 1,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub async fn run(&self) -> Result<AuditReport, ApiError> {
        self.logger.status("Auditing Google Tag Manager...");
        let gtm_accounts =
            build_gtm_accounts(self.tag_manager.as_ref(), &self.logger, self.max_concurrency)
                .await?;

        self.logger.status("Auditing Google Analytics (GA4)...");
        let ga_accounts =
            build_ga_accounts(self.analytics.as_ref(), &self.logger, self.max_concurrency).await?;

        let report = AuditReport::new(gtm_accounts, ga_accounts);
        let summary = report.summary();
        self.logger.verbose(&format!(
            "Audit complete: {} containers, {} data streams",
            summary.gtm_containers, summary.ga_data_streams
        ));
        Ok(report)
    }
}
