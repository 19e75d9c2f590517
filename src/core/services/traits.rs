use crate::api::models::{
    AnalyticsAccount, AnalyticsDataStream, AnalyticsProperty, TagManagerAccount,
    TagManagerContainer,
};
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

/// Read-only view of the Tag Manager API used by the audit
#[async_trait]
pub trait TagManagerSource: Send + Sync {
    /// All accounts visible to the caller
    async fn list_accounts(&self) -> Result<Vec<TagManagerAccount>, ApiError>;

    /// Containers of the account at `account_path` (`accounts/{id}`)
    async fn list_containers(
        &self,
        account_path: &str,
    ) -> Result<Vec<TagManagerContainer>, ApiError>;

    /// Raw published version of a container.
    ///
    /// Returns an `ApiError` for which `is_not_found()` holds when nothing
    /// has been published yet.
    async fn live_version(&self, container_path: &str) -> Result<Value, ApiError>;
}

/// Read-only view of the Analytics Admin API used by the audit
#[async_trait]
pub trait AnalyticsAdminSource: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<AnalyticsAccount>, ApiError>;

    /// Properties whose parent is `account_name` (`accounts/{id}`)
    async fn list_properties(&self, account_name: &str)
    -> Result<Vec<AnalyticsProperty>, ApiError>;

    async fn list_data_streams(
        &self,
        property_name: &str,
    ) -> Result<Vec<AnalyticsDataStream>, ApiError>;
}
