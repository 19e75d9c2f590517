use crate::api::client::GoogleApiClient;
use crate::api::models::{
    AnalyticsAccount, AnalyticsDataStream, AnalyticsProperty, ListAnalyticsAccounts,
    ListAnalyticsDataStreams, ListAnalyticsProperties,
};
use crate::core::auth::TokenProvider;
use crate::core::services::traits::AnalyticsAdminSource;
use crate::error::ApiError;
use async_trait::async_trait;
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://analyticsadmin.googleapis.com/v1beta";

/// Analytics Admin API v1beta client
#[derive(Debug, Clone)]
pub struct AnalyticsAdminClient {
    api: GoogleApiClient,
}

impl AnalyticsAdminClient {
    pub fn new(base_url: Option<String>, token_provider: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            api: GoogleApiClient::new(base_url, token_provider)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }
}

#[async_trait]
impl AnalyticsAdminSource for AnalyticsAdminClient {
    async fn list_accounts(&self) -> Result<Vec<AnalyticsAccount>, ApiError> {
        self.api
            .get_all_pages::<ListAnalyticsAccounts>("accounts", &[])
            .await
    }

    async fn list_properties(
        &self,
        account_name: &str,
    ) -> Result<Vec<AnalyticsProperty>, ApiError> {
        let filter = format!("parent:{}", account_name);
        self.api
            .get_all_pages::<ListAnalyticsProperties>("properties", &[("filter", filter.as_str())])
            .await
    }

    async fn list_data_streams(
        &self,
        property_name: &str,
    ) -> Result<Vec<AnalyticsDataStream>, ApiError> {
        let path = format!("{}/dataStreams", property_name);
        self.api
            .get_all_pages::<ListAnalyticsDataStreams>(&path, &[])
            .await
    }
}
