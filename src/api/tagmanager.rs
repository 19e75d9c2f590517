use crate::api::client::GoogleApiClient;
use crate::api::models::{
    ListTagManagerAccounts, ListTagManagerContainers, TagManagerAccount, TagManagerContainer,
};
use crate::core::auth::TokenProvider;
use crate::core::services::traits::TagManagerSource;
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://tagmanager.googleapis.com/tagmanager/v2";

/// Tag Manager API v2 client
#[derive(Debug, Clone)]
pub struct TagManagerClient {
    api: GoogleApiClient,
}

impl TagManagerClient {
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
impl TagManagerSource for TagManagerClient {
    async fn list_accounts(&self) -> Result<Vec<TagManagerAccount>, ApiError> {
        self.api
            .get_all_pages::<ListTagManagerAccounts>("accounts", &[])
            .await
    }

    async fn list_containers(
        &self,
        account_path: &str,
    ) -> Result<Vec<TagManagerContainer>, ApiError> {
        let path = format!("{}/containers", account_path);
        self.api
            .get_all_pages::<ListTagManagerContainers>(&path, &[])
            .await
    }

    async fn live_version(&self, container_path: &str) -> Result<Value, ApiError> {
        let path = format!("{}/versions:live", container_path);
        self.api.get_value(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::StaticTokenProvider;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TagManagerClient {
        TagManagerClient::new(
            Some(server.uri()),
            Arc::new(StaticTokenProvider::new("test-token")),
        )
        .expect("client")
    }

    #[test]
    fn test_default_base_url() {
        let client =
            TagManagerClient::new(None, Arc::new(StaticTokenProvider::new("t"))).expect("client");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_list_containers_uses_account_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts/1/containers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "container": [{
                    "path": "accounts/1/containers/2",
                    "accountId": "1",
                    "containerId": "2",
                    "name": "Web",
                    "publicId": "GTM-ABC"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let containers = client_for(&server)
            .list_containers("accounts/1")
            .await
            .expect("containers");
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].public_id, "GTM-ABC");
        assert_eq!(containers[0].path, "accounts/1/containers/2");
    }

    #[tokio::test]
    async fn test_live_version_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts/1/containers/2/versions:live"))
            .respond_with(ResponseTemplate::new(404).set_body_string(
                r#"{"error": {"code": 404, "message": "Not found or permission denied."}}"#,
            ))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .live_version("accounts/1/containers/2")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_live_version_returns_raw_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts/1/containers/2/versions:live"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "containerVersionId": "7",
                "tag": [],
                "fingerprint": "123"
            })))
            .mount(&server)
            .await;

        let value = client_for(&server)
            .live_version("accounts/1/containers/2")
            .await
            .expect("live version");
        assert_eq!(value["containerVersionId"], "7");
        assert_eq!(value["fingerprint"], "123");
    }
}
