use crate::api::models::Paginated;
use crate::core::auth::TokenProvider;
use crate::error::ApiError;
use crate::map_api_error;
use crate::utils::error_helpers::{convert_json_error, convert_status_error};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("gmp-audit/", env!("CARGO_PKG_VERSION"));
const PAGE_TOKEN_PARAM: &str = "pageToken";

/// Authenticated JSON client for one Google REST API root
#[derive(Clone)]
pub struct GoogleApiClient {
    client: Client,
    pub base_url: String,
    token_provider: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for GoogleApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Shared reqwest client with the crate's timeout and user agent
pub fn build_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ApiError::Http {
            status: 0,
            endpoint: "client_init".to_string(),
            message: format!("Failed to create HTTP client: {}", e),
        })
}

impl GoogleApiClient {
    pub fn new(base_url: String, token_provider: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        Ok(Self::with_http_client(
            build_http_client()?,
            base_url,
            token_provider,
        ))
    }

    pub fn with_http_client(
        client: Client,
        base_url: String,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_provider,
        }
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.client.request(method, url)
    }

    /// GET a resource and decode it as `T`
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let token = self.token_provider.access_token().await?;
        let response = map_api_error!(
            self.build_request(Method::GET, path)
                .bearer_auth(token)
                .query(query)
                .send()
                .await,
            path,
            DEFAULT_TIMEOUT_SECS
        )?;
        Self::handle_response(response, path).await
    }

    /// GET a resource as untyped JSON
    pub async fn get_value(&self, path: &str) -> Result<Value, ApiError> {
        self.get_json(path, &[]).await
    }

    /// Follow `nextPageToken` until the listing is exhausted, keeping API order.
    ///
    /// A token that was already requested is an `InvalidResponse`, so a
    /// server cycling between tokens cannot keep the listing going forever.
    pub async fn get_all_pages<P>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<P::Item>, ApiError>
    where
        P: Paginated + DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens: HashSet<String> = HashSet::new();

        loop {
            let mut params: Vec<(&str, &str)> = query.to_vec();
            if let Some(token) = page_token.as_deref() {
                params.push((PAGE_TOKEN_PARAM, token));
            }

            let page: P = self.get_json(path, &params).await?;
            let (mut batch, next) = page.into_page();
            items.append(&mut batch);

            match next {
                Some(token) => {
                    if !seen_tokens.insert(token.clone()) {
                        return Err(ApiError::InvalidResponse {
                            endpoint: path.to_string(),
                            message: format!("page token '{}' was returned twice", token),
                        });
                    }
                    page_token = Some(token);
                }
                None => break,
            }
        }

        Ok(items)
    }

    pub async fn handle_response<T>(response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            let body = map_api_error!(response.text().await, endpoint, DEFAULT_TIMEOUT_SECS)?;
            serde_json::from_str(&body).map_err(|e| convert_json_error(e, endpoint))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(convert_status_error(status.as_u16(), endpoint, error_text))
        }
    }
}
