use crate::error::ApiError;

/// Helper functions for standardizing error conversions across the codebase
/// Convert reqwest errors to ApiError with endpoint context
pub fn convert_request_error(error: reqwest::Error, endpoint: &str, timeout_secs: u64) -> ApiError {
    if error.is_timeout() {
        return convert_timeout_error(endpoint, timeout_secs);
    }
    ApiError::Http {
        status: error.status().map(|s| s.as_u16()).unwrap_or(0),
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert timeout errors to ApiError with endpoint context
pub fn convert_timeout_error(endpoint: &str, timeout_secs: u64) -> ApiError {
    ApiError::Timeout {
        timeout_secs,
        endpoint: endpoint.to_string(),
    }
}

/// Convert JSON deserialization errors to ApiError with endpoint context
pub fn convert_json_error(error: impl std::fmt::Display, endpoint: &str) -> ApiError {
    ApiError::InvalidResponse {
        endpoint: endpoint.to_string(),
        message: format!("JSON parse error: {}", error),
    }
}

/// Map a non-success HTTP status into the matching ApiError
pub fn convert_status_error(status: u16, endpoint: &str, body: String) -> ApiError {
    match status {
        401 | 403 => ApiError::Unauthorized {
            status,
            endpoint: endpoint.to_string(),
            server_message: body,
        },
        _ => ApiError::Http {
            status,
            endpoint: endpoint.to_string(),
            message: body,
        },
    }
}

/// Helper macro for standardizing map_err patterns
#[macro_export]
macro_rules! map_api_error {
    ($result:expr, $endpoint:expr, $timeout_secs:expr) => {
        $result.map_err(|e| {
            $crate::utils::error_helpers::convert_request_error(e, $endpoint, $timeout_secs)
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_timeout_error() {
        let api_error = convert_timeout_error("/test", 30);
        match api_error {
            ApiError::Timeout {
                endpoint,
                timeout_secs,
            } => {
                assert_eq!(endpoint, "/test");
                assert_eq!(timeout_secs, 30);
            }
            _ => panic!("Expected Timeout error"),
        }
    }

    #[test]
    fn test_convert_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let api_error = convert_json_error(parse_err, "/accounts");
        match api_error {
            ApiError::InvalidResponse { endpoint, message } => {
                assert_eq!(endpoint, "/accounts");
                assert!(message.starts_with("JSON parse error"));
            }
            _ => panic!("Expected InvalidResponse error"),
        }
    }

    #[test]
    fn test_convert_status_error() {
        assert!(matches!(
            convert_status_error(403, "/accounts", "denied".to_string()),
            ApiError::Unauthorized { status: 403, .. }
        ));
        assert!(matches!(
            convert_status_error(401, "/accounts", String::new()),
            ApiError::Unauthorized { status: 401, .. }
        ));
        let err = convert_status_error(404, "/live", "missing".to_string());
        assert!(err.is_not_found());
    }
}
