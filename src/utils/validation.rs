//! Resource name and configuration value validation

use crate::error::ConfigError;

/// Extract the id from a resource name of the form `collection/{id}`.
///
/// Takes the segment right after the first `/`, so `accounts/123` yields
/// `123` and `properties/456/dataStreams/789` yields `456`.
pub fn resource_id(name: &str) -> Option<&str> {
    name.split('/').nth(1).filter(|id| !id.is_empty())
}

/// Validate the pipeline width used for per-container and per-property fetches
pub fn validate_max_concurrency(value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field: "max_concurrency".to_string(),
            value: value.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}

/// Validate that an endpoint override is an http(s) URL
pub fn validate_base_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: url.to_string(),
            reason: "URL must start with http:// or https://".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id() {
        assert_eq!(resource_id("accounts/123"), Some("123"));
        assert_eq!(resource_id("properties/456"), Some("456"));
        assert_eq!(resource_id("properties/456/dataStreams/789"), Some("456"));
        assert_eq!(resource_id("accounts/"), None);
        assert_eq!(resource_id("accounts"), None);
    }

    #[test]
    fn test_validate_max_concurrency() {
        assert_eq!(validate_max_concurrency(4).ok(), Some(4));
        assert!(validate_max_concurrency(0).is_err());
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("tagmanager_base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_base_url("tagmanager_base_url", "https://example.com").is_ok());
        assert!(validate_base_url("tagmanager_base_url", "example.com").is_err());
    }
}
