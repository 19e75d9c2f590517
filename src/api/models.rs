//! Wire models for the Tag Manager v2 and Analytics Admin v1beta REST APIs.
//!
//! These mirror the JSON payloads as returned by Google. Conversion into the
//! audit's domain records happens in `core::models`.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A list response that may continue on another page
pub trait Paginated {
    type Item;

    fn into_page(self) -> (Vec<Self::Item>, Option<String>);
}

macro_rules! paginated_response {
    ($name:ident, $field:ident, $json:tt, $item:ty) => {
        #[derive(Debug, Deserialize, Default)]
        pub struct $name {
            #[serde(rename = $json, default)]
            pub $field: Vec<$item>,
            #[serde(rename = "nextPageToken", default)]
            pub next_page_token: Option<String>,
        }

        impl Paginated for $name {
            type Item = $item;

            fn into_page(self) -> (Vec<$item>, Option<String>) {
                (self.$field, self.next_page_token.filter(|t| !t.is_empty()))
            }
        }
    };
}

// --- Tag Manager ---

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagManagerAccount {
    pub path: String,
    pub account_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagManagerContainer {
    pub path: String,
    #[serde(default)]
    pub account_id: Option<String>,
    pub container_id: String,
    pub name: String,
    #[serde(default)]
    pub public_id: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagManagerTag {
    pub tag_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub tag_type: String,
    #[serde(default)]
    pub firing_trigger_id: Vec<String>,
    #[serde(default)]
    pub parameter: Option<Vec<Map<String, Value>>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagManagerTrigger {
    pub trigger_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub trigger_type: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagManagerVariable {
    pub variable_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub variable_type: String,
}

/// Published container version (`versions:live`)
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerVersion {
    #[serde(default)]
    pub container_version_id: Option<String>,
    #[serde(default)]
    pub tag: Vec<TagManagerTag>,
    #[serde(default)]
    pub trigger: Vec<TagManagerTrigger>,
    #[serde(default)]
    pub variable: Vec<TagManagerVariable>,
}

paginated_response!(ListTagManagerAccounts, account, "account", TagManagerAccount);
paginated_response!(
    ListTagManagerContainers,
    container,
    "container",
    TagManagerContainer
);

// --- Analytics Admin ---

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsAccount {
    /// `accounts/{id}`
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsProperty {
    /// `properties/{id}`
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub time_zone: String,
    #[serde(default)]
    pub currency_code: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebStreamData {
    #[serde(default)]
    pub measurement_id: Option<String>,
    #[serde(default)]
    pub default_uri: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppStreamData {
    #[serde(default)]
    pub firebase_app_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDataStream {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub stream_type: String,
    pub display_name: String,
    #[serde(default)]
    pub web_stream_data: Option<WebStreamData>,
    #[serde(default)]
    pub ios_app_stream_data: Option<AppStreamData>,
    #[serde(default)]
    pub android_app_stream_data: Option<AppStreamData>,
}

paginated_response!(ListAnalyticsAccounts, accounts, "accounts", AnalyticsAccount);
paginated_response!(
    ListAnalyticsProperties,
    properties,
    "properties",
    AnalyticsProperty
);
paginated_response!(
    ListAnalyticsDataStreams,
    data_streams,
    "dataStreams",
    AnalyticsDataStream
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_version_deserialization() {
        let json = r#"{
            "path": "accounts/1/containers/2/versions/7",
            "containerVersionId": "7",
            "tag": [
                {
                    "tagId": "10",
                    "name": "GA4 Config",
                    "type": "googtag",
                    "firingTriggerId": ["2147479553"],
                    "parameter": [{"type": "template", "key": "tagId", "value": "G-999"}]
                }
            ],
            "trigger": [{"triggerId": "5", "name": "All Clicks", "type": "click"}],
            "variable": [{"variableId": "3", "name": "Page URL", "type": "u"}]
        }"#;

        let version: ContainerVersion = serde_json::from_str(json).unwrap();
        assert_eq!(version.container_version_id.as_deref(), Some("7"));
        assert_eq!(version.tag.len(), 1);
        assert_eq!(version.tag[0].tag_type, "googtag");
        assert_eq!(version.tag[0].firing_trigger_id, vec!["2147479553"]);
        assert_eq!(version.trigger[0].trigger_type, "click");
        assert_eq!(version.variable[0].variable_id, "3");
    }

    #[test]
    fn test_empty_live_version() {
        let version: ContainerVersion = serde_json::from_str(r#"{"containerVersionId": "0"}"#).unwrap();
        assert!(version.tag.is_empty());
        assert!(version.trigger.is_empty());
        assert!(version.variable.is_empty());
    }

    #[test]
    fn test_list_response_pagination() {
        let json = r#"{
            "account": [{"path": "accounts/1", "accountId": "1", "name": "Acme"}],
            "nextPageToken": "abc"
        }"#;
        let page: ListTagManagerAccounts = serde_json::from_str(json).unwrap();
        let (items, token) = page.into_page();
        assert_eq!(items.len(), 1);
        assert_eq!(token.as_deref(), Some("abc"));

        let page: ListAnalyticsAccounts = serde_json::from_str(r#"{"nextPageToken": ""}"#).unwrap();
        let (items, token) = page.into_page();
        assert!(items.is_empty());
        assert!(token.is_none());
    }

    #[test]
    fn test_data_stream_deserialization() {
        let json = r#"{
            "name": "properties/2/dataStreams/3",
            "type": "ANDROID_APP_DATA_STREAM",
            "displayName": "Android",
            "androidAppStreamData": {"firebaseAppId": "1:android", "packageName": "com.example"}
        }"#;
        let stream: AnalyticsDataStream = serde_json::from_str(json).unwrap();
        assert_eq!(stream.stream_type, "ANDROID_APP_DATA_STREAM");
        assert!(stream.web_stream_data.is_none());
        assert_eq!(
            stream
                .android_app_stream_data
                .and_then(|d| d.firebase_app_id)
                .as_deref(),
            Some("1:android")
        );
    }
}
