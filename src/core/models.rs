//! Domain model for the audit report.
//!
//! Each record is built once from an API payload through an explicit
//! `from_api` mapping. Serialized field names follow the Google API naming
//! (camelCase, `tag`/`trigger`/`variable` for live version contents).

use crate::api::models::{
    AnalyticsAccount, AnalyticsDataStream, AnalyticsProperty, ContainerVersion, TagManagerAccount,
    TagManagerContainer, TagManagerTag, TagManagerTrigger, TagManagerVariable,
};
use crate::error::ApiError;
use crate::utils::validation::resource_id;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Error recorded on a container whose live version lookup returned 404
pub const NO_LIVE_VERSION: &str = "No live version published";

const GOOGLE_TAG_TYPE: &str = "googtag";
const MEASUREMENT_ID_KEY: &str = "measurementId";
const STREAM_TYPE_SUFFIX: &str = "_DATA_STREAM";

// --- GTM ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtmVariable {
    pub name: String,
    #[serde(rename = "variableId")]
    pub id: String,
    #[serde(rename = "type")]
    pub variable_type: String,
}

impl GtmVariable {
    pub fn from_api(variable: TagManagerVariable) -> Self {
        Self {
            name: variable.name,
            id: variable.variable_id,
            variable_type: variable.variable_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtmTrigger {
    pub name: String,
    #[serde(rename = "triggerId")]
    pub id: String,
    #[serde(rename = "type")]
    pub trigger_type: String,
}

impl GtmTrigger {
    pub fn from_api(trigger: TagManagerTrigger) -> Self {
        Self {
            name: trigger.name,
            id: trigger.trigger_id,
            trigger_type: trigger.trigger_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtmTag {
    pub name: String,
    #[serde(rename = "tagId")]
    pub id: String,
    #[serde(rename = "type")]
    pub tag_type: String,
    #[serde(rename = "firingTriggerId", default)]
    pub firing_trigger_ids: Vec<String>,
    #[serde(rename = "parameter", default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Map<String, Value>>>,
}

impl GtmTag {
    pub fn from_api(tag: TagManagerTag) -> Self {
        Self {
            name: tag.name,
            id: tag.tag_id,
            tag_type: tag.tag_type,
            firing_trigger_ids: tag.firing_trigger_id,
            parameters: tag.parameter,
        }
    }

    /// Values of `measurementId` parameters when this is a Google tag
    pub fn measurement_ids(&self) -> impl Iterator<Item = String> + '_ {
        let params = match (&self.parameters, self.tag_type == GOOGLE_TAG_TYPE) {
            (Some(params), true) => params.as_slice(),
            _ => &[],
        };
        params
            .iter()
            .filter(|p| p.get("key").and_then(Value::as_str) == Some(MEASUREMENT_ID_KEY))
            .filter_map(|p| p.get("value"))
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GtmContainer {
    pub name: String,
    pub public_id: String,
    pub container_id: String,
    #[serde(rename = "tag", default)]
    pub tags: Vec<GtmTag>,
    #[serde(rename = "trigger", default)]
    pub triggers: Vec<GtmTrigger>,
    #[serde(rename = "variable", default)]
    pub variables: Vec<GtmVariable>,
    #[serde(rename = "containerVersionId", default)]
    pub live_version_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GtmContainer {
    /// Container shell without any live version contents
    pub fn from_api(container: &TagManagerContainer) -> Self {
        Self {
            name: container.name.clone(),
            public_id: container.public_id.clone(),
            container_id: container.container_id.clone(),
            tags: Vec::new(),
            triggers: Vec::new(),
            variables: Vec::new(),
            live_version_id: None,
            error: None,
        }
    }

    pub fn with_live_version(mut self, version: ContainerVersion) -> Self {
        self.live_version_id = version.container_version_id;
        self.tags = version.tag.into_iter().map(GtmTag::from_api).collect();
        self.triggers = version.trigger.into_iter().map(GtmTrigger::from_api).collect();
        self.variables = version.variable.into_iter().map(GtmVariable::from_api).collect();
        self
    }

    /// Mark the container as having no published version.
    pub fn without_live_version(mut self) -> Self {
        self.tags.clear();
        self.triggers.clear();
        self.variables.clear();
        self.live_version_id = None;
        self.error = Some(NO_LIVE_VERSION.to_string());
        self
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// Distinct GA4 measurement ids referenced by Google tags, sorted
    pub fn linked_measurement_ids(&self) -> BTreeSet<String> {
        self.tags.iter().flat_map(GtmTag::measurement_ids).collect()
    }

    /// Number of tags per tag type, keyed in sorted order
    pub fn tag_type_histogram(&self) -> BTreeMap<&str, usize> {
        let mut histogram = BTreeMap::new();
        for tag in &self.tags {
            *histogram.entry(tag.tag_type.as_str()).or_insert(0) += 1;
        }
        histogram
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GtmAccount {
    pub name: String,
    pub account_id: String,
    #[serde(default)]
    pub containers: Vec<GtmContainer>,
}

impl GtmAccount {
    pub fn from_api(account: &TagManagerAccount) -> Self {
        Self {
            name: account.name.clone(),
            account_id: account.account_id.clone(),
            containers: Vec::new(),
        }
    }
}

// --- GA4 ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaDataStream {
    pub display_name: String,
    #[serde(rename = "type")]
    pub stream_type: String,
    #[serde(default)]
    pub measurement_id: Option<String>,
}

/// Strip the `_DATA_STREAM` suffix from an Analytics stream type
pub fn normalize_stream_type(raw: &str) -> &str {
    raw.strip_suffix(STREAM_TYPE_SUFFIX).unwrap_or(raw)
}

impl GaDataStream {
    pub fn from_api(stream: AnalyticsDataStream) -> Self {
        let stream_type = normalize_stream_type(&stream.stream_type).to_string();
        // unknown stream types intentionally carry no identifier
        let measurement_id = match stream_type.as_str() {
            "WEB" => stream.web_stream_data.and_then(|d| d.measurement_id),
            "IOS_APP" => stream.ios_app_stream_data.and_then(|d| d.firebase_app_id),
            "ANDROID_APP" => stream.android_app_stream_data.and_then(|d| d.firebase_app_id),
            _ => None,
        };

        Self {
            display_name: stream.display_name,
            stream_type,
            measurement_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaProperty {
    pub display_name: String,
    pub property_id: String,
    pub time_zone: String,
    pub currency_code: String,
    #[serde(default)]
    pub data_streams: Vec<GaDataStream>,
}

impl GaProperty {
    pub fn from_api(property: &AnalyticsProperty) -> Result<Self, ApiError> {
        Ok(Self {
            display_name: property.display_name.clone(),
            property_id: id_from_resource_name(&property.name)?,
            time_zone: property.time_zone.clone(),
            currency_code: property.currency_code.clone(),
            data_streams: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaAccount {
    pub display_name: String,
    pub account_id: String,
    #[serde(default)]
    pub properties: Vec<GaProperty>,
}

impl GaAccount {
    pub fn from_api(account: &AnalyticsAccount) -> Result<Self, ApiError> {
        Ok(Self {
            display_name: account.display_name.clone(),
            account_id: id_from_resource_name(&account.name)?,
            properties: Vec::new(),
        })
    }
}

fn id_from_resource_name(name: &str) -> Result<String, ApiError> {
    resource_id(name)
        .map(str::to_string)
        .ok_or_else(|| ApiError::InvalidResponse {
            endpoint: name.to_string(),
            message: format!("resource name '{}' has no id segment", name),
        })
}

// --- Report ---

/// Aggregate counters, always derived from the report lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub gtm_accounts: usize,
    pub gtm_containers: usize,
    pub gtm_tags: usize,
    pub gtm_triggers: usize,
    pub gtm_variables: usize,
    pub ga_accounts: usize,
    pub ga_properties: usize,
    pub ga_data_streams: usize,
}

impl AuditSummary {
    pub fn of(gtm_accounts: &[GtmAccount], ga_accounts: &[GaAccount]) -> Self {
        let containers = || gtm_accounts.iter().flat_map(|a| a.containers.iter());
        let properties = || ga_accounts.iter().flat_map(|a| a.properties.iter());

        Self {
            gtm_accounts: gtm_accounts.len(),
            gtm_containers: containers().count(),
            gtm_tags: containers().map(|c| c.tags.len()).sum(),
            gtm_triggers: containers().map(|c| c.triggers.len()).sum(),
            gtm_variables: containers().map(|c| c.variables.len()).sum(),
            ga_accounts: ga_accounts.len(),
            ga_properties: properties().count(),
            ga_data_streams: properties().map(|p| p.data_streams.len()).sum(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    #[serde(default)]
    pub gtm_accounts: Vec<GtmAccount>,
    #[serde(default)]
    pub ga_accounts: Vec<GaAccount>,
}

impl AuditReport {
    pub fn new(gtm_accounts: Vec<GtmAccount>, ga_accounts: Vec<GaAccount>) -> Self {
        Self {
            gtm_accounts,
            ga_accounts,
        }
    }

    pub fn summary(&self) -> AuditSummary {
        AuditSummary::of(&self.gtm_accounts, &self.ga_accounts)
    }
}

// summary is computed at serialization time so it can never drift from the lists
impl Serialize for AuditReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AuditReport", 3)?;
        state.serialize_field("gtmAccounts", &self.gtm_accounts)?;
        state.serialize_field("gaAccounts", &self.ga_accounts)?;
        state.serialize_field("summary", &self.summary())?;
        state.end()
    }
}
