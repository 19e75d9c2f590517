#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCESS_TOKEN: &str = "test-token";
const SERVICE_ACCOUNT: &str = include_str!("../fixtures/service_account.json");

/// Isolated working directory and home for one binary invocation
pub struct TestEnv {
    tmp: TempDir,
    pub home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        Self { tmp, home }
    }

    pub fn dir(&self) -> &Path {
        self.tmp.path()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("gmp-audit");
        cmd.current_dir(self.dir())
            .env("HOME", &self.home)
            .env_remove("GMP_AUDIT_CONFIG")
            .env_remove("GMP_AUDIT_ACCESS_TOKEN");
        cmd
    }

    pub fn write_config(&self, config: &Value) -> PathBuf {
        let path = self.dir().join("config.json");
        fs::write(&path, serde_json::to_string_pretty(config).unwrap()).expect("write config");
        path
    }

    /// Service account key whose token endpoint points at `token_uri`
    pub fn write_service_account(&self, token_uri: &str) -> PathBuf {
        let mut key: Value = serde_json::from_str(SERVICE_ACCOUNT).unwrap();
        key["token_uri"] = json!(token_uri);
        let path = self.dir().join("service_account.json");
        fs::write(&path, key.to_string()).expect("write key");
        path
    }

    pub fn config_for(&self, gtm: &MockServer, ga: &MockServer) -> PathBuf {
        self.write_config(&json!({
            "credentials_path": "unused.json",
            "tagmanager_base_url": gtm.uri(),
            "analytics_admin_base_url": ga.uri(),
        }))
    }
}

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// One GTM account with a published container and an unpublished one.
pub async fn mount_gtm_tree(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(ok(json!({
            "account": [{"path": "accounts/1", "accountId": "1", "name": "Acme"}]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/accounts/1/containers"))
        .respond_with(ok(json!({
            "container": [
                {"path": "accounts/1/containers/10", "accountId": "1", "containerId": "10",
                 "name": "Website", "publicId": "GTM-LIVE"},
                {"path": "accounts/1/containers/11", "accountId": "1", "containerId": "11",
                 "name": "Drafts", "publicId": "GTM-DRAFT"}
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/accounts/1/containers/10/versions:live"))
        .respond_with(ok(json!({
            "containerVersionId": "7",
            "tag": [
                {"tagId": "1", "name": "Google tag", "type": "googtag",
                 "firingTriggerId": ["2147479553"],
                 "parameter": [{"type": "template", "key": "measurementId", "value": "G-999"}]},
                {"tagId": "2", "name": "Pixel", "type": "html"}
            ],
            "trigger": [{"triggerId": "3", "name": "All Clicks", "type": "click"}],
            "variable": [{"variableId": "4", "name": "Page URL", "type": "u"}]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/accounts/1/containers/11/versions:live"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 404, "message": "Published container version not found."}
        })))
        .mount(server)
        .await;
}

/// One GA account, one property, one web stream.
pub async fn mount_ga_tree(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ok(json!({
            "accounts": [{"name": "accounts/100", "displayName": "Acme GA"}]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .and(query_param("filter", "parent:accounts/100"))
        .respond_with(ok(json!({
            "properties": [{
                "name": "properties/200",
                "displayName": "Acme Site",
                "timeZone": "America/New_York",
                "currencyCode": "USD"
            }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/properties/200/dataStreams"))
        .respond_with(ok(json!({
            "dataStreams": [{
                "name": "properties/200/dataStreams/300",
                "type": "WEB_DATA_STREAM",
                "displayName": "Acme Web",
                "webStreamData": {"measurementId": "G-999", "defaultUri": "https://acme.example"}
            }]
        })))
        .mount(server)
        .await;
}
