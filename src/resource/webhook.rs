//! Webhook definitions

use super::handle::{Entity, Mutable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookHeader {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub name: String,
    pub url: String,
    /// e.g. `Entry.publish` or `*.*`
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_basic_username: Option<String>,
    /// Write-only: never returned by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_basic_password: Option<String>,
    #[serde(default)]
    pub headers: Vec<WebhookHeader>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Webhook {
    pub fn new(name: &str, url: &str, topics: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            http_basic_username: None,
            http_basic_password: None,
            headers: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push(WebhookHeader {
            key: key.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.http_basic_username = Some(username.to_string());
        self.http_basic_password = Some(password.to_string());
        self
    }
}

impl Entity for Webhook {
    const KIND: &'static str = "WebhookDefinition";
    const COLLECTION: &'static str = "webhook_definitions";
}

impl Mutable for Webhook {}
