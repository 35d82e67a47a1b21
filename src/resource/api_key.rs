//! Delivery API keys

use super::handle::{Entity, Mutable};
use crate::api::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assigned by the server; never sent back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiKey {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            access_token: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

impl Entity for ApiKey {
    const KIND: &'static str = "ApiKey";
    const COLLECTION: &'static str = "api_keys";

    fn request_body(&self) -> Result<Value> {
        let mut body = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut body {
            map.remove("accessToken");
        }
        Ok(body)
    }
}

impl Mutable for ApiKey {}
