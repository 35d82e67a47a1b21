//! Locales

use super::handle::{Entity, Mutable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Language/region configuration of a space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    pub name: String,
    /// e.g. `de-DE`
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_management_api: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_delivery_api: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Locale {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            fallback_code: None,
            default: None,
            optional: None,
            content_management_api: None,
            content_delivery_api: None,
            extra: Map::new(),
        }
    }

    pub fn with_fallback(mut self, code: &str) -> Self {
        self.fallback_code = Some(code.to_string());
        self
    }

    pub fn is_default(&self) -> bool {
        self.default.unwrap_or(false)
    }
}

impl Entity for Locale {
    const KIND: &'static str = "Locale";
    const COLLECTION: &'static str = "locales";
}

impl Mutable for Locale {}
