//! Roles

use super::handle::{Entity, Mutable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Allow,
    Deny,
}

/// One access rule of a role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub effect: Effect,
    /// `"all"` or a list such as `["read", "update"]`
    pub actions: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// e.g. `{"ContentModel": ["read"], "Settings": "all"}`
    #[serde(default)]
    pub permissions: Map<String, Value>,
    #[serde(default)]
    pub policies: Vec<Policy>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Role {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            permissions: Map::new(),
            policies: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_permission(mut self, area: &str, actions: Value) -> Self {
        self.permissions.insert(area.to_string(), actions);
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policies.push(policy);
        self
    }
}

impl Entity for Role {
    const KIND: &'static str = "Role";
    const COLLECTION: &'static str = "roles";
}

impl Mutable for Role {}
