//! Space memberships

use super::handle::{Entity, Mutable};
use super::sys::Link;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user's access to a space: admin, or a set of roles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceMembership {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub roles: Vec<Link>,
    /// Only sent when inviting a user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpaceMembership {
    pub fn admin(email: &str) -> Self {
        Self {
            admin: true,
            roles: Vec::new(),
            email: Some(email.to_string()),
            extra: Map::new(),
        }
    }

    pub fn with_roles(email: &str, role_ids: &[&str]) -> Self {
        Self {
            admin: false,
            roles: role_ids.iter().map(|id| Link::new("Role", id)).collect(),
            email: Some(email.to_string()),
            extra: Map::new(),
        }
    }
}

impl Entity for SpaceMembership {
    const KIND: &'static str = "SpaceMembership";
    const COLLECTION: &'static str = "space_memberships";
}

impl Mutable for SpaceMembership {}
