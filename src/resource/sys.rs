//! System metadata
//!
//! Every entity payload carries a `sys` object next to its data fields.
//! Only `version` changes over an entity's life: the server bumps it on each
//! successful mutation and expects it back on the next one.

use crate::api::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a user-supplied entity id
const MAX_ID_LENGTH: usize = 64;

/// `sys` envelope of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl Sys {
    /// Check the envelope against the kind it is expected to describe
    pub fn validate(&self, expected_kind: &str, versioned: bool) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::MalformedResponse("sys.id is empty".to_string()));
        }
        if self.kind != expected_kind {
            return Err(Error::MalformedResponse(format!(
                "expected sys.type '{}', got '{}'",
                expected_kind, self.kind
            )));
        }
        if versioned && self.version.is_none() {
            return Err(Error::MalformedResponse(format!(
                "{} '{}' has no sys.version",
                self.kind, self.id
            )));
        }
        Ok(())
    }

    /// Id of the owning space, if the entity is space-scoped
    pub fn space_id(&self) -> Option<&str> {
        self.space.as_ref().map(|link| link.id())
    }

    pub fn is_draft(&self) -> bool {
        self.published_version.is_none()
    }

    pub fn is_published(&self) -> bool {
        self.published_version.is_some()
    }

    /// Published, with changes made after the last publish
    pub fn is_updated(&self) -> bool {
        match (self.published_version, self.version) {
            (Some(published), Some(version)) => published + 1 < version,
            _ => false,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.archived_version.is_some()
    }
}

/// Reference to another entity: `{"sys": {"type": "Link", "linkType": "Entry", "id": "..."}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    #[serde(rename = "type")]
    pub kind: String,
    pub link_type: String,
    pub id: String,
}

impl Link {
    pub fn new(link_type: &str, id: &str) -> Self {
        Self {
            sys: LinkSys {
                kind: "Link".to_string(),
                link_type: link_type.to_string(),
                id: id.to_string(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn link_type(&self) -> &str {
        &self.sys.link_type
    }
}

/// Check a user-supplied entity id: 1-64 chars of `[A-Za-z0-9._-]`
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LENGTH
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

/// Generate a random, valid entity id starting with `prefix`
pub fn random_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    let mut id: String = prefix
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
        .take(MAX_ID_LENGTH - suffix.len())
        .collect();
    id.push_str(&suffix);
    id
}
