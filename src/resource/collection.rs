//! Collections and pagination
//!
//! List endpoints answer with an `Array` envelope:
//! `{"sys": {"type": "Array"}, "total": N, "skip": S, "limit": L, "items": [...], "includes": {...}}`.
//! Pages are walked by advancing `skip` until `total` is reached.

use super::handle::{Entity, Resource};
use super::sys::Link;
use crate::api::client::Client;
use crate::api::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u64 = 1000;

/// Query parameters of a list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub order: Option<String>,
    /// Any other filter, e.g. `content_type` or `fields.title[match]`
    pub params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Page size, clamped to [`MAX_PAGE_SIZE`]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit.clamp(1, MAX_PAGE_SIZE));
        self
    }

    pub fn order(mut self, order: &str) -> Self {
        self.order = Some(order.to_string());
        self
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    /// Query string pairs in a stable order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip".to_string(), skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        for (key, value) in &self.params {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}

/// Linked entities delivered alongside a page of items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Includes {
    #[serde(rename = "Entry", default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<Value>,
    #[serde(rename = "Asset", default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<Value>,
}

impl Includes {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.assets.is_empty()
    }

    /// Find the included payload a link points to
    pub fn resolve(&self, link: &Link) -> Option<&Value> {
        let pool = match link.link_type() {
            "Entry" => &self.entries,
            "Asset" => &self.assets,
            _ => return None,
        };
        pool.iter().find(|item| {
            item.get("sys")
                .and_then(|sys| sys.get("id"))
                .and_then(|id| id.as_str())
                == Some(link.id())
        })
    }
}

/// One page of a list response
#[derive(Debug, Clone)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub includes: Includes,
}

#[derive(Deserialize)]
struct RawCollection {
    sys: RawCollectionSys,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    skip: u64,
    #[serde(default)]
    limit: Option<u64>,
    items: Vec<Value>,
    #[serde(default)]
    includes: Includes,
}

#[derive(Deserialize)]
struct RawCollectionSys {
    #[serde(rename = "type")]
    kind: String,
}

impl<T: Entity> Collection<Resource<T>> {
    /// Wrap an `Array` payload whose items live under `collection`
    pub fn wrap_at(client: &Client, collection: &str, value: Value) -> Result<Self> {
        let raw: RawCollection = serde_json::from_value(value)
            .map_err(|e| Error::MalformedResponse(format!("invalid {} list: {}", T::KIND, e)))?;

        if raw.sys.kind != "Array" {
            return Err(Error::MalformedResponse(format!(
                "expected sys.type 'Array', got '{}'",
                raw.sys.kind
            )));
        }

        let count = raw.items.len() as u64;
        let total = match raw.total {
            Some(total) => total,
            None => raw.skip.checked_add(count).ok_or_else(|| {
                Error::MalformedResponse(format!(
                    "{} list skip {} is out of range",
                    T::KIND,
                    raw.skip
                ))
            })?,
        };
        let items = raw
            .items
            .into_iter()
            .map(|item| Resource::wrap_at(client, collection, item))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            items,
            total,
            skip: raw.skip,
            limit: raw.limit.unwrap_or(count),
            includes: raw.includes,
        })
    }
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether items beyond this page exist
    pub fn has_next_page(&self) -> bool {
        !self.items.is_empty() && self.skip.saturating_add(self.items.len() as u64) < self.total
    }

    /// Query for the page following this one, based on the query that produced it
    ///
    /// The next offset advances from the requested skip, not the one the
    /// server echoes back.
    pub fn next_query(&self, query: &Query) -> Option<Query> {
        if self.items.is_empty() {
            return None;
        }
        let next_skip = query
            .skip
            .unwrap_or(0)
            .checked_add(self.items.len() as u64)?;
        if next_skip >= self.total {
            return None;
        }
        let mut next = query.clone();
        next.skip = Some(next_skip);
        Some(next)
    }

    /// Resolve a link against this page's includes
    pub fn resolve_link(&self, link: &Link) -> Option<&Value> {
        self.includes.resolve(link)
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
