//! Entries
//!
//! Entry fields are keyed by field id, then by locale code:
//! `{"title": {"en-US": "Hello", "de-DE": "Hallo"}}`.

use super::handle::{Archivable, Entity, Mutable, Publishable, Resource};
use super::sys::Link;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Values of one field per locale code
pub type Localized<T> = BTreeMap<String, T>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub fields: BTreeMap<String, Localized<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Entry::set_field`]
    pub fn with_field(mut self, field_id: &str, locale: &str, value: impl Into<Value>) -> Self {
        self.set_field(field_id, locale, value);
        self
    }

    pub fn field(&self, field_id: &str, locale: &str) -> Option<&Value> {
        self.fields.get(field_id).and_then(|values| values.get(locale))
    }

    pub fn set_field(&mut self, field_id: &str, locale: &str, value: impl Into<Value>) {
        self.fields
            .entry(field_id.to_string())
            .or_default()
            .insert(locale.to_string(), value.into());
    }

    /// Remove one locale's value; drops the field once no locale is left
    pub fn remove_field(&mut self, field_id: &str, locale: &str) -> Option<Value> {
        let values = self.fields.get_mut(field_id)?;
        let removed = values.remove(locale);
        if values.is_empty() {
            self.fields.remove(field_id);
        }
        removed
    }

    /// Link stored in a link field
    pub fn link(&self, field_id: &str, locale: &str) -> Option<Link> {
        self.field(field_id, locale)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

impl Entity for Entry {
    const KIND: &'static str = "Entry";
    const COLLECTION: &'static str = "entries";
}

impl Mutable for Entry {}
impl Publishable for Entry {}
impl Archivable for Entry {}

impl Resource<Entry> {
    /// Id of the content type this entry was created from
    pub fn content_type_id(&self) -> Option<&str> {
        self.sys().content_type.as_ref().map(|link| link.id())
    }
}
