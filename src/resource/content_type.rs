//! Content types
//!
//! A content type is the schema entries of a space are validated against.

use super::handle::{Entity, Mutable, Publishable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One field of a content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub name: String,
    /// `Symbol`, `Text`, `Integer`, `Number`, `Date`, `Boolean`, `Location`,
    /// `Object`, `RichText`, `Link` or `Array`
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub omitted: bool,
    /// `Entry` or `Asset` for link fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    /// Item schema for array fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<Value>,
}

impl Field {
    pub fn new(id: &str, name: &str, field_type: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            field_type: field_type.to_string(),
            localized: false,
            required: false,
            disabled: false,
            omitted: false,
            link_type: None,
            items: None,
            validations: Vec::new(),
        }
    }

    /// Link field pointing at entries or assets
    pub fn link(id: &str, name: &str, link_type: &str) -> Self {
        Self {
            link_type: Some(link_type.to_string()),
            ..Self::new(id, name, "Link")
        }
    }

    pub fn localized(mut self) -> Self {
        self.localized = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Id of the field used as the entry title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentType {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            display_field: None,
            fields: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_display_field(mut self, field_id: &str) -> Self {
        self.display_field = Some(field_id.to_string());
        self
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }
}

impl Entity for ContentType {
    const KIND: &'static str = "ContentType";
    const COLLECTION: &'static str = "content_types";
}

impl Mutable for ContentType {}
impl Publishable for ContentType {}
