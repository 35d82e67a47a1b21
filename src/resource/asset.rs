//! Assets
//!
//! File-backed content. The file of each locale is first referenced by an
//! `upload` URL, then processed by the server, which replaces it with a `url`.

use super::entry::Localized;
use super::handle::{Archivable, Entity, Mutable, Publishable, Resource};
use crate::api::error::Result;
use crate::api::http::segment;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    pub file_name: String,
    pub content_type: String,
    /// Source URL before processing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<String>,
    /// Delivery URL after processing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Size and image dimensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AssetFile {
    pub fn from_upload(file_name: &str, content_type: &str, upload: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            upload: Some(upload.to_string()),
            url: None,
            details: None,
        }
    }

    pub fn is_processed(&self) -> bool {
        self.url.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Localized<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Localized<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Localized<AssetFile>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub fields: AssetFields,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, locale: &str, title: &str) -> Self {
        self.fields
            .title
            .get_or_insert_with(Localized::new)
            .insert(locale.to_string(), title.to_string());
        self
    }

    pub fn with_description(mut self, locale: &str, description: &str) -> Self {
        self.fields
            .description
            .get_or_insert_with(Localized::new)
            .insert(locale.to_string(), description.to_string());
        self
    }

    pub fn with_file(mut self, locale: &str, file: AssetFile) -> Self {
        self.fields
            .file
            .get_or_insert_with(Localized::new)
            .insert(locale.to_string(), file);
        self
    }

    pub fn title(&self, locale: &str) -> Option<&str> {
        self.fields.title.as_ref()?.get(locale).map(String::as_str)
    }

    pub fn file(&self, locale: &str) -> Option<&AssetFile> {
        self.fields.file.as_ref()?.get(locale)
    }

    /// Locale codes that carry a file
    pub fn file_locales(&self) -> Vec<String> {
        self.fields
            .file
            .as_ref()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Entity for Asset {
    const KIND: &'static str = "Asset";
    const COLLECTION: &'static str = "assets";
}

impl Mutable for Asset {}
impl Publishable for Asset {}
impl Archivable for Asset {}

impl Resource<Asset> {
    /// Ask the server to process the file of one locale
    ///
    /// Processing runs asynchronously on the server; fetch the asset again
    /// with [`Resource::refresh`] to see the processed `url`.
    pub async fn process_for_locale(&self, locale: &str) -> Result<()> {
        self.ensure_live()?;
        let version = self.require_version()?;
        let path = format!("{}/files/{}/process", self.path(), segment(locale));

        tracing::info!("Processing asset {} for locale {}", self.id(), locale);
        self.client()
            .http()
            .put(&path, None, Some(version), &[])
            .await?;
        Ok(())
    }

    /// Process the file of every locale that has one
    pub async fn process_for_all_locales(&self) -> Result<()> {
        for locale in self.file_locales() {
            self.process_for_locale(&locale).await?;
        }
        Ok(())
    }
}
