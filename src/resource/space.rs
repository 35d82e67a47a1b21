//! Spaces
//!
//! A space is the tenant container every other resource lives in. Child
//! resources are created and listed through a [`Resource<Space>`] handle, so
//! a space's children can only be touched once its create (or get) response
//! has been received.

use super::api_key::ApiKey;
use super::asset::Asset;
use super::collection::{Collection, Query};
use super::content_type::ContentType;
use super::entry::Entry;
use super::handle::{Entity, Mutable, Resource};
use super::locale::Locale;
use super::membership::SpaceMembership;
use super::role::Role;
use super::webhook::Webhook;
use crate::api::error::{Error, Result};
use crate::api::http::CONTENT_TYPE_HEADER;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub name: String,
    /// Only honoured on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Space {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default_locale: None,
            extra: Map::new(),
        }
    }

    pub fn with_default_locale(mut self, code: &str) -> Self {
        self.default_locale = Some(code.to_string());
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("space name is required"));
        }
        Ok(())
    }
}

impl Entity for Space {
    const KIND: &'static str = "Space";
    const COLLECTION: &'static str = "spaces";
    const SPACE_SCOPED: bool = false;
}

impl Mutable for Space {}

impl Resource<Space> {
    fn children<T: Entity>(&self) -> String {
        format!("{}/{}", self.path(), T::COLLECTION)
    }

    async fn get_child<T: Entity>(&self, id: &str) -> Result<Resource<T>> {
        self.ensure_live()?;
        self.client().fetch_one(&self.children::<T>(), id).await
    }

    async fn get_children<T: Entity>(&self, query: &Query) -> Result<Collection<Resource<T>>> {
        self.ensure_live()?;
        self.client().fetch_page(&self.children::<T>(), query).await
    }

    async fn create_child<T: Entity>(
        &self,
        data: &T,
        headers: &[(&str, String)],
    ) -> Result<Resource<T>> {
        self.ensure_live()?;
        self.client().create(&self.children::<T>(), data, headers).await
    }

    async fn create_child_with_id<T: Entity>(
        &self,
        id: &str,
        data: &T,
        headers: &[(&str, String)],
    ) -> Result<Resource<T>> {
        self.ensure_live()?;
        self.client()
            .create_with_id(&self.children::<T>(), id, data, headers)
            .await
    }

    // =========================================================================
    // Locales
    // =========================================================================

    pub async fn get_locales(&self) -> Result<Collection<Resource<Locale>>> {
        self.get_children(&Query::new()).await
    }

    pub async fn get_locale(&self, id: &str) -> Result<Resource<Locale>> {
        self.get_child(id).await
    }

    pub async fn create_locale(&self, locale: Locale) -> Result<Resource<Locale>> {
        if locale.name.trim().is_empty() || locale.code.trim().is_empty() {
            return Err(Error::invalid("locale name and code are required"));
        }
        tracing::info!("Creating locale {} in space {}", locale.code, self.id());
        self.create_child(&locale, &[]).await
    }

    // =========================================================================
    // Content types
    // =========================================================================

    pub async fn get_content_types(
        &self,
        query: &Query,
    ) -> Result<Collection<Resource<ContentType>>> {
        self.get_children(query).await
    }

    pub async fn get_content_type(&self, id: &str) -> Result<Resource<ContentType>> {
        self.get_child(id).await
    }

    pub async fn create_content_type(
        &self,
        content_type: ContentType,
    ) -> Result<Resource<ContentType>> {
        if content_type.name.trim().is_empty() {
            return Err(Error::invalid("content type name is required"));
        }
        self.create_child(&content_type, &[]).await
    }

    pub async fn create_content_type_with_id(
        &self,
        id: &str,
        content_type: ContentType,
    ) -> Result<Resource<ContentType>> {
        if content_type.name.trim().is_empty() {
            return Err(Error::invalid("content type name is required"));
        }
        self.create_child_with_id(id, &content_type, &[]).await
    }

    // =========================================================================
    // Entries
    // =========================================================================

    pub async fn get_entries(&self, query: &Query) -> Result<Collection<Resource<Entry>>> {
        self.get_children(query).await
    }

    pub async fn get_entry(&self, id: &str) -> Result<Resource<Entry>> {
        self.get_child(id).await
    }

    /// Create an entry of the content type `content_type_id`
    pub async fn create_entry(
        &self,
        content_type_id: &str,
        entry: Entry,
    ) -> Result<Resource<Entry>> {
        let headers = [(CONTENT_TYPE_HEADER, content_type_id.to_string())];
        self.create_child(&entry, &headers).await
    }

    pub async fn create_entry_with_id(
        &self,
        content_type_id: &str,
        id: &str,
        entry: Entry,
    ) -> Result<Resource<Entry>> {
        let headers = [(CONTENT_TYPE_HEADER, content_type_id.to_string())];
        self.create_child_with_id(id, &entry, &headers).await
    }

    // =========================================================================
    // Assets
    // =========================================================================

    pub async fn get_assets(&self, query: &Query) -> Result<Collection<Resource<Asset>>> {
        self.get_children(query).await
    }

    pub async fn get_asset(&self, id: &str) -> Result<Resource<Asset>> {
        self.get_child(id).await
    }

    pub async fn create_asset(&self, asset: Asset) -> Result<Resource<Asset>> {
        self.create_child(&asset, &[]).await
    }

    pub async fn create_asset_with_id(&self, id: &str, asset: Asset) -> Result<Resource<Asset>> {
        self.create_child_with_id(id, &asset, &[]).await
    }

    // =========================================================================
    // Webhooks
    // =========================================================================

    pub async fn get_webhooks(&self) -> Result<Collection<Resource<Webhook>>> {
        self.get_children(&Query::new()).await
    }

    pub async fn get_webhook(&self, id: &str) -> Result<Resource<Webhook>> {
        self.get_child(id).await
    }

    pub async fn create_webhook(&self, webhook: Webhook) -> Result<Resource<Webhook>> {
        if webhook.url.trim().is_empty() {
            return Err(Error::invalid("webhook url is required"));
        }
        self.create_child(&webhook, &[]).await
    }

    // =========================================================================
    // Access control
    // =========================================================================

    pub async fn get_space_memberships(&self) -> Result<Collection<Resource<SpaceMembership>>> {
        self.get_children(&Query::new()).await
    }

    pub async fn get_space_membership(&self, id: &str) -> Result<Resource<SpaceMembership>> {
        self.get_child(id).await
    }

    pub async fn create_space_membership(
        &self,
        membership: SpaceMembership,
    ) -> Result<Resource<SpaceMembership>> {
        if !membership.admin && membership.roles.is_empty() {
            return Err(Error::invalid(
                "a membership needs admin access or at least one role",
            ));
        }
        self.create_child(&membership, &[]).await
    }

    pub async fn get_roles(&self) -> Result<Collection<Resource<Role>>> {
        self.get_children(&Query::new()).await
    }

    pub async fn get_role(&self, id: &str) -> Result<Resource<Role>> {
        self.get_child(id).await
    }

    pub async fn create_role(&self, role: Role) -> Result<Resource<Role>> {
        self.create_child(&role, &[]).await
    }

    pub async fn get_api_keys(&self) -> Result<Collection<Resource<ApiKey>>> {
        self.get_children(&Query::new()).await
    }

    pub async fn get_api_key(&self, id: &str) -> Result<Resource<ApiKey>> {
        self.get_child(id).await
    }

    pub async fn create_api_key(&self, api_key: ApiKey) -> Result<Resource<ApiKey>> {
        self.create_child(&api_key, &[]).await
    }
}
