//! Kind-dispatching wrapper
//!
//! Turns a raw payload of unknown kind into a typed handle by looking at
//! its `sys.type`.

use super::api_key::ApiKey;
use super::asset::Asset;
use super::content_type::ContentType;
use super::entry::Entry;
use super::handle::{Entity, Resource};
use super::locale::Locale;
use super::membership::SpaceMembership;
use super::organization::Organization;
use super::role::Role;
use super::space::Space;
use super::sys::Sys;
use super::webhook::Webhook;
use crate::api::client::Client;
use crate::api::error::{Error, Result};
use serde_json::Value;

/// A handle of any supported kind
#[derive(Debug, Clone)]
pub enum AnyResource {
    Space(Resource<Space>),
    Organization(Resource<Organization>),
    Locale(Resource<Locale>),
    ContentType(Resource<ContentType>),
    Entry(Resource<Entry>),
    Asset(Resource<Asset>),
    Webhook(Resource<Webhook>),
    SpaceMembership(Resource<SpaceMembership>),
    Role(Resource<Role>),
    ApiKey(Resource<ApiKey>),
}

impl AnyResource {
    pub fn kind(&self) -> &'static str {
        match self {
            AnyResource::Space(_) => Space::KIND,
            AnyResource::Organization(_) => Organization::KIND,
            AnyResource::Locale(_) => Locale::KIND,
            AnyResource::ContentType(_) => ContentType::KIND,
            AnyResource::Entry(_) => Entry::KIND,
            AnyResource::Asset(_) => Asset::KIND,
            AnyResource::Webhook(_) => Webhook::KIND,
            AnyResource::SpaceMembership(_) => SpaceMembership::KIND,
            AnyResource::Role(_) => Role::KIND,
            AnyResource::ApiKey(_) => ApiKey::KIND,
        }
    }

    pub fn sys(&self) -> &Sys {
        match self {
            AnyResource::Space(r) => r.sys(),
            AnyResource::Organization(r) => r.sys(),
            AnyResource::Locale(r) => r.sys(),
            AnyResource::ContentType(r) => r.sys(),
            AnyResource::Entry(r) => r.sys(),
            AnyResource::Asset(r) => r.sys(),
            AnyResource::Webhook(r) => r.sys(),
            AnyResource::SpaceMembership(r) => r.sys(),
            AnyResource::Role(r) => r.sys(),
            AnyResource::ApiKey(r) => r.sys(),
        }
    }

    pub fn id(&self) -> &str {
        &self.sys().id
    }
}

/// Wrap a raw entity payload into the handle matching its `sys.type`
///
/// Space-scoped kinds must carry `sys.space` so the handle knows its path.
pub fn wrap(client: &Client, value: Value) -> Result<AnyResource> {
    let kind = value
        .get("sys")
        .and_then(|sys| sys.get("type"))
        .and_then(|kind| kind.as_str())
        .ok_or_else(|| Error::MalformedResponse("payload has no sys.type".to_string()))?
        .to_string();

    tracing::debug!("Wrapping {} payload", kind);

    let resource = match kind.as_str() {
        "Space" => AnyResource::Space(Resource::wrap(client, value)?),
        "Organization" => AnyResource::Organization(Resource::wrap(client, value)?),
        "Locale" => AnyResource::Locale(Resource::wrap(client, value)?),
        "ContentType" => AnyResource::ContentType(Resource::wrap(client, value)?),
        "Entry" => AnyResource::Entry(Resource::wrap(client, value)?),
        "Asset" => AnyResource::Asset(Resource::wrap(client, value)?),
        "WebhookDefinition" => AnyResource::Webhook(Resource::wrap(client, value)?),
        "SpaceMembership" => AnyResource::SpaceMembership(Resource::wrap(client, value)?),
        "Role" => AnyResource::Role(Resource::wrap(client, value)?),
        "ApiKey" => AnyResource::ApiKey(Resource::wrap(client, value)?),
        other => {
            return Err(Error::MalformedResponse(format!(
                "unsupported entity type '{}'",
                other
            )))
        }
    };

    Ok(resource)
}
