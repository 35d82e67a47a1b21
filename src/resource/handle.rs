//! Resource handles
//!
//! A [`Resource`] wraps one server response: the `sys` envelope plus the
//! typed data fields of its entity kind. Mutating verbs send the handle's
//! last-known `sys.version` and return a fresh handle built from the
//! response, so a failed call never alters the handle it was made on.

use super::sys::Sys;
use crate::api::client::Client;
use crate::api::error::{Error, Result};
use crate::api::http::segment;
use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// An entity kind of the management API
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Value of `sys.type`
    const KIND: &'static str;
    /// Path segment of the collection holding this kind
    const COLLECTION: &'static str;
    /// Whether the collection lives under `/spaces/{space}`
    const SPACE_SCOPED: bool = true;
    /// Whether payloads must carry `sys.version`
    const VERSIONED: bool = true;

    /// Collection path for an entity with this envelope
    fn collection_path(sys: &Sys) -> Result<String> {
        if !Self::SPACE_SCOPED {
            return Ok(format!("/{}", Self::COLLECTION));
        }
        let space_id = sys.space_id().ok_or_else(|| {
            Error::MalformedResponse(format!("{} '{}' has no sys.space", Self::KIND, sys.id))
        })?;
        Ok(format!("/spaces/{}/{}", segment(space_id), Self::COLLECTION))
    }

    /// Body sent when creating or replacing an entity of this kind
    fn request_body(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Kinds that support `update` and `delete`
pub trait Mutable: Entity {}

/// Kinds that support `publish` and `unpublish`
pub trait Publishable: Mutable {}

/// Kinds that support `archive` and `unarchive`
pub trait Archivable: Mutable {}

/// Split a raw payload into its validated `sys` envelope and typed data
pub fn parse_envelope<T: Entity>(value: Value) -> Result<(Sys, T)> {
    let Value::Object(mut map) = value else {
        return Err(Error::MalformedResponse(format!(
            "expected a {} object",
            T::KIND
        )));
    };

    let sys_value = map
        .remove("sys")
        .ok_or_else(|| Error::MalformedResponse(format!("{} payload has no sys", T::KIND)))?;
    let sys: Sys = serde_json::from_value(sys_value)
        .map_err(|e| Error::MalformedResponse(format!("invalid sys: {}", e)))?;
    sys.validate(T::KIND, T::VERSIONED)?;

    let data = serde_json::from_value(Value::Object(map)).map_err(|e| {
        Error::MalformedResponse(format!("invalid {} '{}': {}", T::KIND, sys.id, e))
    })?;

    Ok((sys, data))
}

/// Handle to a server-side entity
#[derive(Clone)]
pub struct Resource<T> {
    client: Client,
    path: String,
    sys: Sys,
    data: T,
    deleted: bool,
}

impl<T: Entity> Resource<T> {
    /// Wrap a raw payload, deriving the entity path from its `sys` envelope
    pub fn wrap(client: &Client, value: Value) -> Result<Self> {
        let (sys, data) = parse_envelope::<T>(value)?;
        let collection = T::collection_path(&sys)?;
        Ok(Self::from_parts(client, &collection, sys, data))
    }

    /// Wrap a raw payload known to belong to `collection`
    pub fn wrap_at(client: &Client, collection: &str, value: Value) -> Result<Self> {
        let (sys, data) = parse_envelope::<T>(value)?;
        Ok(Self::from_parts(client, collection, sys, data))
    }

    fn from_parts(client: &Client, collection: &str, sys: Sys, data: T) -> Self {
        let path = format!("{}/{}", collection.trim_end_matches('/'), segment(&sys.id));
        Self {
            client: client.clone(),
            path,
            sys,
            data,
            deleted: false,
        }
    }

    pub fn sys(&self) -> &Sys {
        &self.sys
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn version(&self) -> Option<u64> {
        self.sys.version
    }

    /// API path of this entity, e.g. `/spaces/abc/locales/xyz`
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    /// Fetch the current server state of this entity
    pub async fn refresh(&self) -> Result<Self> {
        self.ensure_live()?;
        let value = self.client.http().get(&self.path, &[]).await?;
        self.rewrap(value)
    }

    /// Full payload (`sys` plus data fields) as JSON
    pub fn to_value(&self) -> Result<Value> {
        let mut value = serde_json::to_value(&self.data)?;
        if let Value::Object(map) = &mut value {
            map.insert("sys".to_string(), serde_json::to_value(&self.sys)?);
        }
        Ok(value)
    }

    pub(crate) fn ensure_live(&self) -> Result<()> {
        if self.deleted {
            return Err(Error::not_found_locally(format!(
                "{} '{}' was deleted",
                T::KIND,
                self.sys.id
            )));
        }
        Ok(())
    }

    pub(crate) fn require_version(&self) -> Result<u64> {
        self.sys.version.ok_or_else(|| {
            Error::MalformedResponse(format!("{} '{}' has no sys.version", T::KIND, self.sys.id))
        })
    }

    /// Build a handle for a response to a request on this entity
    pub(crate) fn rewrap(&self, value: Value) -> Result<Self> {
        let (sys, data) = parse_envelope::<T>(value)?;
        if sys.id != self.sys.id {
            return Err(Error::MalformedResponse(format!(
                "expected {} '{}', got '{}'",
                T::KIND,
                self.sys.id,
                sys.id
            )));
        }
        Ok(Self {
            client: self.client.clone(),
            path: self.path.clone(),
            sys,
            data,
            deleted: false,
        })
    }
}

impl<T: Mutable> Resource<T> {
    /// Send the in-memory fields as a full replacement
    ///
    /// Returns a new handle carrying the incremented version. A stale
    /// version fails with [`Error::VersionMismatch`].
    pub async fn update(&self) -> Result<Self> {
        self.ensure_live()?;
        let version = self.require_version()?;
        let body = self.data.request_body()?;

        tracing::debug!("Updating {} {} at version {}", T::KIND, self.sys.id, version);
        let value = self
            .client
            .http()
            .put(&self.path, Some(&body), Some(version), &[])
            .await?;
        self.rewrap(value)
    }

    /// Remove the entity on the server
    ///
    /// On success the handle is marked deleted; any later verb fails with
    /// [`Error::NotFound`].
    pub async fn delete(&mut self) -> Result<()> {
        self.ensure_live()?;
        let version = self.require_version()?;

        self.client.http().delete(&self.path, Some(version)).await?;
        tracing::info!("Deleted {} {}", T::KIND, self.sys.id);
        self.deleted = true;
        Ok(())
    }

    /// PUT to a sub-path of this entity carrying the version, e.g. `published`
    pub(crate) async fn put_action(&self, action: &str) -> Result<Self> {
        self.ensure_live()?;
        let version = self.require_version()?;
        let path = format!("{}/{}", self.path, action);
        let value = self.client.http().put(&path, None, Some(version), &[]).await?;
        self.rewrap(value)
    }

    /// DELETE on a sub-path of this entity carrying the version
    pub(crate) async fn delete_action(&self, action: &str) -> Result<Self> {
        self.ensure_live()?;
        let version = self.require_version()?;
        let path = format!("{}/{}", self.path, action);
        let value = self.client.http().delete(&path, Some(version)).await?;
        self.rewrap(value)
    }
}

impl<T: Publishable> Resource<T> {
    pub async fn publish(&self) -> Result<Self> {
        tracing::info!("Publishing {} {}", T::KIND, self.sys.id);
        self.put_action("published").await
    }

    pub async fn unpublish(&self) -> Result<Self> {
        tracing::info!("Unpublishing {} {}", T::KIND, self.sys.id);
        self.delete_action("published").await
    }

    pub fn is_published(&self) -> bool {
        self.sys.is_published()
    }

    pub fn is_draft(&self) -> bool {
        self.sys.is_draft()
    }

    pub fn is_updated(&self) -> bool {
        self.sys.is_updated()
    }
}

impl<T: Archivable> Resource<T> {
    pub async fn archive(&self) -> Result<Self> {
        tracing::info!("Archiving {} {}", T::KIND, self.sys.id);
        self.put_action("archived").await
    }

    pub async fn unarchive(&self) -> Result<Self> {
        tracing::info!("Unarchiving {} {}", T::KIND, self.sys.id);
        self.delete_action("archived").await
    }

    pub fn is_archived(&self) -> bool {
        self.sys.is_archived()
    }
}

impl<T> Deref for Resource<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for Resource<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T: fmt::Debug> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.path)
            .field("sys", &self.sys)
            .field("data", &self.data)
            .field("deleted", &self.deleted)
            .finish()
    }
}

impl<T: Entity> Serialize for Resource<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
