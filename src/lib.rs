//! Client SDK for a hosted content management API
//!
//! Spaces, content types, entries, assets, locales, webhooks, memberships,
//! roles and API keys are exposed as typed [`Resource`] handles. Each
//! handle mirrors one server response and offers verbs (`update`, `delete`,
//! `publish`, child factories such as `create_locale`) that re-sync with
//! the server under optimistic concurrency: mutations carry the handle's
//! `sys.version`, and a stale version fails with [`Error::VersionMismatch`].
//!
//! No request is retried; every failure surfaces as an [`Error`] value.

pub mod api;
pub mod resource;

pub use api::auth::AccessToken;
pub use api::client::Client;
pub use api::config::ClientConfig;
pub use api::error::{format_error, Error, ErrorDetails, Result};
pub use resource::{
    random_id, wrap, AnyResource, ApiKey, Asset, AssetFile, Collection, ContentType, Entity,
    Entry, Field, Link, Locale, Organization, Query, Resource, Role, Space, SpaceMembership, Sys,
    Webhook,
};
