//! Resource abstraction layer
//!
//! Typed handles over the entities of the management API.
//!
//! # Architecture
//!
//! - [`sys`] - `sys` envelope, links and id helpers
//! - [`handle`] - [`Resource`] handle with the `update`/`delete` lifecycle
//! - [`collection`] - list responses, queries and link includes
//! - [`any`] - wraps payloads of unknown kind by `sys.type`
//! - one module per entity kind, holding its data fields
//!
//! # Example
//!
//! ```no_run
//! use cma::{Client, ClientConfig, Locale, Space};
//!
//! async fn example(config: ClientConfig) -> cma::Result<()> {
//!     let client = Client::new(config)?;
//!     let space = client.create_space(Space::new("spacename"), None).await?;
//!     space.create_locale(Locale::new("German (Germany)", "de-DE")).await?;
//!
//!     let mut renamed = space.clone();
//!     renamed.name = "updatedspacename".to_string();
//!     let mut updated = renamed.update().await?;
//!     updated.delete().await?;
//!     Ok(())
//! }
//! ```

pub mod any;
pub mod api_key;
pub mod asset;
pub mod collection;
pub mod content_type;
pub mod entry;
pub mod handle;
pub mod locale;
pub mod membership;
pub mod organization;
pub mod role;
pub mod space;
pub mod sys;
pub mod webhook;

pub use any::{wrap, AnyResource};
pub use api_key::ApiKey;
pub use asset::{Asset, AssetFields, AssetFile};
pub use collection::{Collection, Includes, Query, MAX_PAGE_SIZE};
pub use content_type::{ContentType, Field};
pub use entry::{Entry, Localized};
pub use handle::{parse_envelope, Archivable, Entity, Mutable, Publishable, Resource};
pub use locale::Locale;
pub use membership::SpaceMembership;
pub use organization::Organization;
pub use role::{Effect, Policy, Role};
pub use space::Space;
pub use sys::{is_valid_id, random_id, Link, LinkSys, Sys};
pub use webhook::{Webhook, WebhookHeader};
