//! Management API interaction module
//!
//! This module provides the transport layer for the content management
//! API: credentials, configuration, the HTTP client and error mapping.
//!
//! # Module Structure
//!
//! - [`auth`] - Bearer access token
//! - [`config`] - Host, scheme and timeout settings
//! - [`client`] - Main client issuing top-level requests
//! - [`http`] - HTTP utilities for REST API calls
//! - [`error`] - Error kinds and parsed error payloads
//!
//! # Example
//!
//! ```no_run
//! use cma::{AccessToken, Client, ClientConfig, Query};
//!
//! async fn example() -> cma::Result<()> {
//!     let config = ClientConfig::new(AccessToken::new("CFPAT-...")?);
//!     let client = Client::new(config)?;
//!     let spaces = client.get_spaces(&Query::new()).await?;
//!     println!("{} spaces", spaces.total);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
