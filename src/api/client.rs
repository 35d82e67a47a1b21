//! Management API Client
//!
//! Top-level entry point: issues the top-of-tree requests and builds the
//! typed handles every further call goes through.

use super::config::ClientConfig;
use super::error::{Error, Result};
use super::http::{segment, HttpClient, ORGANIZATION_HEADER};
use crate::resource::{
    is_valid_id, AnyResource, Collection, Entity, Organization, Query, Resource, Space,
};
use futures::stream::{self, Stream, TryStreamExt};
use serde_json::Value;
use std::fmt;

/// Main management API client
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        tracing::debug!("Client created for {}", http.base_url());
        Ok(Self { http })
    }

    /// Create a client configured from `CONTENTFUL_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // =========================================================================
    // Spaces & organizations
    // =========================================================================

    /// List spaces visible to the credential (order is server-defined)
    pub async fn get_spaces(&self, query: &Query) -> Result<Collection<Resource<Space>>> {
        self.fetch_page("/spaces", query).await
    }

    /// Get a space by id; unknown ids fail with [`Error::NotFound`]
    pub async fn get_space(&self, id: &str) -> Result<Resource<Space>> {
        self.fetch_one("/spaces", id).await
    }

    /// List organizations the credential can act on behalf of
    pub async fn get_organizations(&self) -> Result<Collection<Resource<Organization>>> {
        self.fetch_page("/organizations", &Query::new()).await
    }

    /// Create a space
    ///
    /// `organization_id` is required when the credential belongs to more
    /// than one organization.
    pub async fn create_space(
        &self,
        space: Space,
        organization_id: Option<&str>,
    ) -> Result<Resource<Space>> {
        space.validate()?;

        let mut headers = Vec::new();
        if let Some(org) = organization_id {
            headers.push((ORGANIZATION_HEADER, org.to_string()));
        }

        let created = self.create("/spaces", &space, &headers).await?;
        tracing::info!("Created space {} ({})", created.id(), created.name);
        Ok(created)
    }

    /// Wrap a raw payload of any kind into its typed handle
    pub fn wrap(&self, value: Value) -> Result<AnyResource> {
        crate::resource::wrap(self, value)
    }

    // =========================================================================
    // Generic entity requests
    // =========================================================================

    /// GET `{collection}/{id}`
    pub async fn fetch_one<T: Entity>(&self, collection: &str, id: &str) -> Result<Resource<T>> {
        let path = format!("{}/{}", collection, segment(id));
        let value = self.http.get(&path, &[]).await?;
        let resource: Resource<T> = Resource::wrap_at(self, collection, value)?;
        if resource.id() != id {
            return Err(Error::MalformedResponse(format!(
                "expected {} '{}', got '{}'",
                T::KIND,
                id,
                resource.id()
            )));
        }
        Ok(resource)
    }

    /// GET one page of `collection`
    pub async fn fetch_page<T: Entity>(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Collection<Resource<T>>> {
        let value = self.http.get(collection, &query.to_pairs()).await?;
        Collection::wrap_at(self, collection, value)
    }

    /// POST a new entity to `collection`; the server assigns the id
    pub async fn create<T: Entity>(
        &self,
        collection: &str,
        data: &T,
        headers: &[(&str, String)],
    ) -> Result<Resource<T>> {
        let body = data.request_body()?;
        let value = self.http.post(collection, &body, headers).await?;
        Resource::wrap_at(self, collection, value)
    }

    /// PUT a new entity with a caller-chosen id
    pub async fn create_with_id<T: Entity>(
        &self,
        collection: &str,
        id: &str,
        data: &T,
        headers: &[(&str, String)],
    ) -> Result<Resource<T>> {
        if !is_valid_id(id) {
            return Err(Error::invalid(format!(
                "invalid {} id '{}': use 1-64 characters of A-Z, a-z, 0-9, '-', '_' or '.'",
                T::KIND,
                id
            )));
        }
        let body = data.request_body()?;
        let path = format!("{}/{}", collection, segment(id));
        let value = self.http.put(&path, Some(&body), None, headers).await?;
        Resource::wrap_at(self, collection, value)
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Stream every item of `collection`, fetching pages lazily
    pub fn paginate<T: Entity>(
        &self,
        collection: &str,
        query: Query,
    ) -> impl Stream<Item = Result<Resource<T>>> + Send + 'static {
        let client = self.clone();
        let collection = collection.to_string();

        stream::try_unfold(Some(query), move |state| {
            let client = client.clone();
            let collection = collection.clone();
            async move {
                let Some(query) = state else {
                    return Ok::<_, Error>(None);
                };
                let page = client.fetch_page::<T>(&collection, &query).await?;
                let next = page.next_query(&query);
                let items = stream::iter(page.items.into_iter().map(Ok::<_, Error>));
                Ok::<_, Error>(Some((items, next)))
            }
        })
        .try_flatten()
    }

    /// Fetch every page of `collection`
    pub async fn collect_all<T: Entity>(
        &self,
        collection: &str,
        query: Query,
    ) -> Result<Vec<Resource<T>>> {
        self.paginate(collection, query).try_collect().await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.http.base_url().as_str())
            .finish()
    }
}

