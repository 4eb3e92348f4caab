//! HTTP client for the Globus Transfer API.

use std::fmt;

use reqwest::header::AUTHORIZATION;
use tracing::{debug, info};
use url::Url;

use super::{parse_endpoint_search, parse_ls_response, status_error, EndpointSummary};
use crate::errors::{CoreError, ListingError};
use crate::files::{DirectoryLister, ListingEntry};

/// Production Transfer API root.
pub const DEFAULT_BASE_URL: &str = "https://transfer.api.globus.org/v0.10";

/// Attaches a bearer access token to every request.
#[derive(Clone)]
pub struct AccessTokenAuthorizer {
    token: String,
}

impl AccessTokenAuthorizer {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for AccessTokenAuthorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenAuthorizer")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Authorized client for the Transfer API.
#[derive(Debug, Clone)]
pub struct TransferClient {
    http: reqwest::Client,
    base_url: Url,
    authorizer: AccessTokenAuthorizer,
}

impl TransferClient {
    pub fn new(base_url: &str, authorizer: AccessTokenAuthorizer) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CoreError::Config(format!("Invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::Config(format!(
                "Base URL cannot carry a path: {base_url}"
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("remotewalk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            authorizer,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ListingError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ListingError::Transport(format!("Base URL cannot carry a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        subject: &str,
        parse: fn(&str) -> Result<T, ListingError>,
    ) -> Result<T, ListingError> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.authorizer.authorization_header())
            .query(query)
            .send()
            .await
            .map_err(|e| ListingError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ListingError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), subject, &body));
        }
        parse(&body)
    }

    /// Full-text endpoint search, returning at most `limit` hits.
    pub async fn endpoint_search(
        &self,
        filter_fulltext: &str,
        limit: usize,
    ) -> Result<Vec<EndpointSummary>, ListingError> {
        let url = self.url(&["endpoint_search"])?;
        let limit = limit.to_string();
        self.get(
            url,
            &[("filter_fulltext", filter_fulltext), ("limit", limit.as_str())],
            filter_fulltext,
            parse_endpoint_search,
        )
        .await
    }

    /// Resolve an endpoint name to the first search hit.
    pub async fn find_endpoint(
        &self,
        name: &str,
        limit: usize,
    ) -> Result<EndpointSummary, ListingError> {
        let endpoint = self
            .endpoint_search(name, limit)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ListingError::EndpointNotFound(name.to_string()))?;
        info!("{} has ID {}", endpoint.display_name, endpoint.id);
        Ok(endpoint)
    }

    /// List one directory on an endpoint.
    pub async fn operation_ls(
        &self,
        endpoint_id: &str,
        path: &str,
    ) -> Result<Vec<ListingEntry>, ListingError> {
        let url = self.url(&["operation", "endpoint", endpoint_id, "ls"])?;
        self.get(url, &[("path", path)], path, parse_ls_response)
            .await
            .map_err(|e| match e {
                ListingError::EndpointNotFound(_) => {
                    ListingError::EndpointNotFound(endpoint_id.to_string())
                }
                other => other,
            })
    }

    /// Bind this client to one endpoint for walking.
    pub fn endpoint(&self, endpoint_id: impl Into<String>) -> EndpointLister<'_> {
        EndpointLister {
            client: self,
            endpoint_id: endpoint_id.into(),
        }
    }
}

/// A [`TransferClient`] bound to a single endpoint.
#[derive(Debug, Clone)]
pub struct EndpointLister<'a> {
    client: &'a TransferClient,
    endpoint_id: String,
}

impl EndpointLister<'_> {
    pub fn endpoint_id(&self) -> &str {
        &self.endpoint_id
    }
}

#[async_trait::async_trait]
impl DirectoryLister for EndpointLister<'_> {
    async fn list_dir(&self, path: &str) -> Result<Vec<ListingEntry>, ListingError> {
        self.client.operation_ls(&self.endpoint_id, path).await
    }
}
