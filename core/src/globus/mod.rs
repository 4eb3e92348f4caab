//! Globus Transfer REST API support.
//!
//! Only the two read-only calls the walker needs are implemented: endpoint
//! search (to resolve an endpoint name to its id) and `ls` on an endpoint.
//! The access token is obtained elsewhere and handed in through an
//! [`AccessTokenAuthorizer`].

pub mod client;

pub use client::{AccessTokenAuthorizer, EndpointLister, TransferClient, DEFAULT_BASE_URL};

use serde::{Deserialize, Serialize};

use crate::errors::ListingError;
use crate::files::ListingEntry;

/// An endpoint returned by endpoint search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSummary {
    pub id: String,
    pub display_name: String,
}

/// Envelope shared by Transfer list responses.
#[derive(Debug, Deserialize)]
struct DataList<T> {
    #[serde(rename = "DATA", default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct RawEndpoint {
    id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    canonical_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFileEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode an `operation/endpoint/{id}/ls` response body.
///
/// Only `"file"` entries are files; every other type (`dir`, `link`, ...)
/// is treated as something to descend into.
pub fn parse_ls_response(body: &str) -> Result<Vec<ListingEntry>, ListingError> {
    let list: DataList<RawFileEntry> = serde_json::from_str(body)
        .map_err(|e| ListingError::InvalidResponse(format!("ls response: {e}")))?;
    Ok(list
        .data
        .into_iter()
        .map(|raw| {
            if raw.kind == "file" {
                ListingEntry::file(raw.name)
            } else {
                ListingEntry::directory(raw.name)
            }
        })
        .collect())
}

/// Decode an `endpoint_search` response body.
///
/// Endpoints without a display name fall back to their canonical name.
pub fn parse_endpoint_search(body: &str) -> Result<Vec<EndpointSummary>, ListingError> {
    let list: DataList<RawEndpoint> = serde_json::from_str(body)
        .map_err(|e| ListingError::InvalidResponse(format!("endpoint_search response: {e}")))?;
    Ok(list
        .data
        .into_iter()
        .map(|raw| EndpointSummary {
            display_name: raw
                .display_name
                .or(raw.canonical_name)
                .unwrap_or_default(),
            id: raw.id,
        })
        .collect())
}

/// Map a non-success HTTP status to a [`ListingError`].
///
/// `subject` names what was being requested (a path or a search term). A 404
/// whose `code` is `EndpointNotFound` is reported as such, carrying the
/// server's message; callers that know the endpoint id replace it.
pub fn status_error(status: u16, subject: &str, body: &str) -> ListingError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone())
        .or_else(|| parsed.as_ref().and_then(|b| b.code.clone()))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no message".to_string()
            } else {
                trimmed.to_string()
            }
        });

    let code = parsed.as_ref().and_then(|b| b.code.as_deref());
    match status {
        401 | 403 => ListingError::Unauthorized(message),
        404 if code == Some("EndpointNotFound") => ListingError::EndpointNotFound(message),
        404 => ListingError::NotFound(subject.to_string()),
        _ => ListingError::Remote { status, message },
    }
}
