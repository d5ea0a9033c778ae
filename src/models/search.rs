//! Search request parameters and response snapshots.

use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Query parameters for the records endpoint
///
/// Only `q` is required. The optional parameters are sent only when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QueryFields")]
pub struct SearchQuery {
    /// Query string in the Zenodo search syntax, already sanitized
    q: String,

    /// Number of hits per page
    pub size: Option<usize>,

    /// Sort order, e.g. `mostrecent` or `bestmatch`
    pub sort: Option<String>,

    /// Resource type filter, e.g. `dataset` or `publication`
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
}

impl SearchQuery {
    /// Create a new search query
    ///
    /// The Zenodo query parser mishandles `/`, so every `/` is replaced
    /// with the `*` wildcard.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            q: sanitize(&query.into()),
            size: None,
            sort: None,
            resource_type: None,
        }
    }

    /// Query matching records tagged with all of the given keywords
    pub fn keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        let joined = keywords
            .iter()
            .map(|k| format!("\"{}\"", k.as_ref()))
            .collect::<Vec<_>>()
            .join(" AND ");
        Self::new(format!("keywords:({})", joined))
    }

    /// Query matching a DOI, accepting `doi:` and resolver URL prefixes
    ///
    /// The DOI is left unquoted: its `/` turns into a wildcard, which would
    /// be taken literally inside a quoted phrase.
    pub fn doi(doi: &str) -> Self {
        let clean_doi = doi
            .replace("https://doi.org/", "")
            .replace("doi:", "")
            .trim()
            .to_string();
        Self::new(format!("doi:{}", clean_doi))
    }

    /// Set page size
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set sort order
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set resource type filter
    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn q(&self) -> &str {
        &self.q
    }

    /// Parameters in the order they are appended to the URL
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.q.clone())];
        if let Some(size) = self.size {
            params.push(("size", size.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(resource_type) = &self.resource_type {
            params.push(("type", resource_type.clone()));
        }
        params
    }
}

fn sanitize(query: &str) -> String {
    query.replace('/', "*")
}

/// Deserialized form of [`SearchQuery`], sanitized on conversion
#[derive(Deserialize)]
struct QueryFields {
    q: String,
    #[serde(default)]
    size: Option<usize>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default, rename = "type")]
    resource_type: Option<String>,
}

impl From<QueryFields> for SearchQuery {
    fn from(fields: QueryFields) -> Self {
        Self {
            size: fields.size,
            sort: fields.sort,
            resource_type: fields.resource_type,
            ..Self::new(fields.q)
        }
    }
}

/// Snapshot of an HTTP response
///
/// The body is kept as text so the response stays inspectable after the
/// connection has been released.
#[derive(Debug, Clone, Default)]
pub struct ResponseInfo {
    /// HTTP status code
    pub status: u16,

    /// Final URL after redirects
    pub url: String,

    /// Response headers
    pub headers: HeaderMap,

    /// Raw response body
    pub body: String,
}

impl ResponseInfo {
    /// Read the full body of a response and keep its metadata
    pub async fn capture(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(Self {
            status,
            url,
            headers,
            body,
        })
    }

    /// Standard reason phrase of the status code
    pub fn reason(&self) -> Option<&'static str> {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
    }
}
