//! Zenodo records client.
//!
//! Uses the Zenodo records API for searching and the file links of each
//! record for downloads.
//! API documentation: <https://developers.zenodo.org>

use serde::Deserialize;
use serde_json::Value;
use std::borrow::Borrow;
use std::path::PathBuf;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Result, ZenodoError};
use crate::models::{FileRef, Record, RecordSet, ResponseInfo, SearchQuery};
use crate::utils::{self, explain_response, DownloadOptions, HttpClient};

/// Zenodo client
///
/// Every call issues exactly one request (or one per file for batch
/// downloads) and waits for it to finish before returning.
#[derive(Debug, Clone)]
pub struct ZenodoClient {
    client: HttpClient,
    config: ClientConfig,
}

impl ZenodoClient {
    /// Create a client for the public Zenodo instance
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            ZenodoError::Config(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        Ok(Self {
            client: HttpClient::from_config(&config)?,
            config,
        })
    }

    /// Create with a custom HTTP client
    pub fn with_client(client: HttpClient, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &HttpClient {
        &self.client
    }

    /// Full request URL for a query
    pub fn build_url(&self, query: &SearchQuery) -> Result<Url> {
        Url::parse_with_params(&self.config.base_url, query.params()).map_err(|e| {
            ZenodoError::Config(format!("Invalid base URL '{}': {}", self.config.base_url, e))
        })
    }

    /// Search records with a query in the Zenodo search syntax
    ///
    /// ```no_run
    /// # async fn example() -> zenodo_search::Result<()> {
    /// use zenodo_search::ZenodoClient;
    ///
    /// let client = ZenodoClient::new()?;
    /// let records = client
    ///     .search(r#"type:dataset AND creators.affiliation:("University A" OR "Cambridge")"#)
    ///     .await?;
    /// for record in &records {
    ///     println!("{}", record);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, query: &str) -> Result<RecordSet> {
        self.search_query(SearchQuery::new(query)).await
    }

    /// Search records tagged with all of the given keywords
    pub async fn search_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> Result<RecordSet> {
        self.search_query(SearchQuery::keywords(keywords)).await
    }

    /// Search records by DOI
    pub async fn search_doi(&self, doi: &str) -> Result<RecordSet> {
        self.search_query(SearchQuery::doi(doi)).await
    }

    /// Search with explicit query parameters
    pub async fn search_query(&self, query: SearchQuery) -> Result<RecordSet> {
        let url = self.build_url(&query)?;
        tracing::debug!("Searching Zenodo: {}", url);

        let response = self.client.get(url.as_str()).send().await.map_err(|e| {
            tracing::warn!("Failed to search Zenodo: {}", e);
            ZenodoError::Network(e)
        })?;

        let info = ResponseInfo::capture(response).await?;

        if info.status != 200 {
            tracing::warn!(
                "Zenodo search failed: {}",
                explain_response(&info).unwrap_or_else(|_| format!("status {}", info.status))
            );
            return Err(ZenodoError::RequestFailed {
                status: info.status,
            });
        }

        let records = parse_records(query, info)?;
        tracing::info!(
            "Zenodo search '{}' returned {} records",
            records.query_string(),
            records.len()
        );
        Ok(records)
    }

    /// Download options built from the configured defaults
    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions::from(&self.config.downloads)
    }

    /// Download one file of a record
    pub async fn download_file(&self, file: &FileRef, options: &DownloadOptions) -> Result<PathBuf> {
        utils::download_file(&self.client, file, options).await
    }

    /// Download several files in order, stopping at the first failure
    pub async fn download_files<I>(&self, files: I, options: &DownloadOptions) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator,
        I::Item: Borrow<FileRef>,
    {
        utils::download_files(&self.client, files, options).await
    }
}

/// Search the public Zenodo instance with a default client
pub async fn search(query: &str) -> Result<RecordSet> {
    ZenodoClient::new()?.search(query).await
}

/// Keyword search on the public Zenodo instance with a default client
pub async fn search_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<RecordSet> {
    ZenodoClient::new()?.search_keywords(keywords).await
}

fn parse_records(query: SearchQuery, info: ResponseInfo) -> Result<RecordSet> {
    let body: SearchBody = serde_json::from_str(&info.body)?;

    let hits = body
        .hits
        .ok_or_else(|| ZenodoError::MalformedResponse("response has no 'hits' field".to_string()))?;
    let items = hits
        .hits
        .ok_or_else(|| ZenodoError::MalformedResponse("'hits' has no 'hits' list".to_string()))?;

    let records = items
        .into_iter()
        .map(Record::from_json)
        .collect::<Result<Vec<_>>>()?;

    let total = hits.total.map(|total| match total {
        HitsTotal::Count(count) => count,
        HitsTotal::Object { value } => value,
    });

    Ok(RecordSet::new(records, query, info).with_total(total))
}

/// Zenodo API response
#[derive(Debug, Deserialize)]
struct SearchBody {
    hits: Option<SearchHits>,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    hits: Option<Vec<Value>>,
    total: Option<HitsTotal>,
}

/// Newer API versions report a bare count, older ones `{ "value": n }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HitsTotal {
    Count(u64),
    Object { value: u64 },
}
