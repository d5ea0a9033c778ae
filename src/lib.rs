//! # Zenodo Search
//!
//! A client library for searching the Zenodo records API and downloading the
//! files attached to records.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`client`]: the [`ZenodoClient`] issuing search requests
//! - [`models`]: read-only records, file references and search parameters
//! - [`utils`]: HTTP client, file downloads and status code explanations
//! - [`config`]: Configuration management
//! - [`error`]: the crate-wide error type
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> zenodo_search::Result<()> {
//! use zenodo_search::{DownloadOptions, ZenodoClient};
//!
//! let client = ZenodoClient::new()?;
//! let records = client.search_keywords(&["turbulence", "PIV"]).await?;
//!
//! for record in &records {
//!     println!("{}", record);
//!     if let Some(files) = record.files() {
//!         let options = DownloadOptions::new().destination_dir("./data");
//!         files.download(&client, &options).await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use client::{search, search_keywords, ZenodoClient};
pub use config::ClientConfig;
pub use error::{Result, ZenodoError};
pub use models::{FieldValue, FileRef, FileSequence, Record, RecordMap, RecordSet, SearchQuery};
pub use utils::{explain_response, DownloadOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
