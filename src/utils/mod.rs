//! Utility modules supporting search and download operations.
//!
//! - [`HttpClient`]: shared HTTP client with the crate's user agent
//! - [`download_file`] / [`download_files`]: write record files to disk
//! - [`DownloadOptions`]: target directory and timeout for downloads
//! - [`explain_response`]: describe the status codes the Zenodo API returns
//!
//! # Explaining status codes
//!
//! ```rust
//! use zenodo_search::utils::explain_response;
//!
//! let text = explain_response(404u16).unwrap();
//! assert!(text.starts_with("404: Not Found: "));
//! ```

mod download;
mod explain;
mod http;

pub use download::{download_file, download_files, DownloadOptions};
pub use explain::{description, explain_response, reason_phrase, StatusInput};
pub use self::http::{HttpClient, DEFAULT_USER_AGENT};
