//! Downloading record files to the local filesystem.

use std::borrow::Borrow;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::config::DownloadConfig;
use crate::error::{Result, ZenodoError};
use crate::models::FileRef;
use crate::utils::HttpClient;

/// Where and how to store downloaded files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Target directory; files land in the working directory when unset
    pub destination_dir: Option<PathBuf>,

    /// Timeout for each file request
    pub timeout: Option<Duration>,
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target directory
    pub fn destination_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.destination_dir = Some(dir.into());
        self
    }

    /// Set the per-file request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Path a file with the given key is written to
    ///
    /// The key must be a plain file name. Keys with directory parts, `..`
    /// or a root would place the file outside the destination directory.
    pub fn target_path(&self, key: &str) -> Result<PathBuf> {
        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(ZenodoError::MalformedInput(format!(
                    "file key '{}' is not a plain file name",
                    key
                )))
            }
        }

        Ok(match &self.destination_dir {
            Some(dir) => dir.join(key),
            None => PathBuf::from(key),
        })
    }
}

impl From<&DownloadConfig> for DownloadOptions {
    fn from(config: &DownloadConfig) -> Self {
        Self {
            destination_dir: config.destination_dir.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Download one file, returning the path it was written to
///
/// An existing file at the target path is returned as-is without contacting
/// the server. Its content is not compared with the remote file.
pub async fn download_file(
    client: &HttpClient,
    file: &FileRef,
    options: &DownloadOptions,
) -> Result<PathBuf> {
    let key = file.key()?;
    let target = options.target_path(key)?;

    if tokio::fs::try_exists(&target)
        .await
        .map_err(|source| io_error(&target, source))?
    {
        tracing::debug!("File already present, skipping download: {}", target.display());
        return Ok(target);
    }

    let url = file.self_link()?;
    tracing::debug!("Downloading {} from {}", key, url);

    let mut request = client.get(url);
    if let Some(timeout) = options.timeout {
        request = request.timeout(timeout);
    }

    let response = request.send().await.map_err(|e| {
        tracing::warn!("Failed to download {}: {}", url, e);
        ZenodoError::Network(e)
    })?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        tracing::warn!("Download of {} returned status {}", url, status);
        return Err(ZenodoError::RequestFailed { status });
    }

    let bytes = response.bytes().await?;

    if let Some(dir) = &options.destination_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| io_error(dir, source))?;
    }
    tokio::fs::write(&target, &bytes)
        .await
        .map_err(|source| io_error(&target, source))?;

    tracing::info!("Downloaded {} ({} bytes)", target.display(), bytes.len());
    Ok(target)
}

/// Download files one after another, stopping at the first failure
pub async fn download_files<I>(
    client: &HttpClient,
    files: I,
    options: &DownloadOptions,
) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: Borrow<FileRef>,
{
    let mut paths = Vec::new();
    for file in files {
        paths.push(download_file(client, file.borrow(), options).await?);
    }
    Ok(paths)
}

fn io_error(path: &Path, source: std::io::Error) -> ZenodoError {
    ZenodoError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_target_path() {
        let options = DownloadOptions::new();
        assert_eq!(
            options.target_path("data.csv").unwrap(),
            PathBuf::from("data.csv")
        );

        let options = DownloadOptions::new().destination_dir("/tmp/zenodo");
        assert_eq!(
            options.target_path("data.csv").unwrap(),
            PathBuf::from("/tmp/zenodo/data.csv")
        );
    }

    #[test]
    fn test_target_path_rejects_keys_leaving_destination() {
        let options = DownloadOptions::new().destination_dir("/tmp/zenodo");
        for key in ["../escaped.txt", "/etc/passwd", "nested/data.csv", "..", ".", ""] {
            assert!(
                matches!(options.target_path(key), Err(ZenodoError::MalformedInput(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_options_from_config() {
        let config = DownloadConfig {
            destination_dir: Some(PathBuf::from("downloads")),
            timeout_secs: Some(15),
        };
        let options = DownloadOptions::from(&config);
        assert_eq!(options.destination_dir, Some(PathBuf::from("downloads")));
        assert_eq!(options.timeout, Some(Duration::from_secs(15)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let client = HttpClient::new().unwrap();
        let file = FileRef::try_from(json!({"bucket": "b1", "links": {"self": "http://127.0.0.1:1/x"}}))
            .unwrap();

        let result = download_file(&client, &file, &DownloadOptions::new()).await;
        assert!(matches!(result, Err(ZenodoError::MissingField(f)) if f == "key"));
    }

    #[tokio::test]
    async fn test_existing_file_short_circuits() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("data.csv");
        std::fs::write(&existing, b"cached").unwrap();

        // links.self is absent, so any network attempt would fail
        let file = FileRef::try_from(json!({"key": "data.csv"})).unwrap();
        let client = HttpClient::new().unwrap();
        let options = DownloadOptions::new().destination_dir(dir.path());

        let path = download_file(&client, &file, &options).await.unwrap();
        assert_eq!(path, existing);
        assert_eq!(std::fs::read(&path).unwrap(), b"cached");
    }
}
