//! File attachments of a record.

use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use crate::client::ZenodoClient;
use crate::error::{Result, ZenodoError};
use crate::models::{FieldValue, RecordMap};
use crate::utils::DownloadOptions;

/// One downloadable file attached to a record
///
/// The Zenodo API lists files as objects carrying a `key` (the file name) and
/// a `links.self` download URL, usually alongside `size`, `checksum` and `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FileRef {
    data: RecordMap,
}

impl FileRef {
    pub fn new(data: RecordMap) -> Self {
        Self { data }
    }

    /// File name, used as the name of the downloaded file
    pub fn key(&self) -> Result<&str> {
        self.data.get_str("key")
    }

    /// Download URL of the file
    pub fn self_link(&self) -> Result<&str> {
        self.data.path_str("links.self")
    }

    /// Size in bytes as reported by the API
    pub fn size(&self) -> Option<u64> {
        self.data.get("size").and_then(FieldValue::as_u64)
    }

    /// Checksum string, e.g. `md5:...`
    pub fn checksum(&self) -> Option<&str> {
        self.data.get("checksum").and_then(FieldValue::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.data.get("id").and_then(FieldValue::as_str)
    }

    /// The underlying read-only fields
    pub fn as_map(&self) -> &RecordMap {
        &self.data
    }

    /// Download this file with the given client
    pub async fn download(
        &self,
        client: &ZenodoClient,
        options: &DownloadOptions,
    ) -> Result<PathBuf> {
        client.download_file(self, options).await
    }
}

impl From<RecordMap> for FileRef {
    fn from(data: RecordMap) -> Self {
        FileRef::new(data)
    }
}

impl TryFrom<Value> for FileRef {
    type Error = ZenodoError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(_) => Err(ZenodoError::MalformedInput(
                "expected a single file entry, not a list; use download_files instead"
                    .to_string(),
            )),
            other => Ok(FileRef::new(RecordMap::from_json(other)?)),
        }
    }
}

/// Ordered file listing of a record
///
/// Entries are kept as raw maps and wrapped into a [`FileRef`] on access.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FileSequence {
    entries: Vec<RecordMap>,
}

impl FileSequence {
    /// Build the sequence from the `files` field of a record
    pub fn from_field(value: &FieldValue) -> Result<Self> {
        let items = value.as_list().ok_or_else(|| {
            ZenodoError::MalformedInput(format!(
                "'files' must be a list of file entries, got {}",
                value.kind()
            ))
        })?;

        let entries = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_map().cloned().ok_or_else(|| {
                    ZenodoError::MalformedInput(format!(
                        "file entry {} is a {}, expected a map",
                        index,
                        item.kind()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<FileRef> {
        self.entries.get(index).cloned().map(FileRef::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = FileRef> + '_ {
        self.entries.iter().cloned().map(FileRef::new)
    }

    /// Download every file in order, stopping at the first failure
    pub async fn download(
        &self,
        client: &ZenodoClient,
        options: &DownloadOptions,
    ) -> Result<Vec<PathBuf>> {
        client.download_files(self.iter(), options).await
    }
}
