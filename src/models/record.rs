//! Zenodo records and search result sets.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::ops::Index;

use crate::error::{Result, ZenodoError};
use crate::models::{FieldValue, FileSequence, RecordMap, ResponseInfo, SearchQuery};

/// Zenodo record
///
/// A read-only wrapper around one hit returned by the records API. All fields
/// of the hit are reachable through [`Record::as_map`]; the `files` listing is
/// additionally exposed as a [`FileSequence`].
#[derive(Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    data: RecordMap,
    #[serde(skip)]
    files: Option<FileSequence>,
}

impl Record {
    /// Wrap a decoded hit
    pub fn new(data: RecordMap) -> Result<Self> {
        let files = data.get("files").map(FileSequence::from_field).transpose()?;
        Ok(Self { data, files })
    }

    /// Wrap a JSON value, which must be an object
    pub fn from_json(value: Value) -> Result<Self> {
        Self::new(RecordMap::from_json(value)?)
    }

    pub fn as_map(&self) -> &RecordMap {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.data.get(key)
    }

    /// Attached files, if the record lists any
    pub fn files(&self) -> Option<&FileSequence> {
        self.files.as_ref()
    }

    pub fn id(&self) -> Result<u64> {
        self.data.get_u64("id")
    }

    pub fn title(&self) -> Result<&str> {
        self.data.path_str("metadata.title")
    }

    pub fn latest_html(&self) -> Result<&str> {
        self.data.path_str("links.latest_html")
    }

    pub fn badge(&self) -> Result<&str> {
        self.data.path_str("links.badge")
    }

    pub fn doi(&self) -> Option<&str> {
        self.data
            .get("doi")
            .and_then(FieldValue::as_str)
            .or_else(|| self.data.path_str("metadata.doi").ok())
    }

    pub fn description(&self) -> Option<&str> {
        self.data.path_str("metadata.description").ok()
    }

    pub fn publication_date(&self) -> Option<&str> {
        self.data.path_str("metadata.publication_date").ok()
    }

    /// Creator names in listed order
    pub fn creators(&self) -> Vec<&str> {
        self.data
            .path("metadata.creators")
            .ok()
            .and_then(FieldValue::as_list)
            .map(|creators| {
                creators
                    .iter()
                    .filter_map(FieldValue::as_map)
                    .filter_map(|creator| creator.get("name").and_then(FieldValue::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Short form `<Record {latest_html}: {title}>`
    pub fn summary(&self) -> Result<String> {
        Ok(format!(
            "<Record {}: {}>",
            self.latest_html()?,
            self.title()?
        ))
    }

    /// Badge image linking to the record, followed by its title
    pub fn to_html(&self) -> Result<String> {
        Ok(format!(
            r#"<a href="{}" target="_blank"><img src="{}" alt="Zenodo Badge" /></a> {}"#,
            self.latest_html()?,
            self.badge()?,
            self.title()?
        ))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.summary() {
            Ok(summary) => f.write_str(&summary),
            Err(_) => f.write_str("<Record (incomplete)>"),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Index<&str> for Record {
    type Output = FieldValue;

    fn index(&self, key: &str) -> &FieldValue {
        &self.data[key]
    }
}

impl TryFrom<Value> for Record {
    type Error = ZenodoError;

    fn try_from(value: Value) -> Result<Self> {
        Record::from_json(value)
    }
}

/// Records returned by one search
#[derive(Clone)]
pub struct RecordSet {
    records: Vec<Record>,
    query: SearchQuery,
    response: ResponseInfo,
    total: Option<u64>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>, query: SearchQuery, response: ResponseInfo) -> Self {
        Self {
            records,
            query,
            response,
            total: None,
        }
    }

    /// Attach the total hit count reported by the server
    pub fn with_total(mut self, total: Option<u64>) -> Self {
        self.total = total;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Parameters the search was issued with
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// The `q` parameter as sent
    pub fn query_string(&self) -> &str {
        self.query.q()
    }

    /// Snapshot of the HTTP response, kept for diagnostics
    pub fn response(&self) -> &ResponseInfo {
        &self.response
    }

    /// Total number of matches on the server, which may exceed `len()`
    pub fn total(&self) -> Option<u64> {
        self.total
    }
}

impl fmt::Debug for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Records ({} with {} records>",
            self.query_string(),
            self.len()
        )
    }
}

impl Index<usize> for RecordSet {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
