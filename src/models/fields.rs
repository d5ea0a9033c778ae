//! Read-only field maps built from decoded JSON objects.
//!
//! A [`RecordMap`] is an ordered mapping from field names to [`FieldValue`]s.
//! Nested objects are wrapped recursively, so every level of a record is
//! read-only. There is no way to insert, replace or remove an entry once the
//! map is built:
//!
//! ```compile_fail
//! use zenodo_search::models::RecordMap;
//!
//! let mut map = RecordMap::from_json(serde_json::json!({ "title": "a" })).unwrap();
//! map.entries = Default::default();
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use crate::error::{Result, ZenodoError};

/// A single decoded JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<FieldValue>),
    Map(RecordMap),
}

impl FieldValue {
    /// Wrap a JSON value, turning every nested object into a [`RecordMap`]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from_json).collect())
            }
            Value::Object(object) => FieldValue::Map(RecordMap::from_object(object)),
        }
    }

    /// Convert back into a plain JSON value
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            FieldValue::Map(map) => map.to_json(),
        }
    }

    /// Name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Number(_) => "number",
            FieldValue::String(_) => "string",
            FieldValue::List(_) => "list",
            FieldValue::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&RecordMap> {
        match self {
            FieldValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::from_json(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Number(n) => n.serialize(serializer),
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::List(items) => items.serialize(serializer),
            FieldValue::Map(map) => map.serialize(serializer),
        }
    }
}

/// Immutable, ordered view over a JSON object
///
/// Cloning is cheap: entries are shared behind an [`Arc`].
#[derive(Clone, Default, PartialEq)]
pub struct RecordMap {
    entries: Arc<Vec<(String, FieldValue)>>,
}

impl RecordMap {
    /// Wrap a decoded JSON object, keeping its key order
    pub fn from_object(object: Map<String, Value>) -> Self {
        let entries = object
            .into_iter()
            .map(|(key, value)| (key, FieldValue::from_json(value)))
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Wrap a JSON value that must be an object
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(Self::from_object(object)),
            other => Err(ZenodoError::MalformedInput(format!(
                "expected a JSON object, got {}",
                FieldValue::from_json(other).kind()
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Field names in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Look up a field, failing with [`ZenodoError::MissingField`] when absent
    pub fn field(&self, key: &str) -> Result<&FieldValue> {
        self.get(key).ok_or_else(|| ZenodoError::missing(key))
    }

    pub fn get_str(&self, key: &str) -> Result<&str> {
        typed(key, self.field(key)?, "string", FieldValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        typed(key, self.field(key)?, "boolean", FieldValue::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Result<i64> {
        typed(key, self.field(key)?, "integer", FieldValue::as_i64)
    }

    pub fn get_u64(&self, key: &str) -> Result<u64> {
        typed(key, self.field(key)?, "unsigned integer", FieldValue::as_u64)
    }

    pub fn get_f64(&self, key: &str) -> Result<f64> {
        typed(key, self.field(key)?, "number", FieldValue::as_f64)
    }

    pub fn get_map(&self, key: &str) -> Result<&RecordMap> {
        typed(key, self.field(key)?, "map", FieldValue::as_map)
    }

    pub fn get_list(&self, key: &str) -> Result<&[FieldValue]> {
        typed(key, self.field(key)?, "list", FieldValue::as_list)
    }

    /// Follow a dotted path such as `"links.self"` through nested maps
    pub fn path(&self, dotted: &str) -> Result<&FieldValue> {
        let mut segments = dotted.split('.');
        let first = segments.next().unwrap_or(dotted);
        let mut current = self.get(first).ok_or_else(|| ZenodoError::missing(first))?;
        let mut walked = first.len();

        for segment in segments {
            let parent = &dotted[..walked];
            let map = typed(parent, current, "map", FieldValue::as_map)?;
            walked += 1 + segment.len();
            current = map
                .get(segment)
                .ok_or_else(|| ZenodoError::missing(&dotted[..walked]))?;
        }

        Ok(current)
    }

    pub fn path_str(&self, dotted: &str) -> Result<&str> {
        typed(dotted, self.path(dotted)?, "string", FieldValue::as_str)
    }

    /// Convert back into a plain JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

fn typed<'a, T>(
    field: &str,
    value: &'a FieldValue,
    expected: &'static str,
    extract: impl FnOnce(&'a FieldValue) -> Option<T>,
) -> Result<T> {
    extract(value).ok_or_else(|| ZenodoError::WrongType {
        field: field.to_string(),
        expected,
    })
}

impl fmt::Debug for RecordMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Index<&str> for RecordMap {
    type Output = FieldValue;

    fn index(&self, key: &str) -> &FieldValue {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no field named '{}'", key),
        }
    }
}

impl<'a> IntoIterator for &'a RecordMap {
    type Item = (&'a str, &'a FieldValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a FieldValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for RecordMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl TryFrom<Value> for RecordMap {
    type Error = ZenodoError;

    fn try_from(value: Value) -> Result<Self> {
        RecordMap::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "id": 1234,
            "doi": "10.5281/zenodo.1234",
            "open": true,
            "score": 1.5,
            "missing": null,
            "metadata": {
                "title": "Some dataset",
                "creators": [{"name": "Doe, Jane"}, {"name": "Roe, Rick"}],
                "nested": {"deep": "value"}
            },
            "keywords": ["a", "b"]
        })
    }

    #[test]
    fn test_read_back_matches_source() {
        let source = sample();
        let map = RecordMap::from_json(source.clone()).unwrap();

        for (key, value) in source.as_object().unwrap() {
            assert_eq!(&map.field(key).unwrap().to_json(), value, "key {}", key);
        }
        assert_eq!(map.to_json(), source);
    }

    #[test]
    fn test_entry_count_and_order() {
        let map = RecordMap::from_json(sample()).unwrap();
        assert_eq!(map.len(), 7);
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(
            keys,
            vec!["id", "doi", "open", "score", "missing", "metadata", "keywords"]
        );
    }

    #[test]
    fn test_nested_objects_are_wrapped() {
        let map = RecordMap::from_json(sample()).unwrap();
        let metadata = map.get_map("metadata").unwrap();
        assert_eq!(metadata.get_str("title").unwrap(), "Some dataset");

        let creators = metadata.get_list("creators").unwrap();
        let first = creators[0].as_map().expect("list entries are wrapped too");
        assert_eq!(first.get_str("name").unwrap(), "Doe, Jane");
    }

    #[test]
    fn test_typed_accessors() {
        let map = RecordMap::from_json(sample()).unwrap();
        assert_eq!(map.get_i64("id").unwrap(), 1234);
        assert_eq!(map.get_u64("id").unwrap(), 1234);
        assert!(map.get_bool("open").unwrap());
        assert_eq!(map.get_f64("score").unwrap(), 1.5);
        assert!(map.field("missing").unwrap().is_null());
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let map = RecordMap::from_json(sample()).unwrap();

        match map.get_str("nope") {
            Err(ZenodoError::MissingField(field)) => assert_eq!(field, "nope"),
            other => panic!("unexpected: {:?}", other),
        }

        match map.get_str("id") {
            Err(ZenodoError::WrongType { field, expected }) => {
                assert_eq!(field, "id");
                assert_eq!(expected, "string");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_dotted_paths() {
        let map = RecordMap::from_json(sample()).unwrap();
        assert_eq!(map.path_str("metadata.nested.deep").unwrap(), "value");

        match map.path("metadata.nested.absent") {
            Err(ZenodoError::MissingField(field)) => assert_eq!(field, "metadata.nested.absent"),
            other => panic!("unexpected: {:?}", other),
        }

        match map.path("doi.prefix") {
            Err(ZenodoError::WrongType { field, expected }) => {
                assert_eq!(field, "doi");
                assert_eq!(expected, "map");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_index_access() {
        let map = RecordMap::from_json(sample()).unwrap();
        assert_eq!(map["doi"].as_str(), Some("10.5281/zenodo.1234"));
        assert_eq!(map["metadata"], *map.field("metadata").unwrap());
    }

    #[test]
    #[should_panic(expected = "no field named 'absent'")]
    fn test_index_missing_panics() {
        let map = RecordMap::from_json(sample()).unwrap();
        let _ = &map["absent"];
    }

    #[test]
    fn test_rejects_non_objects() {
        let result = RecordMap::from_json(json!([1, 2, 3]));
        assert!(matches!(result, Err(ZenodoError::MalformedInput(_))));
    }

    #[test]
    fn test_clones_share_entries() {
        let map = RecordMap::from_json(sample()).unwrap();
        let copy = map.clone();
        assert!(Arc::ptr_eq(&map.entries, &copy.entries));
        assert_eq!(map, copy);
    }

    #[test]
    fn test_serialize_round_trips_through_serde_json() {
        let map = RecordMap::from_json(sample()).unwrap();
        let text = serde_json::to_string(&map).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }
}
