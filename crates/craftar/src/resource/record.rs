//! Normalized resource records.
//!
//! Raw objects from the management API link to related resources by URI
//! (`/api/v0/collection/<uuid>/`) and carry a `resource_uri` pointing at
//! themselves. [`normalize`] turns them into records that hold bare
//! identifiers instead.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::RelationLink;

/// Field holding the object's own URI; dropped from every record.
pub const SELF_LINK: &str = "resource_uri";

/// Relation fields holding a single link.
pub const SINGULAR_RELATIONS: &[&str] = &["collection", "item", "version", "app"];

/// Relation fields holding a list of links.
pub const PLURAL_RELATIONS: &[&str] = &["collections", "tags"];

/// One server-side entity after normalization.
///
/// Records are built fresh from every successful get, list and create
/// response. Updates do not return one; fetch again to observe them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResourceRecord(Map<String, Value>);

impl ResourceRecord {
    /// Get a field from the record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a string field from the record.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// The record's own identifier (`uuid` field), if present.
    pub fn uuid(&self) -> Option<&str> {
        self.get_str("uuid")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::ops::Index<&str> for ResourceRecord {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        &self.0[key]
    }
}

/// Normalize one raw object from the management API.
///
/// Removes the self link and collapses relation links to their trailing
/// identifier. Non-string relation values and unknown fields pass through
/// unchanged.
pub fn normalize(mut raw: Map<String, Value>) -> ResourceRecord {
    raw.remove(SELF_LINK);

    for key in SINGULAR_RELATIONS {
        if let Some(value) = raw.get_mut(*key) {
            collapse(value);
        }
    }

    for key in PLURAL_RELATIONS {
        if let Some(Value::Array(links)) = raw.get_mut(*key) {
            links.iter_mut().for_each(collapse);
        }
    }

    ResourceRecord(raw)
}

fn collapse(value: &mut Value) {
    if let Value::String(uri) = value
        && let Some(id) = RelationLink::trailing_segment(uri)
    {
        *value = Value::String(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn removes_self_link_and_collapses_relation() {
        let record = normalize(object(json!({
            "resource_uri": "/api/v0/item/X/",
            "collection": "/api/v0/collection/ABC123/",
            "name": "n"
        })));

        assert_eq!(
            record.into_value(),
            json!({"collection": "ABC123", "name": "n"})
        );
    }

    #[test]
    fn collapses_every_singular_relation() {
        let record = normalize(object(json!({
            "item": "/api/v0/item/I1/",
            "version": "/api/v0/version/V1/",
            "app": "/api/v0/app/A1/",
        })));

        assert_eq!(record.get_str("item"), Some("I1"));
        assert_eq!(record.get_str("version"), Some("V1"));
        assert_eq!(record.get_str("app"), Some("A1"));
    }

    #[test]
    fn collapses_plural_relations_elementwise() {
        let record = normalize(object(json!({
            "uuid": "I1",
            "tags": ["/api/v0/tag/T1/", "/api/v0/tag/T2/"],
            "collections": ["/api/v0/collection/C1/"],
        })));

        assert_eq!(record["tags"], json!(["T1", "T2"]));
        assert_eq!(record["collections"], json!(["C1"]));
        assert_eq!(record.uuid(), Some("I1"));
    }

    #[test]
    fn unknown_fields_and_odd_values_pass_through() {
        let record = normalize(object(json!({
            "custom": "/not/a/relation/",
            "collection": null,
            "tags": [],
            "trackable": true,
        })));

        assert_eq!(record["custom"], json!("/not/a/relation/"));
        assert_eq!(record["collection"], Value::Null);
        assert_eq!(record["tags"], json!([]));
        assert_eq!(record["trackable"], json!(true));
    }

    #[test]
    fn bare_identifiers_are_left_alone() {
        let record = normalize(object(json!({"collection": "ABC"})));
        assert_eq!(record.get_str("collection"), Some("ABC"));
        assert!(record.get(SELF_LINK).is_none());
    }
}
