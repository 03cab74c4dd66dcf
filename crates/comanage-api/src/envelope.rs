// Registry JSON envelope
//
// Every request and response body is wrapped the same way:
//
//   { "RequestType"|"ResponseType": "<Plural>", "Version": "1.0",
//     "<Plural>": [ { "Version": "1.0", ... } ] }
//
// The array key equals the type name, so responses are decoded by reading
// `ResponseType` first and then the array under that key.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::lenient;

/// Wire format version sent in every envelope and record.
pub const API_VERSION: &str = "1.0";

// ── Response envelope ───────────────────────────────────────────────

/// A decoded registry response: the type name plus its records.
///
/// Single-entity views carry exactly one record; collection views carry
/// zero or more. A `204 No Content` collection view decodes to an empty
/// envelope rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub response_type: String,
    pub version: String,
    pub records: Vec<T>,
}

impl<T> Envelope<T> {
    /// An envelope with no records.
    pub fn empty(response_type: &str) -> Self {
        Self {
            response_type: response_type.to_owned(),
            version: API_VERSION.to_owned(),
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first record (the only one for single-entity views).
    pub fn first(&self) -> Option<&T> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<T> IntoIterator for Envelope<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Envelope<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Envelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;

        let response_type = match map.remove("ResponseType") {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "ResponseType must be a string, got {other}"
                )));
            }
            None => return Err(D::Error::missing_field("ResponseType")),
        };

        let version = match map.remove("Version") {
            Some(serde_json::Value::String(s)) => s,
            _ => API_VERSION.to_owned(),
        };

        let records = match map.remove(&response_type) {
            Some(serde_json::Value::Null) | None => Vec::new(),
            Some(value) => Vec::<T>::deserialize(value).map_err(D::Error::custom)?,
        };

        Ok(Self {
            response_type,
            version,
            records,
        })
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("ResponseType", &self.response_type)?;
        map.serialize_entry("Version", &self.version)?;
        map.serialize_entry(&self.response_type, &self.records)?;
        map.end()
    }
}

// ── Request envelope ────────────────────────────────────────────────

/// Outbound body: `RequestType`, `Version`, and versioned records.
#[derive(Debug)]
pub(crate) struct RequestEnvelope<'a, T> {
    request_type: &'static str,
    records: &'a [T],
}

impl<'a, T> RequestEnvelope<'a, T> {
    pub(crate) fn new(request_type: &'static str, records: &'a [T]) -> Self {
        Self {
            request_type,
            records,
        }
    }
}

/// A record with the per-record `"Version"` key injected.
#[derive(Serialize)]
struct Versioned<'a, T> {
    #[serde(rename = "Version")]
    version: &'static str,
    #[serde(flatten)]
    record: &'a T,
}

impl<T: Serialize> Serialize for RequestEnvelope<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let records: Vec<Versioned<'_, T>> = self
            .records
            .iter()
            .map(|record| Versioned {
                version: API_VERSION,
                record,
            })
            .collect();

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("RequestType", self.request_type)?;
        map.serialize_entry("Version", API_VERSION)?;
        map.serialize_entry(self.request_type, &records)?;
        map.end()
    }
}

// ── NewObject ───────────────────────────────────────────────────────

/// Response to a successful `add` or `assign` (HTTP 201).
///
/// ```json
/// { "ResponseType": "NewObject", "Version": "1.0", "ObjectType": "Cou", "Id": "42" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewObject {
    pub response_type: String,
    pub version: String,
    pub object_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
}

impl NewObject {
    /// The assigned id as an integer, when the registry used a numeric id.
    pub fn id_u64(&self) -> Option<u64> {
        self.id.parse().ok()
    }
}

// ── ErrorResponse ───────────────────────────────────────────────────

/// Body of a `400 Invalid Fields` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub response_type: Option<String>,
    #[serde(default)]
    pub invalid_fields: Option<BTreeMap<String, Vec<String>>>,
}
