// Registry record types
//
// One struct per resource, PascalCase on the wire. Server-assigned metadata
// (Id, Created, Modified, Revision, Deleted, ActorIdentifier) is grouped in
// `RecordMeta` and is never sent back. The registry is loose about scalar
// types (ids arrive as "42" or 42), so id-like fields go through `lenient`.
// Anything not modeled lands in `extra`.

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ── Lenient scalars ─────────────────────────────────────────────────

pub(crate) mod lenient {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct Scalar;

    impl<'de> Visitor<'de> for Scalar {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, integer, or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(Self)
        }
    }

    /// Required string that may arrive as a number.
    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        d.deserialize_any(Scalar)
            .map(Option::unwrap_or_default)
    }

    /// Optional string that may arrive as a number.
    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        d.deserialize_any(Scalar)
    }

    /// Optional numeric id; `""` and `null` mean "no id".
    pub fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        match d.deserialize_any(Scalar)? {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid id: {s:?}"))),
        }
    }

    /// Boolean that may arrive as `true`, `"true"`, `1`, or `"1"`.
    pub fn bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match d.deserialize_any(Scalar)?.as_deref() {
            Some("true" | "1") => Ok(true),
            Some("false" | "0" | "") | None => Ok(false),
            Some(other) => Err(de::Error::custom(format!("invalid boolean: {other:?}"))),
        }
    }
}

// ── Shared pieces ───────────────────────────────────────────────────

/// Server-maintained metadata present on every record read back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordMeta {
    #[serde(default, deserialize_with = "lenient::opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id", skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_identifier: Option<String>,
}

/// Nested owner reference: `{ "Type": "CO", "Id": "123" }`.
///
/// `Type` is one of `CO`, `CoDept`, `CoGroup`, `Dept`, `Org`, `Organization`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    #[serde(rename = "Type")]
    pub person_type: String,
    #[serde(rename = "Id", deserialize_with = "lenient::string")]
    pub id: String,
}

impl PersonRef {
    pub fn new(person_type: &str, id: u64) -> Self {
        Self {
            person_type: person_type.to_owned(),
            id: id.to_string(),
        }
    }

    pub fn co_person(id: u64) -> Self {
        Self::new("CO", id)
    }

    /// The owner id as an integer.
    pub fn id_u64(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }

    /// Owner of a record read back for editing. Edits never invent one.
    pub(crate) fn owner_of(person: Option<&Self>, kind: &str) -> Result<Self, Error> {
        person.cloned().ok_or_else(|| Error::Deserialization {
            message: format!("{kind} record has no Person"),
            body: String::new(),
        })
    }
}

type Extra = serde_json::Map<String, serde_json::Value>;

// ── CoPerson ────────────────────────────────────────────────────────

/// CO Person record (`co_people`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoPerson {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub co_id: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ── CoPersonRole ────────────────────────────────────────────────────

/// CO Person Role record (`co_person_roles`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoPersonRole {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub person: Option<PersonRef>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub cou_id: Option<u64>,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub o: Option<String>,
    #[serde(default)]
    pub ou: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_through: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub ordr: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ── Cou ─────────────────────────────────────────────────────────────

/// CO Unit record (`cous`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cou {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub co_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    /// Nested-set bounds maintained by the registry.
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub lft: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub rght: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ── Identifier ──────────────────────────────────────────────────────

/// Identifier record (`identifiers`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Identifier {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(rename = "Type", default)]
    pub identifier_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub identifier: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub login: bool,
    #[serde(default)]
    pub person: Option<PersonRef>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ── Name ────────────────────────────────────────────────────────────

/// Name record (`names`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Name {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub honorific: Option<String>,
    #[serde(default)]
    pub given: Option<String>,
    #[serde(default)]
    pub middle: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(rename = "Type", default)]
    pub name_type: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub primary_name: bool,
    #[serde(default)]
    pub person: Option<PersonRef>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ── SshKey ──────────────────────────────────────────────────────────

/// SSH public key record (`ssh_keys`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SshKey {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub person: Option<PersonRef>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "Type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub skey: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub ssh_key_authenticator_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ── EmailAddress ────────────────────────────────────────────────────

/// Email address record (`email_addresses`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailAddress {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(rename = "Type", default)]
    pub email_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub verified: bool,
    #[serde(default)]
    pub person: Option<PersonRef>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ── OrgIdentity ─────────────────────────────────────────────────────

/// Organizational identity record (`org_identities`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrgIdentity {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub co_id: Option<u64>,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub o: Option<String>,
    #[serde(default)]
    pub ou: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_through: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn cou_from_registry_json() {
        let cou: Cou = serde_json::from_value(json!({
            "Version": "1.0",
            "Id": "42",
            "CoId": "1",
            "Name": "Engineering",
            "Description": "Eng Dept",
            "Lft": "64",
            "Rght": "65",
            "Created": "2021-09-14 14:53:02",
            "Modified": "2021-09-14 14:53:02",
            "Revision": "0",
            "Deleted": false,
            "ActorIdentifier": "admin"
        }))
        .unwrap();

        assert_eq!(cou.meta.id, Some(42));
        assert_eq!(cou.meta.revision, Some(0));
        assert!(!cou.meta.deleted);
        assert_eq!(cou.co_id, Some(1));
        assert_eq!(cou.parent_id, None);
        assert_eq!(cou.name, "Engineering");
        assert_eq!(cou.description.as_deref(), Some("Eng Dept"));
        assert_eq!(cou.lft, Some(64));
        // Only the per-record version is left over.
        assert_eq!(cou.extra.get("Version"), Some(&json!("1.0")));
        assert_eq!(cou.extra.len(), 1);
    }

    #[test]
    fn empty_parent_id_means_none() {
        let cou: Cou =
            serde_json::from_value(json!({ "Id": 3, "Name": "Ops", "ParentId": "" })).unwrap();
        assert_eq!(cou.parent_id, None);
        assert_eq!(cou.meta.id, Some(3));
    }

    #[test]
    fn person_ref_with_numeric_id() {
        let name: Name = serde_json::from_value(json!({
            "Id": "9",
            "Given": "Ada",
            "Family": "Lovelace",
            "Type": "official",
            "PrimaryName": true,
            "Person": { "Type": "CO", "Id": 12 }
        }))
        .unwrap();

        let person = name.person.unwrap();
        assert_eq!(person.person_type, "CO");
        assert_eq!(person.id_u64(), Some(12));
        assert!(name.primary_name);
        assert_eq!(name.name_type.as_deref(), Some("official"));
    }

    #[test]
    fn string_booleans_are_accepted() {
        let id: Identifier = serde_json::from_value(json!({
            "Id": "5",
            "Type": "eppn",
            "Identifier": "ada@example.org",
            "Login": "1",
            "Deleted": "false"
        }))
        .unwrap();
        assert!(id.login);
        assert!(!id.meta.deleted);
    }
}
