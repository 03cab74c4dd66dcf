// Closed option sets accepted by the registry.
//
// Each enum serializes to the exact token the registry expects and parses
// case-insensitively from strings, so callers holding user input get an
// `Error::InvalidOption` before any request is built.

use std::str::FromStr;

use serde::{Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::error::Error;

macro_rules! registry_option {
    ($ty:ident, $field:literal) => {
        registry_option!(@impl $ty, $field, None);
    };
    ($ty:ident, $field:literal, default = $default:ident) => {
        registry_option!(@impl $ty, $field, Some($ty::$default));

        impl Default for $ty {
            fn default() -> Self {
                Self::$default
            }
        }
    };
    (@impl $ty:ident, $field:literal, $on_empty:expr) => {
        impl $ty {
            /// Every accepted token, in registry order.
            pub fn options() -> Vec<&'static str> {
                Self::iter().map(<&'static str>::from).collect()
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(raw: &str) -> Result<Self, Error> {
                let raw = raw.trim();
                let on_empty: Option<Self> = $on_empty;
                if raw.is_empty() {
                    if let Some(value) = on_empty {
                        return Ok(value);
                    }
                }
                Self::iter()
                    .find(|v| v.as_ref().eq_ignore_ascii_case(raw))
                    .ok_or_else(|| Error::InvalidOption {
                        field: $field,
                        value: raw.to_owned(),
                    })
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = Error;

            fn try_from(raw: &str) -> Result<Self, Error> {
                raw.parse()
            }
        }

        impl TryFrom<String> for $ty {
            type Error = Error;

            fn try_from(raw: String) -> Result<Self, Error> {
                raw.parse()
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_ref())
            }
        }
    };
}

// ── Status ──────────────────────────────────────────────────────────

/// Lifecycle status of a CO Person, role, or identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, IntoStaticStr, Display)]
pub enum Status {
    Active,
    Approved,
    Confirmed,
    Declined,
    Deleted,
    Denied,
    Duplicate,
    Expired,
    GracePeriod,
    Invited,
    Pending,
    PendingApproval,
    PendingConfirmation,
    Suspended,
}

registry_option!(Status, "status");

// ── Affiliation ─────────────────────────────────────────────────────

/// eduPerson affiliation of a CO Person Role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, IntoStaticStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Affiliation {
    Affiliate,
    Alum,
    Employee,
    Faculty,
    Member,
    Staff,
    Student,
}

registry_option!(Affiliation, "affiliation");

// ── Entity / person types ───────────────────────────────────────────

/// Owner of an identifier, used as the per-entity query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, IntoStaticStr, Display)]
pub enum EntityType {
    #[strum(serialize = "codeptid")]
    CoDepartment,
    #[strum(serialize = "cogroupid")]
    CoGroup,
    #[strum(serialize = "copersonid")]
    CoPerson,
    #[strum(serialize = "organizationid")]
    Organization,
    #[strum(serialize = "orgidentityid")]
    OrgIdentity,
}

registry_option!(EntityType, "entity_type", default = CoPerson);

impl EntityType {
    /// `Person.Type` token used in identifier request bodies.
    pub fn person_ref_type(self) -> &'static str {
        match self {
            Self::CoDepartment => "CoDept",
            Self::CoGroup => "CoGroup",
            Self::CoPerson => "CO",
            Self::Organization => "Organization",
            Self::OrgIdentity => "Org",
        }
    }
}

/// Owner of a name record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, IntoStaticStr, Display)]
pub enum PersonType {
    #[strum(serialize = "copersonid")]
    CoPerson,
    #[strum(serialize = "orgidentityid")]
    OrgIdentity,
}

registry_option!(PersonType, "person_type", default = CoPerson);

impl PersonType {
    /// `Person.Type` token used in request bodies.
    pub fn person_ref_type(self) -> &'static str {
        match self {
            Self::CoPerson => "CO",
            Self::OrgIdentity => "Org",
        }
    }
}

/// Owner of an email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, IntoStaticStr, Display)]
pub enum EmailPersonType {
    #[strum(serialize = "codeptid")]
    CoDepartment,
    #[strum(serialize = "copersonid")]
    CoPerson,
    #[strum(serialize = "organizationid")]
    Organization,
    #[strum(serialize = "orgidentityid")]
    OrgIdentity,
}

registry_option!(EmailPersonType, "person_type", default = CoPerson);

impl EmailPersonType {
    /// `Person.Type` token used in email address request bodies.
    pub fn person_ref_type(self) -> &'static str {
        match self {
            Self::CoDepartment => "Dept",
            Self::CoPerson => "CO",
            Self::Organization => "Organization",
            Self::OrgIdentity => "Org",
        }
    }
}

// ── SSH keys ────────────────────────────────────────────────────────

/// Algorithm of an SSH public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, IntoStaticStr, Display)]
pub enum SshKeyType {
    #[strum(serialize = "ssh-dss")]
    Dss,
    #[strum(serialize = "ecdsa-sha2-nistp256")]
    EcdsaNistP256,
    #[strum(serialize = "ecdsa-sha2-nistp384")]
    EcdsaNistP384,
    #[strum(serialize = "ecdsa-sha2-nistp521")]
    EcdsaNistP521,
    #[strum(serialize = "ssh-ed25519")]
    Ed25519,
    #[strum(serialize = "ssh-rsa")]
    Rsa,
    #[strum(serialize = "ssh-rsa1")]
    Rsa1,
}

registry_option!(SshKeyType, "ssh_key_type");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn person_type_parses_case_insensitively() {
        assert_eq!("CoPersonId".parse::<PersonType>().unwrap(), PersonType::CoPerson);
        assert_eq!(
            PersonType::try_from("orgidentityid").unwrap(),
            PersonType::OrgIdentity
        );
    }

    #[test]
    fn empty_person_type_defaults_to_coperson() {
        assert_eq!("".parse::<PersonType>().unwrap(), PersonType::CoPerson);
        assert_eq!("  ".parse::<EntityType>().unwrap(), EntityType::CoPerson);
    }

    #[test]
    fn unknown_person_type_is_rejected() {
        let err = "cocourseid".parse::<PersonType>().unwrap_err();
        match err {
            Error::InvalidOption { field, value } => {
                assert_eq!(field, "person_type");
                assert_eq!(value, "cocourseid");
            }
            other => panic!("expected InvalidOption, got: {other:?}"),
        }
    }

    #[test]
    fn status_without_default_rejects_empty() {
        assert!(matches!(
            "".parse::<Status>(),
            Err(Error::InvalidOption { field: "status", .. })
        ));
    }

    #[test]
    fn tokens_match_registry_vocabulary() {
        assert_eq!(Status::PendingApproval.as_ref(), "PendingApproval");
        assert_eq!(Affiliation::Faculty.as_ref(), "faculty");
        assert_eq!(SshKeyType::Ed25519.to_string(), "ssh-ed25519");
        assert_eq!(EntityType::CoGroup.as_ref(), "cogroupid");
        assert_eq!(
            SshKeyType::options(),
            vec![
                "ssh-dss",
                "ecdsa-sha2-nistp256",
                "ecdsa-sha2-nistp384",
                "ecdsa-sha2-nistp521",
                "ssh-ed25519",
                "ssh-rsa",
                "ssh-rsa1",
            ]
        );
        assert_eq!(Status::options().len(), 14);
    }

    #[test]
    fn serializes_as_token() {
        let json = serde_json::to_string(&Affiliation::Member).unwrap();
        assert_eq!(json, "\"member\"");
    }

    #[test]
    fn person_ref_types() {
        assert_eq!(PersonType::OrgIdentity.person_ref_type(), "Org");
        assert_eq!(EntityType::CoDepartment.person_ref_type(), "CoDept");
        assert_eq!(EmailPersonType::CoDepartment.person_ref_type(), "Dept");
    }
}
