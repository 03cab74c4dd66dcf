// Identifier endpoints
//
// Identifiers hang off any entity type (CO Person, Org Identity, CO Group,
// CO Department, Organization). `assign` asks the registry to generate
// identifiers from the CO's configured identifier assignments instead of
// taking a caller-supplied value.

use serde::Serialize;
use tracing::debug;

use crate::client::{RegistryClient, Resource};
use crate::envelope::{Envelope, NewObject};
use crate::error::Error;
use crate::models::{Identifier, PersonRef};
use crate::options::{EntityType, Status};

/// Identifier endpoints (`/identifiers.json`, `/identifiers/{id}.json`).
#[derive(Debug, Clone, Copy)]
pub struct Identifiers<'a> {
    client: &'a RegistryClient,
}

impl Resource for Identifiers<'_> {
    const PATH: &'static str = "identifiers";
    const KIND: &'static str = "Identifiers";
    type Record = Identifier;
}

/// Fields for a new identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentifier {
    /// Identifier type as configured in the CO (`eppn`, `uid`, `sorid`, ...).
    pub identifier_type: String,
    pub identifier: String,
    pub entity_type: EntityType,
    pub entity_id: u64,
    pub login: bool,
    pub status: Status,
}

/// Fields to change on an identifier; the owner is never changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierUpdate {
    pub identifier_type: Option<String>,
    pub identifier: Option<String>,
    pub login: Option<bool>,
    pub status: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct IdentifierBody {
    #[serde(rename = "Type")]
    identifier_type: String,
    identifier: String,
    login: bool,
    person: PersonRef,
    status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct AssignBody {
    person: PersonRef,
}

impl IdentifierBody {
    pub(crate) fn merged(current: &Identifier, update: &IdentifierUpdate) -> Result<Self, Error> {
        let person = PersonRef::owner_of(current.person.as_ref(), "identifier")?;

        Ok(Self {
            identifier_type: update
                .identifier_type
                .clone()
                .or_else(|| current.identifier_type.clone())
                .unwrap_or_default(),
            identifier: update
                .identifier
                .clone()
                .or_else(|| current.identifier.clone())
                .unwrap_or_default(),
            login: update.login.unwrap_or(current.login),
            person,
            status: update
                .status
                .map(|s| s.as_ref().to_owned())
                .or_else(|| current.status.clone())
                .unwrap_or_else(|| Status::Active.as_ref().to_owned()),
        })
    }
}

impl<'a> Identifiers<'a> {
    pub(crate) fn new(client: &'a RegistryClient) -> Self {
        Self { client }
    }

    /// Add an identifier to an entity. `POST /identifiers.json`
    pub async fn add(&self, identifier: &NewIdentifier) -> Result<NewObject, Error> {
        debug!(
            entity_type = %identifier.entity_type,
            entity_id = identifier.entity_id,
            identifier_type = %identifier.identifier_type,
            "adding identifier"
        );
        let body = IdentifierBody {
            identifier_type: identifier.identifier_type.clone(),
            identifier: identifier.identifier.clone(),
            login: identifier.login,
            person: PersonRef::new(identifier.entity_type.person_ref_type(), identifier.entity_id),
            status: identifier.status.as_ref().to_owned(),
        };
        self.client.add::<Self, _>(&body).await
    }

    /// Have the registry generate identifiers for an entity.
    ///
    /// `POST /identifiers/assign.json`. Same envelope and 201 `NewObject`
    /// outcome as [`add`](Self::add), without a value in the body.
    pub async fn assign<E>(&self, entity_type: E, entity_id: u64) -> Result<NewObject, Error>
    where
        E: TryInto<EntityType>,
        Error: From<E::Error>,
    {
        let entity_type = entity_type.try_into()?;
        debug!(%entity_type, entity_id, "assigning identifiers");
        let body = AssignBody {
            person: PersonRef::new(entity_type.person_ref_type(), entity_id),
        };
        self.client
            .post_created(&format!("{}/assign.json", Self::PATH), Self::KIND, &body)
            .await
    }

    /// Edit an identifier (read, merge, `PUT /identifiers/{id}.json`).
    pub async fn edit(&self, identifier_id: u64, update: &IdentifierUpdate) -> Result<bool, Error> {
        debug!(identifier_id, ?update, "editing identifier");
        let current = self.client.current::<Self>(identifier_id, &[]).await?;
        let body = IdentifierBody::merged(&current, update)?;
        self.client.edit::<Self, _>(identifier_id, &body).await
    }

    /// Remove an identifier. `DELETE /identifiers/{id}.json`
    pub async fn delete(&self, identifier_id: u64) -> Result<bool, Error> {
        debug!(identifier_id, "deleting identifier");
        self.client.delete::<Self>(identifier_id, &[]).await
    }

    /// Every identifier visible to the API user. `GET /identifiers.json`
    pub async fn view_all(&self) -> Result<Envelope<Identifier>, Error> {
        self.client.view_all::<Self>(&[]).await
    }

    /// Identifiers attached to one entity.
    ///
    /// `GET /identifiers.json?{entity_type}={entity_id}`. A string
    /// `entity_type` outside the accepted set fails locally.
    pub async fn view_per_entity<E>(
        &self,
        entity_type: E,
        entity_id: u64,
    ) -> Result<Envelope<Identifier>, Error>
    where
        E: TryInto<EntityType>,
        Error: From<E::Error>,
    {
        let entity_type = entity_type.try_into()?;
        self.client
            .view_all::<Self>(&[(entity_type.as_ref(), entity_id.to_string())])
            .await
    }

    /// A single identifier. `GET /identifiers/{id}.json`
    pub async fn view_one(&self, identifier_id: u64) -> Result<Envelope<Identifier>, Error> {
        self.client.view_one::<Self>(identifier_id, &[]).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_owner() {
        let current = Identifier {
            identifier_type: Some("eppn".into()),
            identifier: Some("ada@example.org".into()),
            login: true,
            person: Some(PersonRef::new("Org", 44)),
            status: Some("Active".into()),
            ..Identifier::default()
        };
        let update = IdentifierUpdate {
            identifier: Some("ada.l@example.org".into()),
            login: Some(false),
            ..IdentifierUpdate::default()
        };

        let body = IdentifierBody::merged(&current, &update).unwrap();

        assert_eq!(body.person, PersonRef::new("Org", 44));
        assert_eq!(body.identifier, "ada.l@example.org");
        assert_eq!(body.identifier_type, "eppn");
        assert!(!body.login);
    }

    #[test]
    fn merge_without_owner_fails() {
        let err = IdentifierBody::merged(&Identifier::default(), &IdentifierUpdate::default())
            .unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }
}
