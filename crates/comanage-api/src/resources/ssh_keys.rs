// SSH key endpoints
//
// Keys belong to a CO Person and to the CO's SSH key authenticator; the
// authenticator id comes from the client configuration.

use serde::Serialize;
use tracing::debug;

use crate::client::{RegistryClient, Resource};
use crate::envelope::{Envelope, NewObject};
use crate::error::Error;
use crate::models::{PersonRef, SshKey};
use crate::options::SshKeyType;

/// SSH key endpoints (`/ssh_keys.json`, `/ssh_keys/{id}.json`).
#[derive(Debug, Clone, Copy)]
pub struct SshKeys<'a> {
    client: &'a RegistryClient,
}

impl Resource for SshKeys<'_> {
    const PATH: &'static str = "ssh_keys";
    const KIND: &'static str = "SshKeys";
    type Record = SshKey;
}

/// Fields for a new SSH key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSshKey {
    pub coperson_id: u64,
    /// Base64 key material, without the type prefix or comment.
    pub skey: String,
    pub key_type: SshKeyType,
    pub comment: String,
}

/// Fields to change on a key; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshKeyUpdate {
    pub skey: Option<String>,
    pub key_type: Option<SshKeyType>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SshKeyBody {
    person: PersonRef,
    comment: String,
    #[serde(rename = "Type")]
    key_type: String,
    skey: String,
    ssh_key_authenticator_id: String,
}

impl SshKeyBody {
    pub(crate) fn merged(
        authenticator_id: u64,
        current: &SshKey,
        update: &SshKeyUpdate,
    ) -> Result<Self, Error> {
        Ok(Self {
            person: PersonRef::owner_of(current.person.as_ref(), "ssh key")?,
            comment: update
                .comment
                .clone()
                .or_else(|| current.comment.clone())
                .unwrap_or_default(),
            key_type: update
                .key_type
                .map(|t| t.as_ref().to_owned())
                .or_else(|| current.key_type.clone())
                .unwrap_or_default(),
            skey: update
                .skey
                .clone()
                .or_else(|| current.skey.clone())
                .unwrap_or_default(),
            ssh_key_authenticator_id: current
                .ssh_key_authenticator_id
                .unwrap_or(authenticator_id)
                .to_string(),
        })
    }
}

impl<'a> SshKeys<'a> {
    pub(crate) fn new(client: &'a RegistryClient) -> Self {
        Self { client }
    }

    fn authenticator_id(&self) -> u64 {
        self.client.config().ssh_key_authenticator_id
    }

    /// Add an SSH key to a CO Person. `POST /ssh_keys.json`
    pub async fn add(&self, key: &NewSshKey) -> Result<NewObject, Error> {
        debug!(coperson_id = key.coperson_id, key_type = %key.key_type, "adding ssh key");
        let body = SshKeyBody {
            person: PersonRef::co_person(key.coperson_id),
            comment: key.comment.clone(),
            key_type: key.key_type.as_ref().to_owned(),
            skey: key.skey.clone(),
            ssh_key_authenticator_id: self.authenticator_id().to_string(),
        };
        self.client.add::<Self, _>(&body).await
    }

    /// Edit a key (read, merge, `PUT /ssh_keys/{id}.json`).
    pub async fn edit(&self, ssh_key_id: u64, update: &SshKeyUpdate) -> Result<bool, Error> {
        debug!(ssh_key_id, "editing ssh key");
        let current = self.client.current::<Self>(ssh_key_id, &[]).await?;
        let body = SshKeyBody::merged(self.authenticator_id(), &current, update)?;
        self.client.edit::<Self, _>(ssh_key_id, &body).await
    }

    /// Remove a key. `DELETE /ssh_keys/{id}.json`
    pub async fn delete(&self, ssh_key_id: u64) -> Result<bool, Error> {
        debug!(ssh_key_id, "deleting ssh key");
        self.client.delete::<Self>(ssh_key_id, &[]).await
    }

    /// `GET /ssh_keys.json`
    pub async fn view_all(&self) -> Result<Envelope<SshKey>, Error> {
        self.client.view_all::<Self>(&[]).await
    }

    /// Keys held by one CO Person. `GET /ssh_keys.json?copersonid=`
    pub async fn view_per_coperson(&self, coperson_id: u64) -> Result<Envelope<SshKey>, Error> {
        self.client
            .view_all::<Self>(&[("copersonid", coperson_id.to_string())])
            .await
    }

    /// `GET /ssh_keys/{id}.json`
    pub async fn view_one(&self, ssh_key_id: u64) -> Result<Envelope<SshKey>, Error> {
        self.client.view_one::<Self>(ssh_key_id, &[]).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn merge_replaces_key_material_only() {
        let current = SshKey {
            person: Some(PersonRef::co_person(12)),
            comment: Some("laptop".into()),
            key_type: Some("ssh-rsa".into()),
            skey: Some("AAAAB3Nza".into()),
            ssh_key_authenticator_id: Some(5),
            ..SshKey::default()
        };
        let update = SshKeyUpdate {
            skey: Some("AAAAC3Nza".into()),
            key_type: Some(SshKeyType::Ed25519),
            ..SshKeyUpdate::default()
        };

        let body = SshKeyBody::merged(3, &current, &update).unwrap();

        assert_eq!(body.person, PersonRef::co_person(12));
        assert_eq!(body.comment, "laptop");
        assert_eq!(body.key_type, "ssh-ed25519");
        assert_eq!(body.skey, "AAAAC3Nza");
        assert_eq!(body.ssh_key_authenticator_id, "5");
    }

    #[test]
    fn merge_without_owner_is_an_error() {
        let current = SshKey {
            skey: Some("AAAAB3Nza".into()),
            ..SshKey::default()
        };

        let err = SshKeyBody::merged(3, &current, &SshKeyUpdate::default()).unwrap_err();

        match err {
            Error::Deserialization { message, body } => {
                assert_eq!(message, "ssh key record has no Person");
                assert!(body.is_empty());
            }
            other => panic!("expected Deserialization error, got: {other:?}"),
        }
    }
}
