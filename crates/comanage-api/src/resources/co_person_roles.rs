// CO Person Role endpoints

use serde::Serialize;
use tracing::debug;

use crate::client::{RegistryClient, Resource};
use crate::envelope::{Envelope, NewObject};
use crate::error::Error;
use crate::models::{CoPersonRole, PersonRef};
use crate::options::{Affiliation, Status};

/// CO Person Role endpoints (`/co_person_roles.json`, `/co_person_roles/{id}.json`).
#[derive(Debug, Clone, Copy)]
pub struct CoPersonRoles<'a> {
    client: &'a RegistryClient,
}

impl Resource for CoPersonRoles<'_> {
    const PATH: &'static str = "co_person_roles";
    const KIND: &'static str = "CoPersonRoles";
    type Record = CoPersonRole;
}

/// Fields for a new role attached to a CO Person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoPersonRole {
    pub coperson_id: u64,
    pub cou_id: Option<u64>,
    pub affiliation: Affiliation,
    pub status: Status,
    pub title: Option<String>,
    pub o: Option<String>,
    pub ou: Option<String>,
    pub valid_from: Option<String>,
    pub valid_through: Option<String>,
    pub ordr: Option<u64>,
}

impl NewCoPersonRole {
    /// An active `member` role with no COU.
    pub fn new(coperson_id: u64) -> Self {
        Self {
            coperson_id,
            cou_id: None,
            affiliation: Affiliation::Member,
            status: Status::Active,
            title: None,
            o: None,
            ou: None,
            valid_from: None,
            valid_through: None,
            ordr: None,
        }
    }
}

/// Fields to change on an existing role.
///
/// `None` keeps the current value; `cou_id: Some(0)` removes the role from
/// its COU.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoPersonRoleUpdate {
    pub coperson_id: Option<u64>,
    pub cou_id: Option<u64>,
    pub affiliation: Option<Affiliation>,
    pub status: Option<Status>,
    pub title: Option<String>,
    pub o: Option<String>,
    pub ou: Option<String>,
    pub valid_from: Option<String>,
    pub valid_through: Option<String>,
    pub ordr: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CoPersonRoleBody {
    person: PersonRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    cou_id: Option<String>,
    affiliation: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    o: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ou: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid_through: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ordr: Option<String>,
}

impl From<&NewCoPersonRole> for CoPersonRoleBody {
    fn from(role: &NewCoPersonRole) -> Self {
        Self {
            person: PersonRef::co_person(role.coperson_id),
            cou_id: role.cou_id.filter(|id| *id != 0).map(|id| id.to_string()),
            affiliation: role.affiliation.as_ref().to_owned(),
            status: role.status.as_ref().to_owned(),
            title: role.title.clone(),
            o: role.o.clone(),
            ou: role.ou.clone(),
            valid_from: role.valid_from.clone(),
            valid_through: role.valid_through.clone(),
            ordr: role.ordr.map(|n| n.to_string()),
        }
    }
}

impl CoPersonRoleBody {
    pub(crate) fn merged(
        current: &CoPersonRole,
        update: &CoPersonRoleUpdate,
    ) -> Result<Self, Error> {
        let person = match update.coperson_id {
            Some(id) => PersonRef::co_person(id),
            None => PersonRef::owner_of(current.person.as_ref(), "co person role")?,
        };
        let cou_id = match update.cou_id {
            Some(0) => Some(String::new()),
            Some(id) => Some(id.to_string()),
            None => current.cou_id.map(|id| id.to_string()),
        };
        let pick = |new: &Option<String>, old: &Option<String>| new.clone().or_else(|| old.clone());

        Ok(Self {
            person,
            cou_id,
            affiliation: update
                .affiliation
                .map(|a| a.as_ref().to_owned())
                .or_else(|| current.affiliation.clone())
                .unwrap_or_else(|| Affiliation::Member.as_ref().to_owned()),
            status: update
                .status
                .map(|s| s.as_ref().to_owned())
                .or_else(|| current.status.clone())
                .unwrap_or_else(|| Status::Active.as_ref().to_owned()),
            title: pick(&update.title, &current.title),
            o: pick(&update.o, &current.o),
            ou: pick(&update.ou, &current.ou),
            valid_from: pick(&update.valid_from, &current.valid_from),
            valid_through: pick(&update.valid_through, &current.valid_through),
            ordr: update.ordr.or(current.ordr).map(|n| n.to_string()),
        })
    }
}

impl<'a> CoPersonRoles<'a> {
    pub(crate) fn new(client: &'a RegistryClient) -> Self {
        Self { client }
    }

    /// Add a role to a CO Person. `POST /co_person_roles.json`
    pub async fn add(&self, role: &NewCoPersonRole) -> Result<NewObject, Error> {
        debug!(coperson_id = role.coperson_id, cou_id = ?role.cou_id, "adding co person role");
        self.client
            .add::<Self, _>(&CoPersonRoleBody::from(role))
            .await
    }

    /// Edit a role (read, merge, `PUT /co_person_roles/{id}.json`).
    pub async fn edit(&self, role_id: u64, update: &CoPersonRoleUpdate) -> Result<bool, Error> {
        debug!(role_id, ?update, "editing co person role");
        let current = self.client.current::<Self>(role_id, &[]).await?;
        let body = CoPersonRoleBody::merged(&current, update)?;
        self.client.edit::<Self, _>(role_id, &body).await
    }

    /// Remove a role. `DELETE /co_person_roles/{id}.json`
    pub async fn delete(&self, role_id: u64) -> Result<bool, Error> {
        debug!(role_id, "deleting co person role");
        self.client.delete::<Self>(role_id, &[]).await
    }

    /// Every role visible to the API user. `GET /co_person_roles.json`
    pub async fn view_all(&self) -> Result<Envelope<CoPersonRole>, Error> {
        self.client.view_all::<Self>(&[]).await
    }

    /// Roles held by one CO Person. `GET /co_person_roles.json?copersonid=`
    pub async fn view_per_coperson(&self, coperson_id: u64) -> Result<Envelope<CoPersonRole>, Error> {
        self.client
            .view_all::<Self>(&[("copersonid", coperson_id.to_string())])
            .await
    }

    /// Roles attached to one COU. `GET /co_person_roles.json?couid=`
    pub async fn view_per_cou(&self, cou_id: u64) -> Result<Envelope<CoPersonRole>, Error> {
        self.client
            .view_all::<Self>(&[("couid", cou_id.to_string())])
            .await
    }

    /// A single role. `GET /co_person_roles/{id}.json`
    pub async fn view_one(&self, role_id: u64) -> Result<Envelope<CoPersonRole>, Error> {
        self.client.view_one::<Self>(role_id, &[]).await
    }
}
