// CO Person endpoints
//
// CO-scoped like COUs: list, search, and delete carry `coid`. Besides plain
// CRUD the registry offers two search styles: `matches` (structured
// given/family/mail filters) and `find` (free-text `q`).

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::client::{RegistryClient, Resource};
use crate::envelope::{Envelope, NewObject};
use crate::error::Error;
use crate::models::CoPerson;
use crate::options::Status;

/// CO Person endpoints (`/co_people.json`, `/co_people/{id}.json`).
#[derive(Debug, Clone, Copy)]
pub struct CoPeople<'a> {
    client: &'a RegistryClient,
}

impl Resource for CoPeople<'_> {
    const PATH: &'static str = "co_people";
    const KIND: &'static str = "CoPeople";
    type Record = CoPerson;
}

/// Fields for a new CO Person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoPerson {
    pub status: Status,
    pub timezone: Option<String>,
    /// `YYYY-MM-DD`
    pub date_of_birth: Option<String>,
}

impl Default for NewCoPerson {
    fn default() -> Self {
        Self {
            status: Status::Active,
            timezone: None,
            date_of_birth: None,
        }
    }
}

/// Fields to change on an existing CO Person; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoPersonUpdate {
    pub status: Option<Status>,
    pub timezone: Option<String>,
    pub date_of_birth: Option<String>,
}

/// Structured filters for [`CoPeople::matches`]. At least one must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoPersonMatch {
    pub given: Option<String>,
    pub family: Option<String>,
    pub mail: Option<String>,
}

impl CoPersonMatch {
    fn params(&self, co_id: u64) -> Vec<(&'static str, String)> {
        let mut params = vec![("coid", co_id.to_string())];
        for (key, value) in [
            ("given", &self.given),
            ("family", &self.family),
            ("mail", &self.mail),
        ] {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                params.push((key, v.to_owned()));
            }
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CoPersonBody {
    co_id: u64,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_of_birth: Option<String>,
}

impl CoPersonBody {
    pub(crate) fn merged(co_id: u64, current: &CoPerson, update: &CoPersonUpdate) -> Self {
        Self {
            co_id,
            status: update
                .status
                .map(|s| s.as_ref().to_owned())
                .or_else(|| current.status.clone())
                .unwrap_or_else(|| Status::Active.as_ref().to_owned()),
            timezone: update.timezone.clone().or_else(|| current.timezone.clone()),
            date_of_birth: update
                .date_of_birth
                .clone()
                .or_else(|| current.date_of_birth.clone()),
        }
    }
}

/// Keep the first record for each `Id`; records without an id are kept.
fn distinct_by_id(records: Vec<CoPerson>) -> Vec<CoPerson> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|p| p.meta.id.is_none_or(|id| seen.insert(id)))
        .collect()
}

impl<'a> CoPeople<'a> {
    pub(crate) fn new(client: &'a RegistryClient) -> Self {
        Self { client }
    }

    /// Add a new CO Person to the configured CO.
    ///
    /// `POST /co_people.json` → 201 `NewObject` with `ObjectType: "CoPerson"`.
    pub async fn add(&self, person: &NewCoPerson) -> Result<NewObject, Error> {
        debug!(status = %person.status, "adding co person");
        let body = CoPersonBody {
            co_id: self.client.co_id(),
            status: person.status.as_ref().to_owned(),
            timezone: person.timezone.clone(),
            date_of_birth: person.date_of_birth.clone(),
        };
        self.client.add::<Self, _>(&body).await
    }

    /// Edit an existing CO Person (read, merge, `PUT /co_people/{id}.json`).
    pub async fn edit(&self, coperson_id: u64, update: &CoPersonUpdate) -> Result<bool, Error> {
        debug!(coperson_id, ?update, "editing co person");
        let current = self.client.current::<Self>(coperson_id, &[]).await?;
        let body = CoPersonBody::merged(self.client.co_id(), &current, update);
        self.client.edit::<Self, _>(coperson_id, &body).await
    }

    /// Remove a CO Person. `DELETE /co_people/{id}.json?coid=`
    pub async fn delete(&self, coperson_id: u64) -> Result<bool, Error> {
        debug!(coperson_id, "deleting co person");
        self.client
            .delete::<Self>(coperson_id, &self.client.co_param())
            .await
    }

    /// All CO People in the configured CO. `GET /co_people.json?coid=`
    pub async fn view_all(&self) -> Result<Envelope<CoPerson>, Error> {
        self.client.view_all::<Self>(&self.client.co_param()).await
    }

    /// CO People holding the given identifier value.
    ///
    /// `GET /co_people.json?coid=&search.identifier=`
    pub async fn view_per_identifier(&self, identifier: &str) -> Result<Envelope<CoPerson>, Error> {
        debug!(identifier, "viewing co people per identifier");
        self.client
            .view_all::<Self>(&[
                ("coid", self.client.co_id().to_string()),
                ("search.identifier", identifier.to_owned()),
            ])
            .await
    }

    /// A single CO Person. `GET /co_people/{id}.json`
    pub async fn view_one(&self, coperson_id: u64) -> Result<Envelope<CoPerson>, Error> {
        self.client.view_one::<Self>(coperson_id, &[]).await
    }

    /// CO People matching given name, family name, and/or email address.
    ///
    /// `GET /co_people.json?coid=&given=&family=&mail=`. With `distinct`, a
    /// person matched through several names or addresses is returned once.
    pub async fn matches(
        &self,
        filter: &CoPersonMatch,
        distinct: bool,
    ) -> Result<Envelope<CoPerson>, Error> {
        let params = filter.params(self.client.co_id());
        if params.len() == 1 {
            return Err(Error::MissingFilter("given, family, mail"));
        }
        debug!(?filter, distinct, "matching co people");

        let mut envelope = self.client.view_all::<Self>(&params).await?;
        if distinct {
            envelope.records = distinct_by_id(envelope.records);
        }
        Ok(envelope)
    }

    /// Free-text search across CO People. `GET /co_people.json?coid=&q=`
    pub async fn find(&self, query: &str) -> Result<Envelope<CoPerson>, Error> {
        debug!(query, "finding co people");
        self.client
            .view_all::<Self>(&[
                ("coid", self.client.co_id().to_string()),
                ("q", query.to_owned()),
            ])
            .await
    }
}
