// COU endpoints
//
// CO Units are CO-scoped: every call carries the CO id, either as `CoId`
// in the body or as the `coid` query parameter.

use serde::Serialize;
use tracing::debug;

use crate::client::{RegistryClient, Resource};
use crate::envelope::{Envelope, NewObject};
use crate::error::Error;
use crate::models::Cou;

/// COU endpoints (`/cous.json`, `/cous/{id}.json`).
#[derive(Debug, Clone, Copy)]
pub struct Cous<'a> {
    client: &'a RegistryClient,
}

impl Resource for Cous<'_> {
    const PATH: &'static str = "cous";
    const KIND: &'static str = "Cous";
    type Record = Cou;
}

/// Fields to change on an existing COU.
///
/// `None` keeps the current value. `parent_id: Some(0)` detaches the COU
/// from its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CouBody {
    co_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    name: String,
    description: String,
}

impl CouBody {
    /// Full-replace body: update fields win, the rest comes from `current`.
    pub(crate) fn merged(co_id: u64, current: &Cou, update: &CouUpdate) -> Self {
        let parent_id = match update.parent_id {
            Some(0) => Some(String::new()),
            Some(id) => Some(id.to_string()),
            None => current.parent_id.map(|id| id.to_string()),
        };

        Self {
            co_id,
            parent_id,
            name: update.name.clone().unwrap_or_else(|| current.name.clone()),
            description: update
                .description
                .clone()
                .or_else(|| current.description.clone())
                .unwrap_or_default(),
        }
    }
}

impl<'a> Cous<'a> {
    pub(crate) fn new(client: &'a RegistryClient) -> Self {
        Self { client }
    }

    /// Add a new COU to the configured CO.
    ///
    /// `POST /cous.json`. A `parent_id` of `None` or `Some(0)` creates a
    /// top-level COU.
    ///
    /// | Status | Meaning |
    /// |---|---|
    /// | 201 | Cou added |
    /// | 400 | Invalid Fields |
    /// | 403 | CO Does Not Exist, Name In Use, Parent Would Create Cycle, Wrong CO |
    pub async fn add(
        &self,
        name: &str,
        description: &str,
        parent_id: Option<u64>,
    ) -> Result<NewObject, Error> {
        debug!(name, ?parent_id, "adding cou");
        let body = CouBody {
            co_id: self.client.co_id(),
            parent_id: parent_id.filter(|id| *id != 0).map(|id| id.to_string()),
            name: name.to_owned(),
            description: description.to_owned(),
        };
        self.client.add::<Self, _>(&body).await
    }

    /// Edit an existing COU.
    ///
    /// Reads the COU first and re-submits every field the update leaves
    /// unset, then `PUT /cous/{id}.json`. The read and the write are two
    /// separate requests; a concurrent edit in between is overwritten.
    pub async fn edit(&self, cou_id: u64, update: &CouUpdate) -> Result<bool, Error> {
        debug!(cou_id, ?update, "editing cou");
        let current = self
            .client
            .current::<Self>(cou_id, &self.client.co_param())
            .await?;
        let body = CouBody::merged(self.client.co_id(), &current, update);
        self.client.edit::<Self, _>(cou_id, &body).await
    }

    /// Remove a COU.
    ///
    /// `DELETE /cous/{id}.json?coid=`. Fails with 403 "CoPersonRole Exists"
    /// while any role still references the COU.
    pub async fn delete(&self, cou_id: u64) -> Result<bool, Error> {
        debug!(cou_id, "deleting cou");
        self.client
            .delete::<Self>(cou_id, &self.client.co_param())
            .await
    }

    /// All COUs in the configured CO.
    ///
    /// `GET /cous.json?coid=`
    pub async fn view_all(&self) -> Result<Envelope<Cou>, Error> {
        self.client.view_all::<Self>(&self.client.co_param()).await
    }

    /// A single COU.
    ///
    /// `GET /cous/{id}.json?coid=`. An unknown id is a 404 error.
    pub async fn view_one(&self, cou_id: u64) -> Result<Envelope<Cou>, Error> {
        self.client
            .view_one::<Self>(cou_id, &self.client.co_param())
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn current() -> Cou {
        Cou {
            name: "Engineering".into(),
            description: Some("Eng Dept".into()),
            parent_id: Some(7),
            ..Cou::default()
        }
    }

    #[test]
    fn unset_fields_fall_back_to_current() {
        let body = CouBody::merged(1, &current(), &CouUpdate::default());
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "CoId": 1, "ParentId": "7", "Name": "Engineering", "Description": "Eng Dept" })
        );
    }

    #[test]
    fn caller_fields_win() {
        let update = CouUpdate {
            name: Some("Eng".into()),
            parent_id: Some(9),
            ..CouUpdate::default()
        };
        let body = CouBody::merged(1, &current(), &update);
        assert_eq!(body.name, "Eng");
        assert_eq!(body.description, "Eng Dept");
        assert_eq!(body.parent_id.as_deref(), Some("9"));
    }

    #[test]
    fn zero_parent_clears_parent() {
        let update = CouUpdate {
            parent_id: Some(0),
            ..CouUpdate::default()
        };
        let body = CouBody::merged(1, &current(), &update);
        assert_eq!(body.parent_id.as_deref(), Some(""));
    }

    #[test]
    fn top_level_cou_omits_parent() {
        let cou = Cou {
            name: "Ops".into(),
            ..Cou::default()
        };
        let body = CouBody::merged(1, &cou, &CouUpdate::default());
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("ParentId").is_none());
        assert_eq!(value["Description"], "");
    }
}
