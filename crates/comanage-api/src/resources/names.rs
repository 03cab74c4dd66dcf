// Name endpoints
//
// The registry only exposes reads for names; add/edit/delete are kept for
// API symmetry and always fail with `Error::NotImplemented`.

use crate::client::{RegistryClient, Resource, not_implemented};
use crate::envelope::{Envelope, NewObject};
use crate::error::Error;
use crate::models::Name;
use crate::options::PersonType;

/// Name endpoints (`/names.json`, `/names/{id}.json`).
#[derive(Debug, Clone, Copy)]
pub struct Names<'a> {
    client: &'a RegistryClient,
}

impl Resource for Names<'_> {
    const PATH: &'static str = "names";
    const KIND: &'static str = "Names";
    type Record = Name;
}

impl<'a> Names<'a> {
    pub(crate) fn new(client: &'a RegistryClient) -> Self {
        Self { client }
    }

    /// Not supported by the registry; fails without sending a request.
    #[allow(clippy::unused_self)]
    pub fn add(&self) -> Result<NewObject, Error> {
        Err(not_implemented("names.add"))
    }

    /// Not supported by the registry; fails without sending a request.
    #[allow(clippy::unused_self)]
    pub fn edit(&self) -> Result<bool, Error> {
        Err(not_implemented("names.edit"))
    }

    /// Not supported by the registry; fails without sending a request.
    #[allow(clippy::unused_self)]
    pub fn delete(&self) -> Result<bool, Error> {
        Err(not_implemented("names.delete"))
    }

    /// `GET /names.json`
    pub async fn view_all(&self) -> Result<Envelope<Name>, Error> {
        self.client.view_all::<Self>(&[]).await
    }

    /// Names attached to a CO Person or Org Identity.
    ///
    /// `GET /names.json?{person_type}={person_id}`. Accepts a
    /// [`PersonType`] or a string; an unknown string fails locally with
    /// `Error::InvalidOption` and no request is sent.
    pub async fn view_per_person<P>(
        &self,
        person_type: P,
        person_id: u64,
    ) -> Result<Envelope<Name>, Error>
    where
        P: TryInto<PersonType>,
        Error: From<P::Error>,
    {
        let person_type = person_type.try_into()?;
        self.client
            .view_all::<Self>(&[(person_type.as_ref(), person_id.to_string())])
            .await
    }

    /// `GET /names/{id}.json`
    pub async fn view_one(&self, name_id: u64) -> Result<Envelope<Name>, Error> {
        self.client.view_one::<Self>(name_id, &[]).await
    }
}
