// Org Identity endpoints (read-only through this client)

use crate::client::{RegistryClient, Resource, not_implemented};
use crate::envelope::{Envelope, NewObject};
use crate::error::Error;
use crate::models::OrgIdentity;

/// Org Identity endpoints (`/org_identities.json`, `/org_identities/{id}.json`).
#[derive(Debug, Clone, Copy)]
pub struct OrgIdentities<'a> {
    client: &'a RegistryClient,
}

impl Resource for OrgIdentities<'_> {
    const PATH: &'static str = "org_identities";
    const KIND: &'static str = "OrgIdentities";
    type Record = OrgIdentity;
}

impl<'a> OrgIdentities<'a> {
    pub(crate) fn new(client: &'a RegistryClient) -> Self {
        Self { client }
    }

    /// Not supported by the registry; fails without sending a request.
    #[allow(clippy::unused_self)]
    pub fn add(&self) -> Result<NewObject, Error> {
        Err(not_implemented("org_identities.add"))
    }

    /// Not supported by the registry; fails without sending a request.
    #[allow(clippy::unused_self)]
    pub fn edit(&self) -> Result<bool, Error> {
        Err(not_implemented("org_identities.edit"))
    }

    /// Not supported by the registry; fails without sending a request.
    #[allow(clippy::unused_self)]
    pub fn delete(&self) -> Result<bool, Error> {
        Err(not_implemented("org_identities.delete"))
    }

    /// `GET /org_identities.json`
    pub async fn view_all(&self) -> Result<Envelope<OrgIdentity>, Error> {
        self.client.view_all::<Self>(&[]).await
    }

    /// Org Identities linked to the configured CO. `GET /org_identities.json?coid=`
    pub async fn view_per_co(&self) -> Result<Envelope<OrgIdentity>, Error> {
        self.client.view_all::<Self>(&self.client.co_param()).await
    }

    /// Org Identities holding an identifier value.
    ///
    /// `GET /org_identities.json?coid=&search.identifier=`
    pub async fn view_per_identifier(&self, identifier: &str) -> Result<Envelope<OrgIdentity>, Error> {
        self.client
            .view_all::<Self>(&[
                ("coid", self.client.co_id().to_string()),
                ("search.identifier", identifier.to_owned()),
            ])
            .await
    }

    /// `GET /org_identities/{id}.json`
    pub async fn view_one(&self, org_identity_id: u64) -> Result<Envelope<OrgIdentity>, Error> {
        self.client.view_one::<Self>(org_identity_id, &[]).await
    }
}
