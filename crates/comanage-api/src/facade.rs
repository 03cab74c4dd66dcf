// Facade over the resource handles.

use crate::client::RegistryClient;
use crate::config::RegistryConfig;
use crate::error::Error;
use crate::resources::{
    CoPeople, CoPersonRoles, Cous, EmailAddresses, Identifiers, Names, OrgIdentities, SshKeys,
};

/// Entry point: one registry connection, one accessor per resource type.
///
/// ```no_run
/// # async fn demo() -> Result<(), comanage_api::Error> {
/// use comanage_api::{Comanage, RegistryConfig};
///
/// let config = RegistryConfig::new(
///     "https://registry.example.org/registry/",
///     "co_1.api",
///     "api-key".to_owned().into(),
///     1,
///     "Example CO",
///     3,
/// )?;
/// let api = Comanage::new(config)?;
/// let cous = api.cous().view_all().await?;
/// for cou in &cous.records {
///     println!("{}", cou.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Comanage {
    client: RegistryClient,
}

impl Comanage {
    pub fn new(config: RegistryConfig) -> Result<Self, Error> {
        Ok(Self::from_client(RegistryClient::new(config)?))
    }

    pub fn from_client(client: RegistryClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RegistryClient {
        &self.client
    }

    pub fn co_people(&self) -> CoPeople<'_> {
        CoPeople::new(&self.client)
    }

    pub fn co_person_roles(&self) -> CoPersonRoles<'_> {
        CoPersonRoles::new(&self.client)
    }

    pub fn cous(&self) -> Cous<'_> {
        Cous::new(&self.client)
    }

    pub fn identifiers(&self) -> Identifiers<'_> {
        Identifiers::new(&self.client)
    }

    pub fn names(&self) -> Names<'_> {
        Names::new(&self.client)
    }

    pub fn ssh_keys(&self) -> SshKeys<'_> {
        SshKeys::new(&self.client)
    }

    pub fn email_addresses(&self) -> EmailAddresses<'_> {
        EmailAddresses::new(&self.client)
    }

    pub fn org_identities(&self) -> OrgIdentities<'_> {
        OrgIdentities::new(&self.client)
    }
}
