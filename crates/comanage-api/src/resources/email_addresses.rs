// Email address endpoints
//
// Add and the reads are supported; the registry has no edit or delete for
// email addresses through this API, so those fail locally.

use serde::Serialize;
use tracing::debug;

use crate::client::{RegistryClient, Resource, not_implemented};
use crate::envelope::{Envelope, NewObject};
use crate::error::Error;
use crate::models::{EmailAddress, PersonRef};
use crate::options::EmailPersonType;

/// Email address endpoints (`/email_addresses.json`, `/email_addresses/{id}.json`).
#[derive(Debug, Clone, Copy)]
pub struct EmailAddresses<'a> {
    client: &'a RegistryClient,
}

impl Resource for EmailAddresses<'_> {
    const PATH: &'static str = "email_addresses";
    const KIND: &'static str = "EmailAddresses";
    type Record = EmailAddress;
}

/// Fields for a new email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmailAddress {
    pub mail: String,
    /// Address type as configured in the CO; `official` by default.
    pub email_type: String,
    pub description: String,
    pub verified: bool,
    pub person_type: EmailPersonType,
    pub person_id: u64,
}

impl NewEmailAddress {
    /// An unverified `official` address with no description.
    pub fn new(mail: impl Into<String>, person_type: EmailPersonType, person_id: u64) -> Self {
        Self {
            mail: mail.into(),
            email_type: "official".into(),
            description: String::new(),
            verified: false,
            person_type,
            person_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EmailAddressBody<'a> {
    mail: &'a str,
    #[serde(rename = "Type")]
    email_type: &'a str,
    description: &'a str,
    verified: bool,
    person: PersonRef,
}

impl<'a> EmailAddresses<'a> {
    pub(crate) fn new(client: &'a RegistryClient) -> Self {
        Self { client }
    }

    /// Attach an email address to a person. `POST /email_addresses.json`
    ///
    /// 403 "No Person Specified" / "Person Does Not Exist" when the owner
    /// is missing.
    pub async fn add(&self, address: &NewEmailAddress) -> Result<NewObject, Error> {
        debug!(
            person_type = %address.person_type,
            person_id = address.person_id,
            "adding email address"
        );
        let body = EmailAddressBody {
            mail: &address.mail,
            email_type: &address.email_type,
            description: &address.description,
            verified: address.verified,
            person: PersonRef::new(address.person_type.person_ref_type(), address.person_id),
        };
        self.client.add::<Self, _>(&body).await
    }

    /// Not supported by the registry; fails without sending a request.
    #[allow(clippy::unused_self)]
    pub fn edit(&self) -> Result<bool, Error> {
        Err(not_implemented("email_addresses.edit"))
    }

    /// Not supported by the registry; fails without sending a request.
    #[allow(clippy::unused_self)]
    pub fn delete(&self) -> Result<bool, Error> {
        Err(not_implemented("email_addresses.delete"))
    }

    /// `GET /email_addresses.json`
    pub async fn view_all(&self) -> Result<Envelope<EmailAddress>, Error> {
        self.client.view_all::<Self>(&[]).await
    }

    /// Addresses attached to a CO Department, CO Person, Organization, or
    /// Org Identity. `GET /email_addresses.json?{person_type}={person_id}`
    ///
    /// A person that exists but has no addresses comes back as 204 and is
    /// returned as an empty envelope.
    pub async fn view_per_person<P>(
        &self,
        person_type: P,
        person_id: u64,
    ) -> Result<Envelope<EmailAddress>, Error>
    where
        P: TryInto<EmailPersonType>,
        Error: From<P::Error>,
    {
        let person_type = person_type.try_into()?;
        self.client
            .view_all::<Self>(&[(person_type.as_ref(), person_id.to_string())])
            .await
    }

    /// `GET /email_addresses/{id}.json`
    pub async fn view_one(&self, email_address_id: u64) -> Result<Envelope<EmailAddress>, Error> {
        self.client.view_one::<Self>(email_address_id, &[]).await
    }
}
