// Per-resource endpoint handles
//
// Each handle borrows the shared `RegistryClient` and maps its operations
// onto the contract helpers in `crate::client`.

pub mod co_people;
pub mod co_person_roles;
pub mod cous;
pub mod email_addresses;
pub mod identifiers;
pub mod names;
pub mod org_identities;
pub mod ssh_keys;

pub use co_people::{CoPeople, CoPersonMatch, CoPersonUpdate, NewCoPerson};
pub use co_person_roles::{CoPersonRoleUpdate, CoPersonRoles, NewCoPersonRole};
pub use cous::{CouUpdate, Cous};
pub use email_addresses::{EmailAddresses, NewEmailAddress};
pub use identifiers::{IdentifierUpdate, Identifiers, NewIdentifier};
pub use names::Names;
pub use org_identities::OrgIdentities;
pub use ssh_keys::{NewSshKey, SshKeyUpdate, SshKeys};
