// comanage-api: Async Rust client for the COmanage Registry REST API (v1)

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod facade;
pub mod models;
pub mod options;
pub mod resources;
pub mod transport;

pub use client::{RegistryClient, Resource};
pub use config::RegistryConfig;
pub use envelope::{API_VERSION, Envelope, NewObject};
pub use error::Error;
pub use facade::Comanage;
pub use options::{Affiliation, EmailPersonType, EntityType, PersonType, SshKeyType, Status};
pub use transport::{TlsMode, TransportConfig};
