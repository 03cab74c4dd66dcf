// ── Runtime connection configuration ──
//
// Describes *which* registry to talk to and *as whom*. Carries credential
// data but never touches disk; `comanage-config` builds one from a profile.

use secrecy::SecretString;
use url::Url;

use crate::error::Error;
use crate::transport::{TlsMode, TransportConfig};

/// Connection and CO settings shared by every resource handle.
///
/// Immutable once handed to a [`RegistryClient`](crate::RegistryClient).
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Set only through `new`, which strips the trailing slash.
    url: String,
    /// Basic-auth API user (typically `co_<id>.<name>`).
    pub username: String,
    /// Basic-auth API key.
    pub password: SecretString,
    /// CO id injected into CO-scoped requests as `CoId` / `coid`.
    pub co_id: u64,
    /// Human-readable CO name.
    pub co_name: String,
    /// Authenticator plugin id that owns SSH keys.
    pub ssh_key_authenticator_id: u64,
    /// HTTP transport settings.
    pub transport: TransportConfig,
}

impl RegistryConfig {
    /// Build a config with default transport settings.
    ///
    /// The URL is validated and normalized here so every request path can
    /// be appended as `{url}/{resource}.json`.
    pub fn new(
        url: &str,
        username: impl Into<String>,
        password: SecretString,
        co_id: u64,
        co_name: impl Into<String>,
        ssh_key_authenticator_id: u64,
    ) -> Result<Self, Error> {
        Ok(Self {
            url: normalize_base_url(url)?,
            username: username.into(),
            password,
            co_id,
            co_name: co_name.into(),
            ssh_key_authenticator_id,
            transport: TransportConfig::default(),
        })
    }

    /// Registry base URL without a trailing slash
    /// (e.g. `https://registry.example.org/registry`).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Override the TLS verification mode.
    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.transport.tls = tls;
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.transport.timeout = timeout;
        self
    }
}

/// Parse the base URL and strip any trailing slash.
fn normalize_base_url(raw: &str) -> Result<String, Error> {
    let url = Url::parse(raw)?;
    Ok(url.as_str().trim_end_matches('/').to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(url: &str) -> Result<RegistryConfig, Error> {
        RegistryConfig::new(url, "co_1.api", SecretString::from("secret"), 1, "Example", 3)
    }

    #[test]
    fn strips_trailing_slash() {
        let cfg = config("https://registry.example.org/registry/").unwrap();
        assert_eq!(cfg.url(), "https://registry.example.org/registry");
    }

    #[test]
    fn keeps_url_without_trailing_slash() {
        let cfg = config("https://registry.example.org/registry").unwrap();
        assert_eq!(cfg.url(), "https://registry.example.org/registry");
    }

    #[test]
    fn host_only_url_has_no_trailing_slash() {
        let cfg = config("https://registry.example.org").unwrap();
        assert_eq!(cfg.url(), "https://registry.example.org");
    }

    #[test]
    fn builders_keep_normalized_url() {
        let cfg = config("https://registry.example.org/registry/")
            .unwrap()
            .with_tls(TlsMode::DangerAcceptInvalid)
            .with_timeout(std::time::Duration::from_secs(5));
        assert_eq!(cfg.url(), "https://registry.example.org/registry");
        assert_eq!(cfg.transport.timeout, std::time::Duration::from_secs(5));
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(matches!(config("not a url"), Err(Error::InvalidUrl(_))));
    }
}
