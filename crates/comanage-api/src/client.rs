// Registry HTTP client
//
// Wraps `reqwest::Client` with registry URL construction, basic auth,
// envelope encoding, and the shared status-code table. Resource handles
// (cous, names, ...) live in `crate::resources` and only ever talk to the
// registry through the typed helpers at the bottom of this file.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::envelope::{Envelope, ErrorResponse, NewObject, RequestEnvelope};
use crate::error::Error;

/// A resource type exposed by the registry.
///
/// `PATH` is the URL segment (`cous`), `KIND` the envelope type name
/// (`Cous`). Implemented by every resource handle.
pub trait Resource {
    const PATH: &'static str;
    const KIND: &'static str;

    /// Record type returned by views.
    type Record: DeserializeOwned;
}

/// Raw HTTP client for the COmanage Registry REST API.
///
/// Holds the only copy of the connection settings; resource handles borrow
/// it. Cheap to share across tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    config: Arc<RegistryConfig>,
}

impl RegistryClient {
    /// Create a client, building the HTTP transport from `config.transport`.
    pub fn new(config: RegistryConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// The caller's TLS and timeout settings are used as-is; basic auth is
    /// still applied per request from `config`.
    pub fn with_client(http: reqwest::Client, config: RegistryConfig) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The CO every scoped request is bound to.
    pub fn co_id(&self) -> u64 {
        self.config.co_id
    }

    /// `coid` query parameter for CO-scoped collections.
    pub(crate) fn co_param(&self) -> [(&'static str, String); 1] {
        [("coid", self.config.co_id.to_string())]
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/{path}`; `path` never starts with a slash.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.url(), path)
    }

    fn collection_path<R: Resource>() -> String {
        format!("{}.json", R::PATH)
    }

    fn record_path<R: Resource>(id: u64) -> String {
        format!("{}/{id}.json", R::PATH)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        debug!("{method} {url}");
        self.http.request(method, url).basic_auth(
            &self.config.username,
            Some(self.config.password.expose_secret()),
        )
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<reqwest::Response, Error> {
        let mut req = self.request(method, path);
        if !params.is_empty() {
            debug!(?params, "query");
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        Ok(req.send().await?)
    }

    // ── Outcome table ────────────────────────────────────────────────

    /// 200 → envelope, 204 → empty envelope, anything else → error.
    async fn expect_envelope<T: DeserializeOwned>(
        kind: &str,
        resp: reqwest::Response,
    ) -> Result<Envelope<T>, Error> {
        match resp.status() {
            StatusCode::OK => {
                let body = resp.text().await?;
                if body.trim().is_empty() {
                    return Ok(Envelope::empty(kind));
                }
                decode(body)
            }
            StatusCode::NO_CONTENT => {
                debug!(kind, "no content, returning empty collection");
                Ok(Envelope::empty(kind))
            }
            status => Err(Self::parse_error(status, resp).await),
        }
    }

    /// 201 → `NewObject`, anything else → error.
    async fn expect_created(resp: reqwest::Response) -> Result<NewObject, Error> {
        let status = resp.status();
        if status == StatusCode::CREATED {
            let body = resp.text().await?;
            decode(body)
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// 200 → `true`, anything else → error.
    async fn expect_ok(resp: reqwest::Response) -> Result<bool, Error> {
        let status = resp.status();
        if status == StatusCode::OK {
            Ok(true)
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Build an error carrying the status and the registry's reason text.
    ///
    /// The registry reports business-rule failures in the status line
    /// ("403 Name In Use"). If the line carries only the canonical phrase,
    /// a plain-text body is used instead; a JSON `ErrorResponse` body
    /// contributes its `InvalidFields`.
    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        let phrase = resp
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .and_then(|r| std::str::from_utf8(r.as_bytes()).ok())
            .map(str::to_owned);
        let url = resp.url().to_string();
        let raw = resp.text().await.unwrap_or_default();

        let parsed = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .filter(|e| e.response_type.as_deref() == Some("ErrorResponse"));
        let is_json = parsed.is_some() || serde_json::from_str::<serde_json::Value>(&raw).is_ok();

        let canonical = status.canonical_reason().unwrap_or("Unknown Status");
        let body_text = raw.trim();
        let reason = match phrase {
            Some(p) => p,
            None if !is_json && !body_text.is_empty() => body_text.to_owned(),
            None => canonical.to_owned(),
        };

        warn!(status = status.as_u16(), %reason, %url, "registry request failed");

        if status == StatusCode::UNAUTHORIZED {
            return Error::Authentication { message: reason };
        }

        Error::Http {
            status: status.as_u16(),
            reason,
            invalid_fields: parsed.and_then(|e| e.invalid_fields),
        }
    }

    // ━━ Contract operations ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /{resource}.json?{params}`
    pub(crate) async fn view_all<R: Resource>(
        &self,
        params: &[(&str, String)],
    ) -> Result<Envelope<R::Record>, Error> {
        let resp = self
            .send(Method::GET, &Self::collection_path::<R>(), params, None::<&()>)
            .await?;
        Self::expect_envelope(R::KIND, resp).await
    }

    /// `GET /{resource}/{id}.json?{params}`
    pub(crate) async fn view_one<R: Resource>(
        &self,
        id: u64,
        params: &[(&str, String)],
    ) -> Result<Envelope<R::Record>, Error> {
        let resp = self
            .send(Method::GET, &Self::record_path::<R>(id), params, None::<&()>)
            .await?;
        Self::expect_envelope(R::KIND, resp).await
    }

    /// `POST /{resource}.json` with one record; expects 201.
    pub(crate) async fn add<R: Resource, B: Serialize + Sync>(
        &self,
        record: &B,
    ) -> Result<NewObject, Error> {
        self.post_created(&Self::collection_path::<R>(), R::KIND, record)
            .await
    }

    /// `POST /{path}` with one record under `kind`; expects 201.
    pub(crate) async fn post_created<B: Serialize + Sync>(
        &self,
        path: &str,
        kind: &'static str,
        record: &B,
    ) -> Result<NewObject, Error> {
        let records = std::slice::from_ref(record);
        let body = RequestEnvelope::new(kind, records);
        let resp = self.send(Method::POST, path, &[], Some(&body)).await?;
        Self::expect_created(resp).await
    }

    /// `PUT /{resource}/{id}.json` with one record; expects 200.
    pub(crate) async fn edit<R: Resource, B: Serialize + Sync>(
        &self,
        id: u64,
        record: &B,
    ) -> Result<bool, Error> {
        let records = std::slice::from_ref(record);
        let body = RequestEnvelope::new(R::KIND, records);
        let resp = self
            .send(Method::PUT, &Self::record_path::<R>(id), &[], Some(&body))
            .await?;
        Self::expect_ok(resp).await
    }

    /// `DELETE /{resource}/{id}.json?{params}`; expects 200.
    pub(crate) async fn delete<R: Resource>(
        &self,
        id: u64,
        params: &[(&str, String)],
    ) -> Result<bool, Error> {
        let resp = self
            .send(Method::DELETE, &Self::record_path::<R>(id), params, None::<&()>)
            .await?;
        Self::expect_ok(resp).await
    }

    /// View one record and return it, or a 404 error if the envelope is empty.
    pub(crate) async fn current<R: Resource>(
        &self,
        id: u64,
        params: &[(&str, String)],
    ) -> Result<R::Record, Error> {
        self.view_one::<R>(id, params)
            .await?
            .into_records()
            .into_iter()
            .next()
            .ok_or_else(|| Error::Http {
                status: 404,
                reason: format!("{} {id} Unknown", R::KIND),
                invalid_fields: None,
            })
    }
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

/// Error for operations the registry does not expose.
pub(crate) fn not_implemented(operation: &'static str) -> Error {
    debug!(operation, "operation not implemented by the registry");
    Error::NotImplemented(operation)
}
