// HTTP capability consumed by the data layer, plus its reqwest implementation.
//
// The core only ever speaks in relative paths ("/back/api/people/?ordering=...")
// and JSON values; everything about sockets, TLS and status handling stays here.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

// ── Capability ───────────────────────────────────────────────────────

/// The four verbs the data layer needs from a REST backend.
///
/// `url` is a path (optionally with a query string) relative to whatever
/// base the implementation was built with. Successful responses yield the
/// decoded JSON body; an empty body decodes to `Value::Null`.
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<Value, Error>> + Send;

    fn post(&self, url: &str, body: &Value) -> impl Future<Output = Result<Value, Error>> + Send;

    fn patch(&self, url: &str, body: &Value)
    -> impl Future<Output = Result<Value, Error>> + Send;

    fn delete(&self, url: &str) -> impl Future<Output = Result<(), Error>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    fn get(&self, url: &str) -> impl Future<Output = Result<Value, Error>> + Send {
        (**self).get(url)
    }

    fn post(&self, url: &str, body: &Value) -> impl Future<Output = Result<Value, Error>> + Send {
        (**self).post(url, body)
    }

    fn patch(
        &self,
        url: &str,
        body: &Value,
    ) -> impl Future<Output = Result<Value, Error>> + Send {
        (**self).patch(url, body)
    }

    fn delete(&self, url: &str) -> impl Future<Output = Result<(), Error>> + Send {
        (**self).delete(url)
    }
}

// ── Error response shape (Django REST framework style) ───────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}

// ── RestClient ───────────────────────────────────────────────────────

/// Async JSON client for a REST backend rooted at `base_url`.
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    /// Build a client for `base_url` using the given transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request path against the base URL.
    ///
    /// Absolute paths replace the base path, relative ones are appended to it.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response(resp: reqwest::Response) -> Result<Value, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }

    let body = resp.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorResponse>(&raw) {
        Ok(ErrorResponse {
            detail: Some(detail),
        }) => detail,
        _ if raw.is_empty() => status.to_string(),
        _ => raw,
    };

    Error::Status {
        status: status.as_u16(),
        message,
    }
}

impl HttpClient for RestClient {
    async fn get(&self, url: &str) -> Result<Value, Error> {
        let url = self.url(url)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        handle_response(resp).await
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, Error> {
        let url = self.url(url)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        handle_response(resp).await
    }

    async fn patch(&self, url: &str, body: &Value) -> Result<Value, Error> {
        let url = self.url(url)?;
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        handle_response(resp).await
    }

    async fn delete(&self, url: &str) -> Result<(), Error> {
        let url = self.url(url)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        handle_empty(resp).await
    }
}
