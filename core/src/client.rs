//! JSON-aware HTTP client with a configurable base URL and default headers.
//!
//! # Design
//! `HttpClient` holds a `ClientConfig` and a `Transport`. A call is split
//! into `build_request`, which resolves the URL, merges headers and encodes
//! the body, and `parse_response`, which sniffs the content type and decodes
//! the buffered body. Both are pure; `request` glues them around a single
//! transport round-trip and enforces the timeout. No per-request state lives
//! on the client, so concurrent calls through `&self` are independent.

use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ClientError;
use crate::headers::Headers;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{RequestBody, RequestOptions, ResponseBody, ResponseData};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Environment variable read by `ClientConfig::from_env` for the base URL.
pub const BASE_URL_ENV: &str = "JSONHTTP_BASE_URL";
/// Environment variable read by `ClientConfig::from_env` for the timeout.
pub const TIMEOUT_MS_ENV: &str = "JSONHTTP_TIMEOUT_MS";

/// Client-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub default_headers: Headers,
    /// Applied to calls that set no timeout of their own.
    #[serde(default, rename = "timeout_ms", with = "millis", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: Option<&str>, default_headers: Headers) -> Self {
        Self {
            base_url: base_url.map(str::to_string),
            default_headers,
            timeout: None,
        }
    }

    /// Build a config from `JSONHTTP_BASE_URL` and `JSONHTTP_TIMEOUT_MS`.
    /// Unset variables leave the field empty; an unparseable timeout is
    /// ignored with a warning.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV).ok().filter(|url| !url.is_empty());
        let timeout = std::env::var(TIMEOUT_MS_ENV).ok().and_then(|raw| match raw.parse::<u64>() {
            Ok(ms) => Some(Duration::from_millis(ms)),
            Err(e) => {
                warn!("ignoring {TIMEOUT_MS_ENV}={raw:?}: {e}");
                None
            }
        });
        Self {
            base_url,
            default_headers: Headers::new(),
            timeout,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{ser, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => {
                let millis = u64::try_from(duration.as_millis()).map_err(ser::Error::custom)?;
                serializer.serialize_u64(millis)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

/// Asynchronous HTTP client over a pluggable `Transport`.
#[derive(Debug, Clone)]
pub struct HttpClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl HttpClient<ReqwestTransport> {
    /// Create a client using the default reqwest transport.
    ///
    /// `base_url` is not validated here; a bad value surfaces as
    /// `ClientError::InvalidUrl` on the first call.
    pub fn new(base_url: Option<&str>, default_headers: Headers) -> Result<Self, ClientError> {
        Self::from_config(ClientConfig::new(base_url, default_headers))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new().map_err(ClientError::Transport)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> Option<&str> {
        self.config.base_url.as_deref()
    }

    pub fn default_headers(&self) -> &Headers {
        &self.config.default_headers
    }

    /// Replace the base URL. No validation happens until the next call.
    pub fn set_base_url(&mut self, url: &str) {
        self.config.base_url = Some(url.to_string());
    }

    /// Merge `headers` over the current defaults.
    pub fn set_default_headers(&mut self, headers: &Headers) {
        self.config.default_headers.merge(headers);
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.config.timeout = timeout;
    }

    /// Resolve `url` against the base URL, if any, and require an
    /// `http`/`https` scheme.
    pub fn resolve_url(&self, url: &str) -> Result<Url, ClientError> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: url.to_string(),
            reason,
        };
        let resolved = match self.config.base_url.as_deref().filter(|base| !base.is_empty()) {
            Some(base) => {
                let base = Url::parse(base).map_err(|e| invalid(format!("base URL {base:?}: {e}")))?;
                base.join(url).map_err(|e| invalid(e.to_string()))?
            }
            None => Url::parse(url).map_err(|e| invalid(e.to_string()))?,
        };
        match resolved.scheme() {
            "http" | "https" => Ok(resolved),
            other => Err(invalid(format!("unsupported scheme {other:?}"))),
        }
    }

    /// Turn `url` and `options` into the request the transport will send.
    pub fn build_request(&self, url: &str, options: &RequestOptions) -> Result<HttpRequest, ClientError> {
        let resolved = self.resolve_url(url)?;

        let mut headers = self.config.default_headers.clone();
        headers.merge(&options.headers);
        if options.body.as_ref().is_some_and(RequestBody::is_json) && !headers.contains("content-type") {
            headers.insert("content-type", JSON_CONTENT_TYPE);
        }

        Ok(HttpRequest {
            method: options.method,
            url: resolved.into(),
            headers,
            body: options.body.clone().map(RequestBody::into_bytes),
        })
    }

    /// Decode a buffered response. Never fails: a body that claims JSON but
    /// does not parse comes back as text.
    pub fn parse_response(&self, response: HttpResponse) -> ResponseData {
        let data = decode_body(&response.headers, &response.body);
        ResponseData {
            status: response.status,
            headers: response.headers,
            data,
            raw: response.body,
        }
    }

    pub async fn request(&self, url: &str, options: RequestOptions) -> Result<ResponseData, ClientError> {
        let request = self.build_request(url, &options)?;
        let target = request.url.clone();
        debug!("{} {target}", request.method);

        let send = self.transport.send(request);
        let response = match options.timeout.or(self.config.timeout) {
            Some(limit) => match tokio::time::timeout(limit, send).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("{target} aborted after {}ms", limit.as_millis());
                    return Err(ClientError::Timeout(limit));
                }
            },
            None => send.await,
        }
        .map_err(ClientError::Transport)?;

        debug!("{target} -> {} ({} bytes)", response.status, response.body.len());
        Ok(self.parse_response(response))
    }

    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<ResponseData, ClientError> {
        self.request(url, options.method(HttpMethod::Get)).await
    }

    pub async fn delete(&self, url: &str, options: RequestOptions) -> Result<ResponseData, ClientError> {
        self.request(url, options.method(HttpMethod::Delete)).await
    }

    pub async fn post(
        &self,
        url: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<ResponseData, ClientError> {
        self.request(url, with_body(options, HttpMethod::Post, body)).await
    }

    pub async fn put(
        &self,
        url: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<ResponseData, ClientError> {
        self.request(url, with_body(options, HttpMethod::Put, body)).await
    }

    pub async fn patch(
        &self,
        url: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<ResponseData, ClientError> {
        self.request(url, with_body(options, HttpMethod::Patch, body)).await
    }
}

fn with_body(mut options: RequestOptions, method: HttpMethod, body: Option<RequestBody>) -> RequestOptions {
    options.method = method;
    options.body = body;
    options
}

/// Content-type sniffing is a plain substring match, so
/// `application/json; charset=utf-8` counts as JSON.
fn decode_body(headers: &Headers, body: &[u8]) -> ResponseBody {
    let is_json = headers
        .content_type()
        .is_some_and(|content_type| content_type.contains(JSON_CONTENT_TYPE));
    if is_json {
        if let Ok(value) = serde_json::from_slice(body) {
            return ResponseBody::Json(value);
        }
    }
    match std::str::from_utf8(body) {
        Ok(text) => ResponseBody::Text(text.to_string()),
        Err(_) => ResponseBody::Binary(body.to_vec()),
    }
}
