//! The I/O seam between `HttpClient` and the network.
//!
//! # Design
//! `HttpClient` never opens sockets itself. It hands a fully built
//! `HttpRequest` to a `Transport` and gets back a fully buffered
//! `HttpResponse`. Aborting a request is done by dropping the future
//! returned from `send`, which is how the client enforces timeouts.
//!
//! `ReqwestTransport` is the default engine. Tests substitute their own
//! implementations to exercise the client without a network.

use async_trait::async_trait;
use log::trace;
use reqwest::redirect::Policy;

use crate::headers::Headers;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Error produced by a transport. Passed to callers unchanged.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request` and return the complete response.
    ///
    /// Implementations must read the whole body before returning and must
    /// not follow redirects. A non-2xx status is a successful return.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by a `reqwest::Client` with redirects and proxies
/// disabled. Connections go straight to the host in the request URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .no_proxy()
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.url.as_str());
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let mut response = builder.send().await?;
        let status = response.status().as_u16();

        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            trace!("received {} body bytes from {}", chunk.len(), request.url);
            body.extend_from_slice(&chunk);
        }

        Ok(HttpResponse { status, headers, body })
    }
}
