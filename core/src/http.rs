//! HTTP round-trip types exchanged with the transport.
//!
//! # Design
//! These types describe one HTTP request and its response as plain data.
//! `HttpClient::build_request` produces an `HttpRequest`, a `Transport`
//! executes it, and `HttpClient::parse_response` consumes the resulting
//! `HttpResponse`. Only the transport touches the network, so request
//! construction and response decoding stay deterministic and easy to test.
//!
//! All fields use owned types (`String`, `Vec`) so values can move into a
//! transport future without lifetime concerns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::headers::Headers;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is always absolute and already validated to use `http` or `https`.
/// `headers` is the fully merged set, including any injected content type.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

/// An HTTP response described as plain data.
///
/// `body` holds every byte the server sent, accumulated by the transport
/// before it hands the response back.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}
