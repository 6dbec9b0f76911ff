//! Per-call request options and the decoded response.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::headers::Headers;
use crate::http::HttpMethod;

/// Payload of an outgoing request.
///
/// `Text` and `Binary` are sent as-is. `Json` is serialized with
/// `serde_json` and gets `content-type: application/json` unless the caller
/// already set a content type.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Text(String),
    Binary(Vec<u8>),
    Json(Value),
}

impl RequestBody {
    /// Serialize any `Serialize` value into a structured JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ClientError> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }

    pub fn is_json(&self) -> bool {
        matches!(self, RequestBody::Json(_))
    }

    /// Encode the body into the bytes that go on the wire.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RequestBody::Text(text) => text.into_bytes(),
            RequestBody::Binary(bytes) => bytes,
            // `Value` serialization has no failure path.
            RequestBody::Json(value) => value.to_string().into_bytes(),
        }
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Binary(bytes)
    }
}

impl From<&[u8]> for RequestBody {
    fn from(bytes: &[u8]) -> Self {
        RequestBody::Binary(bytes.to_vec())
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

/// Options for a single call. Defaults to a bodiless GET with no extra
/// headers and no timeout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Headers,
    pub timeout: Option<Duration>,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.merge(&headers);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Decoded response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The response declared a JSON content type and parsed cleanly.
    Json(Value),
    /// Any other body that is valid UTF-8, including malformed JSON.
    Text(String),
    /// A body that is not valid UTF-8.
    Binary(Vec<u8>),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ResponseBody::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// A fully buffered response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseData {
    pub status: u16,
    pub headers: Headers,
    pub data: ResponseBody,
    /// Exactly the bytes received, whatever `data` ended up as.
    pub raw: Vec<u8>,
}

impl ResponseData {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the raw body into `T`, regardless of the declared
    /// content type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.raw).map_err(|e| ClientError::Deserialization(e.to_string()))
    }
}
