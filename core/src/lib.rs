//! Minimal asynchronous HTTP client with JSON conveniences.
//!
//! # Overview
//! `HttpClient` issues requests against an optional base URL, merges default
//! and per-call headers, serializes JSON bodies, decodes JSON responses, and
//! enforces per-request timeouts. Socket I/O is delegated to a `Transport`.
//!
//! # Design
//! - `HttpClient` holds only a `ClientConfig` and its transport; nothing
//!   per-request is stored, so concurrent calls through `&self` are safe.
//! - Each call is split into `build_request` (pure) and `parse_response`
//!   (pure) around one `Transport::send`, so the I/O boundary is explicit.
//! - Non-2xx statuses are ordinary responses. Only malformed URLs,
//!   timeouts, and transport failures are errors.
//! - Header names are matched case-insensitively.
//!
//! ```no_run
//! # async fn demo() -> Result<(), jsonhttp_core::ClientError> {
//! use jsonhttp_core::{Headers, HttpClient, RequestOptions};
//! use serde_json::json;
//!
//! let client = HttpClient::new(Some("https://api.example.com/v1/"), Headers::new())?;
//! let created = client
//!     .post("widgets", Some(json!({"name": "gear"}).into()), RequestOptions::new())
//!     .await?;
//! println!("{} {:?}", created.status, created.data);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod headers;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{ClientConfig, HttpClient};
pub use error::ClientError;
pub use headers::Headers;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::{RequestBody, RequestOptions, ResponseBody, ResponseData};
