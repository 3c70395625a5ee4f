//! Async client core for the Rick and Morty character API.
//!
//! # Overview
//! Three layers, leaf to root:
//! - `http`: the injectable `HttpClient` capability and its ureq-backed
//!   default.
//! - `network`: `Network::fetch` issues one request, checks the status and
//!   decodes JSON into any `DeserializeOwned` type, classifying every failure
//!   as one `FetchError`.
//! - `repository`: builds character URLs and unwraps paged envelopes.
//!
//! # Design
//! - Nothing here holds per-call state; one request per call, no retries,
//!   no caching.
//! - Tests substitute `mock::MockHttpClient` (or their own `Network`) and
//!   never touch the network.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod network;
pub mod repository;
pub mod types;

pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{FetchError, Result, TransportError};
pub use http::{HttpClient, HttpRequest, HttpResponse, UreqClient};
pub use network::{Network, NetworkManager};
pub use repository::{CharacterRepository, RemoteCharacterRepository};
pub use types::{Character, Location, PageInfo, PagedEnvelope};
