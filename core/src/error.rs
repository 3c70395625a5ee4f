//! Error types for the character API client.
//!
//! # Design
//! Every failure of a fetch lands in exactly one `FetchError` variant. Callers
//! branch on the variant, not on the underlying cause, so equality between
//! two errors compares numeric failure codes rather than full causes.
//!
//! A transport error carrying `TransportError::UNSUPPORTED_URL` compares equal
//! to `FetchError::InvalidUrl`: a URL can be rejected either by our own parse
//! step or later by the HTTP client, and both mean the same thing to a caller.

use std::sync::Arc;

use serde_json::error::Category;
use thiserror::Error;

/// A transport-level failure reported by an `HttpClient`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error {code}: {message}")]
pub struct TransportError {
    pub code: i32,
    pub message: String,
}

impl TransportError {
    /// The URL was malformed or uses a scheme the client cannot handle.
    pub const UNSUPPORTED_URL: i32 = 1;
    pub const TIMED_OUT: i32 = 2;
    pub const HOST_NOT_FOUND: i32 = 3;
    pub const CONNECTION_FAILED: i32 = 4;
    pub const IO: i32 = 5;
    pub const OTHER: i32 = 99;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Errors returned by `Network::fetch` and passed through by repositories.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The target string is not a valid absolute URL. No request was issued.
    #[error("invalid URL")]
    InvalidUrl,

    /// The HTTP client failed before a response was received.
    #[error("request failed: {0}")]
    RequestFailed(#[source] TransportError),

    /// A response arrived with a non-2xx status or without a body.
    #[error("invalid response")]
    InvalidResponse,

    /// The response body could not be decoded into the expected type.
    #[error("decoding failed: {0}")]
    DecodingFailed(#[source] Arc<serde_json::Error>),
}

impl FetchError {
    pub fn decoding(err: serde_json::Error) -> Self {
        FetchError::DecodingFailed(Arc::new(err))
    }

    /// Numeric failure code of the underlying cause, if there is one.
    ///
    /// Transport errors report their own code. Decoding errors map the
    /// serde_json category: 1 io, 2 syntax, 3 data, 4 unexpected EOF.
    pub fn code(&self) -> Option<i32> {
        match self {
            FetchError::RequestFailed(err) => Some(err.code),
            FetchError::DecodingFailed(err) => Some(category_code(err.classify())),
            FetchError::InvalidUrl | FetchError::InvalidResponse => None,
        }
    }
}

fn category_code(category: Category) -> i32 {
    match category {
        Category::Io => 1,
        Category::Syntax => 2,
        Category::Data => 3,
        Category::Eof => 4,
    }
}

impl PartialEq for FetchError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FetchError::InvalidUrl, FetchError::InvalidUrl) => true,
            (FetchError::InvalidResponse, FetchError::InvalidResponse) => true,
            (FetchError::RequestFailed(a), FetchError::RequestFailed(b)) => a.code == b.code,
            (FetchError::DecodingFailed(_), FetchError::DecodingFailed(_)) => {
                self.code() == other.code()
            }
            (FetchError::InvalidUrl, FetchError::RequestFailed(err))
            | (FetchError::RequestFailed(err), FetchError::InvalidUrl) => {
                err.code == TransportError::UNSUPPORTED_URL
            }
            _ => false,
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        FetchError::RequestFailed(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::decoding(err)
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FetchError>;
