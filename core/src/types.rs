//! Domain DTOs for the character API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `Character` equality and hashing use the numeric `id` only: two values
//! with the same id describe the same resource, even if one is a stale
//! snapshot. `Location` compares structurally.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Pagination metadata attached to every list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of items across all pages.
    pub count: u64,
    /// Total number of pages.
    pub pages: u64,
    /// Absolute URL of the next page, `None` on the last page.
    pub next: Option<String>,
    /// Absolute URL of the previous page, `None` on the first page.
    pub prev: Option<String>,
}

impl PageInfo {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }
}

/// One page of results as returned by a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedEnvelope<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

/// A named reference to a location resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub url: String,
}

impl Location {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A single character returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    /// `Alive`, `Dead` or `unknown`.
    pub status: String,
    pub species: String,
    /// Subspecies; the API sends an empty string when there is none.
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: String,
    pub origin: Location,
    /// Last known location.
    pub location: Location,
    pub image: String,
    /// Episode URLs, in airing order.
    pub episode: Vec<String>,
    pub url: String,
    pub created: String,
}

impl PartialEq for Character {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Character {}

impl Hash for Character {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
