//! Character repository over a `Network`.
//!
//! # Design
//! The repository knows the base URL and the path conventions of the
//! character endpoints and nothing else. Errors from the network layer are
//! returned unchanged.
//!
//! `list_all` returns the first page only. The envelope's pagination metadata
//! is dropped, so callers that need every character must page themselves.

use async_trait::async_trait;

use crate::config::{ApiConfig, DEFAULT_BASE_URL};
use crate::error::Result;
use crate::network::{Network, NetworkManager};
use crate::types::{Character, PagedEnvelope};

/// Domain-level access to characters.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Characters on the first page of `/character`.
    async fn list_all(&self) -> Result<Vec<Character>>;

    /// The character with the given id.
    async fn get_by_id(&self, id: u64) -> Result<Character>;
}

/// `CharacterRepository` backed by the remote REST API.
#[derive(Clone)]
pub struct RemoteCharacterRepository<N = NetworkManager> {
    network: N,
    base_url: String,
}

impl RemoteCharacterRepository<NetworkManager> {
    /// Repository with the default network stack, configured from `config`.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_base_url(NetworkManager::from_config(config), &config.base_url)
    }
}

impl<N: Network> RemoteCharacterRepository<N> {
    /// Repository against the public API.
    pub fn new(network: N) -> Self {
        Self::with_base_url(network, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(network: N, base_url: &str) -> Self {
        Self {
            network,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn characters_url(&self) -> String {
        format!("{}/character", self.base_url)
    }

    pub fn character_url(&self, id: u64) -> String {
        format!("{}/character/{id}", self.base_url)
    }
}

#[async_trait]
impl<N: Network> CharacterRepository for RemoteCharacterRepository<N> {
    async fn list_all(&self) -> Result<Vec<Character>> {
        let envelope: PagedEnvelope<Character> = self.network.fetch(&self.characters_url()).await?;
        Ok(envelope.results)
    }

    async fn get_by_id(&self, id: u64) -> Result<Character> {
        self.network.fetch(&self.character_url(id)).await
    }
}
