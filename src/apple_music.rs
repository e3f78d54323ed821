//! Top-level SDK entry point wiring the services to one shared client.

use std::sync::Arc;

use crate::auth::DeveloperToken;
use crate::client::AppleMusicClient;
use crate::config::ClientConfig;
use crate::errors::AppleMusicResult;
use crate::services::{
    CatalogService, LibraryService, PlaylistService, RadioService, RecommendationService,
    SearchService,
};

/// The assembled SDK: one shared client behind per-area services.
///
/// Construct it from a [`ClientConfig`], then call through the public
/// service fields. Tokens can be swapped at runtime via
/// [`set_developer_token`](Self::set_developer_token) and
/// [`set_user_token`](Self::set_user_token); the next request picks them
/// up.
#[derive(Debug)]
pub struct AppleMusic {
    client: Arc<AppleMusicClient>,
    /// Catalog lookups: songs, albums, artists, playlists.
    pub catalog: CatalogService,
    /// The user's library.
    pub library: LibraryService,
    /// Playlist reads and edits.
    pub playlists: PlaylistService,
    /// Catalog and library search.
    pub search: SearchService,
    /// Personalized recommendations.
    pub recommendations: RecommendationService,
    /// Radio stations.
    pub radio: RadioService,
}

impl AppleMusic {
    /// Builds the SDK from a configuration.
    pub fn new(config: ClientConfig) -> AppleMusicResult<Self> {
        let client = Arc::new(AppleMusicClient::new(config)?);
        Ok(Self::from_client(client))
    }

    /// Builds the SDK around an existing client handle.
    pub fn from_client(client: Arc<AppleMusicClient>) -> Self {
        Self {
            catalog: CatalogService::new(Arc::clone(&client)),
            library: LibraryService::new(Arc::clone(&client)),
            playlists: PlaylistService::new(Arc::clone(&client)),
            search: SearchService::new(Arc::clone(&client)),
            recommendations: RecommendationService::new(Arc::clone(&client)),
            radio: RadioService::new(Arc::clone(&client)),
            client,
        }
    }

    /// The shared transport behind the services.
    pub fn client(&self) -> &Arc<AppleMusicClient> {
        &self.client
    }

    /// Installs a developer token for `Authorization: Bearer`.
    pub fn set_developer_token(&self, token: &DeveloperToken) {
        self.client.set_developer_token(token.as_str());
    }

    /// Installs the user token sent as `Music-User-Token`.
    pub fn set_user_token(&self, token: impl Into<String>) {
        self.client.set_user_token(token);
    }

    /// Changes the storefront on every storefront-aware service.
    pub fn set_storefront(&mut self, storefront: impl Into<String>) {
        let storefront = storefront.into();
        self.catalog.set_storefront(storefront.clone());
        self.playlists.set_storefront(storefront.clone());
        self.search.set_storefront(storefront.clone());
        self.recommendations.set_storefront(storefront.clone());
        self.radio.set_storefront(storefront);
    }
}
