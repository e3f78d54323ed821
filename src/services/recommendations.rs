//! Personalized recommendations and featured catalog playlists.

use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use crate::client::AppleMusicClient;
use crate::errors::AppleMusicResult;
use crate::services::{build_path, page_params, DEFAULT_STOREFRONT};
use crate::types::{PageOptions, Playlist, PlaylistsResponse, Resource, ResourcesResponse};

#[derive(Debug, Deserialize)]
struct RecommendationResponse {
    #[serde(default)]
    data: serde_json::Value,
}

/// Access to `me/recommendations` and the featured playlist shelves.
#[derive(Debug)]
pub struct RecommendationService {
    client: Arc<AppleMusicClient>,
    storefront: String,
}

impl RecommendationService {
    pub fn new(client: Arc<AppleMusicClient>) -> Self {
        Self {
            client,
            storefront: DEFAULT_STOREFRONT.to_string(),
        }
    }

    /// Changes the storefront used for the catalog shelves.
    pub fn set_storefront(&mut self, storefront: impl Into<String>) {
        self.storefront = storefront.into();
    }

    /// Lists the user's recommendations. The shelves mix resource kinds, so
    /// only the identity triplet is typed.
    #[instrument(skip(self))]
    pub async fn recommendations(&self, page: PageOptions) -> AppleMusicResult<Vec<Resource>> {
        let path = build_path("me/recommendations", &page_params(page));
        let response: ResourcesResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches a single recommendation shelf. The payload shape varies by
    /// shelf kind, so it is returned as raw JSON.
    #[instrument(skip(self))]
    pub async fn recommendation(&self, id: &str) -> AppleMusicResult<serde_json::Value> {
        let path = format!("me/recommendations/{id}");
        let response: RecommendationResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Lists the user's personal recommendation shelves.
    #[instrument(skip(self))]
    pub async fn personal(&self, page: PageOptions) -> AppleMusicResult<Vec<Resource>> {
        let path = build_path("me/recommendations/personal", &page_params(page));
        let response: ResourcesResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Lists featured catalog playlists for the storefront.
    #[instrument(skip(self))]
    pub async fn featured_playlists(&self, page: PageOptions) -> AppleMusicResult<Vec<Playlist>> {
        let path = build_path(
            &format!("catalog/{}/playlists/featured", self.storefront),
            &page_params(page),
        );
        let response: PlaylistsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Lists curated catalog playlists for the storefront.
    #[instrument(skip(self))]
    pub async fn curated_playlists(&self, page: PageOptions) -> AppleMusicResult<Vec<Playlist>> {
        let path = build_path(
            &format!("catalog/{}/playlists/curated", self.storefront),
            &page_params(page),
        );
        let response: PlaylistsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }
}
