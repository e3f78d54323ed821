//! Catalog lookups by storefront and resource ID.

use std::sync::Arc;

use tracing::instrument;

use crate::client::AppleMusicClient;
use crate::errors::{AppleMusicError, AppleMusicResult};
use crate::services::{build_path, comma_separated, first_resource, require_ids, DEFAULT_STOREFRONT};
use crate::types::{
    Album, AlbumsResponse, Artist, ArtistsResponse, Playlist, PlaylistsResponse, Song,
    SongsResponse,
};

/// Access to `catalog/<storefront>/...` endpoints.
#[derive(Debug)]
pub struct CatalogService {
    client: Arc<AppleMusicClient>,
    storefront: String,
}

impl CatalogService {
    pub fn new(client: Arc<AppleMusicClient>) -> Self {
        Self {
            client,
            storefront: DEFAULT_STOREFRONT.to_string(),
        }
    }

    /// Changes the storefront used for subsequent lookups.
    pub fn set_storefront(&mut self, storefront: impl Into<String>) {
        self.storefront = storefront.into();
    }

    pub fn storefront(&self) -> &str {
        &self.storefront
    }

    /// Fetches a song by catalog ID.
    #[instrument(skip(self))]
    pub async fn song(&self, id: &str) -> AppleMusicResult<Song> {
        let path = format!("catalog/{}/songs/{}", self.storefront, id);
        let response: SongsResponse = self.client.get(&path).await?;
        first_resource("song", id, response.data)
    }

    /// Fetches multiple songs by catalog ID.
    #[instrument(skip(self))]
    pub async fn songs(&self, ids: &[&str]) -> AppleMusicResult<Vec<Song>> {
        require_ids(ids)?;
        let path = build_path(
            &format!("catalog/{}/songs", self.storefront),
            &[("ids", comma_separated(ids))],
        );
        let response: SongsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches an album by catalog ID.
    #[instrument(skip(self))]
    pub async fn album(&self, id: &str) -> AppleMusicResult<Album> {
        let path = format!("catalog/{}/albums/{}", self.storefront, id);
        let response: AlbumsResponse = self.client.get(&path).await?;
        first_resource("album", id, response.data)
    }

    /// Fetches multiple albums by catalog ID.
    #[instrument(skip(self))]
    pub async fn albums(&self, ids: &[&str]) -> AppleMusicResult<Vec<Album>> {
        require_ids(ids)?;
        let path = build_path(
            &format!("catalog/{}/albums", self.storefront),
            &[("ids", comma_separated(ids))],
        );
        let response: AlbumsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches an artist by catalog ID.
    #[instrument(skip(self))]
    pub async fn artist(&self, id: &str) -> AppleMusicResult<Artist> {
        let path = format!("catalog/{}/artists/{}", self.storefront, id);
        let response: ArtistsResponse = self.client.get(&path).await?;
        first_resource("artist", id, response.data)
    }

    /// Fetches multiple artists by catalog ID.
    #[instrument(skip(self))]
    pub async fn artists(&self, ids: &[&str]) -> AppleMusicResult<Vec<Artist>> {
        require_ids(ids)?;
        let path = build_path(
            &format!("catalog/{}/artists", self.storefront),
            &[("ids", comma_separated(ids))],
        );
        let response: ArtistsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches a playlist by catalog ID.
    #[instrument(skip(self))]
    pub async fn playlist(&self, id: &str) -> AppleMusicResult<Playlist> {
        let path = format!("catalog/{}/playlists/{}", self.storefront, id);
        let response: PlaylistsResponse = self.client.get(&path).await?;
        first_resource("playlist", id, response.data)
    }

    /// Fetches multiple playlists by catalog ID.
    #[instrument(skip(self))]
    pub async fn playlists(&self, ids: &[&str]) -> AppleMusicResult<Vec<Playlist>> {
        require_ids(ids)?;
        let path = build_path(
            &format!("catalog/{}/playlists", self.storefront),
            &[("ids", comma_separated(ids))],
        );
        let response: PlaylistsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches a song and returns its preview clip URL.
    #[instrument(skip(self))]
    pub async fn song_preview_url(&self, id: &str) -> AppleMusicResult<String> {
        let song = self.song(id).await?;
        match song.preview_url() {
            Some(url) => Ok(url.to_string()),
            None => Err(AppleMusicError::NotFound {
                resource: "song preview".to_string(),
                id: id.to_string(),
            }),
        }
    }
}
