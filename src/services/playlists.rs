//! Catalog and library playlists, including creation and track edits.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::client::AppleMusicClient;
use crate::errors::{AppleMusicError, AppleMusicResult};
use crate::services::{
    build_path, comma_separated, first_resource, query_params, require_ids, DEFAULT_STOREFRONT,
};
use crate::types::{
    Playlist, PlaylistsResponse, QueryOptions, ResourceRef, Song, SongsResponse,
};

#[derive(Serialize)]
struct CreatePlaylistRequest<'a> {
    attributes: CreatePlaylistAttributes<'a>,
    relationships: CreatePlaylistRelationships<'a>,
}

#[derive(Serialize)]
struct CreatePlaylistAttributes<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct CreatePlaylistRelationships<'a> {
    tracks: TrackList<'a>,
}

#[derive(Serialize)]
struct TrackList<'a> {
    data: Vec<ResourceRef<'a>>,
}

fn song_refs<'a>(ids: &[&'a str]) -> Vec<ResourceRef<'a>> {
    ids.iter()
        .map(|id| ResourceRef {
            id,
            resource_type: "songs",
        })
        .collect()
}

/// Access to catalog playlists and the user's own playlists.
#[derive(Debug)]
pub struct PlaylistService {
    client: Arc<AppleMusicClient>,
    storefront: String,
}

impl PlaylistService {
    pub fn new(client: Arc<AppleMusicClient>) -> Self {
        Self {
            client,
            storefront: DEFAULT_STOREFRONT.to_string(),
        }
    }

    /// Changes the storefront used for catalog lookups.
    pub fn set_storefront(&mut self, storefront: impl Into<String>) {
        self.storefront = storefront.into();
    }

    /// Fetches a catalog playlist by ID.
    #[instrument(skip(self))]
    pub async fn catalog_playlist(&self, id: &str) -> AppleMusicResult<Playlist> {
        let path = format!("catalog/{}/playlists/{}", self.storefront, id);
        let response: PlaylistsResponse = self.client.get(&path).await?;
        first_resource("playlist", id, response.data)
    }

    /// Fetches multiple catalog playlists by ID.
    #[instrument(skip(self))]
    pub async fn catalog_playlists(&self, ids: &[&str]) -> AppleMusicResult<Vec<Playlist>> {
        require_ids(ids)?;
        let path = build_path(
            &format!("catalog/{}/playlists", self.storefront),
            &[("ids", comma_separated(ids))],
        );
        let response: PlaylistsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Lists the tracks of a catalog playlist.
    #[instrument(skip(self))]
    pub async fn catalog_playlist_tracks(&self, id: &str) -> AppleMusicResult<Vec<Song>> {
        let path = format!("catalog/{}/playlists/{}/tracks", self.storefront, id);
        let response: SongsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches a playlist from the user's library by ID.
    #[instrument(skip(self))]
    pub async fn user_playlist(&self, id: &str) -> AppleMusicResult<Playlist> {
        let path = format!("me/library/playlists/{id}");
        let response: PlaylistsResponse = self.client.get(&path).await?;
        first_resource("playlist", id, response.data)
    }

    /// Lists every playlist in the user's library.
    #[instrument(skip(self))]
    pub async fn user_playlists(&self) -> AppleMusicResult<Vec<Playlist>> {
        let response: PlaylistsResponse = self.client.get("me/library/playlists").await?;
        Ok(response.data)
    }

    /// Lists the user's playlists with paging and relationship controls.
    #[instrument(skip(self))]
    pub async fn user_playlists_with_options(
        &self,
        options: &QueryOptions,
    ) -> AppleMusicResult<Vec<Playlist>> {
        let path = build_path("me/library/playlists", &query_params(options));
        let response: PlaylistsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Lists the tracks of one of the user's playlists.
    #[instrument(skip(self))]
    pub async fn user_playlist_tracks(&self, id: &str) -> AppleMusicResult<Vec<Song>> {
        let path = format!("me/library/playlists/{id}/tracks");
        let response: SongsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Creates a playlist in the user's library, optionally seeded with
    /// tracks, and returns the created resource.
    #[instrument(skip(self, track_ids))]
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        track_ids: &[&str],
    ) -> AppleMusicResult<Playlist> {
        if name.is_empty() {
            return Err(AppleMusicError::Configuration {
                message: "playlist name is required".to_string(),
            });
        }

        let body = CreatePlaylistRequest {
            attributes: CreatePlaylistAttributes { name, description },
            relationships: CreatePlaylistRelationships {
                tracks: TrackList {
                    data: song_refs(track_ids),
                },
            },
        };

        let response: PlaylistsResponse = self.client.post("me/library/playlists", &body).await?;
        first_resource("playlist", name, response.data)
    }

    /// Appends tracks to one of the user's playlists.
    #[instrument(skip(self))]
    pub async fn add_tracks(&self, playlist_id: &str, track_ids: &[&str]) -> AppleMusicResult<()> {
        require_ids(track_ids)?;

        let body = TrackList {
            data: song_refs(track_ids),
        };
        let path = format!("me/library/playlists/{playlist_id}/tracks");
        self.client.post_empty(&path, &body).await
    }

    /// Clears the tracks of one of the user's playlists.
    #[instrument(skip(self))]
    pub async fn remove_tracks(&self, playlist_id: &str) -> AppleMusicResult<()> {
        let path = format!("me/library/playlists/{playlist_id}/tracks");
        self.client.delete_empty(&path).await
    }
}
