//! The user's library. Every endpoint here needs a user token.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::client::AppleMusicClient;
use crate::errors::{AppleMusicError, AppleMusicResult};
use crate::services::{build_path, first_resource, page_params, require_ids};
use crate::types::{
    Album, AlbumsResponse, Artist, ArtistsResponse, PageOptions, Resource, ResourceRef,
    ResourcesResponse, Song, SongsResponse,
};

#[derive(Serialize)]
struct AddResourcesRequest<'a> {
    data: Vec<ResourceRef<'a>>,
}

/// Access to `me/library/...` endpoints.
#[derive(Debug)]
pub struct LibraryService {
    client: Arc<AppleMusicClient>,
}

impl LibraryService {
    pub fn new(client: Arc<AppleMusicClient>) -> Self {
        Self { client }
    }

    /// Lists songs in the user's library.
    #[instrument(skip(self))]
    pub async fn songs(&self, page: PageOptions) -> AppleMusicResult<Vec<Song>> {
        let path = build_path("me/library/songs", &page_params(page));
        let response: SongsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches a library song by ID.
    #[instrument(skip(self))]
    pub async fn song(&self, id: &str) -> AppleMusicResult<Song> {
        let path = format!("me/library/songs/{id}");
        let response: SongsResponse = self.client.get(&path).await?;
        first_resource("song", id, response.data)
    }

    /// Lists albums in the user's library.
    #[instrument(skip(self))]
    pub async fn albums(&self, page: PageOptions) -> AppleMusicResult<Vec<Album>> {
        let path = build_path("me/library/albums", &page_params(page));
        let response: AlbumsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches a library album by ID.
    #[instrument(skip(self))]
    pub async fn album(&self, id: &str) -> AppleMusicResult<Album> {
        let path = format!("me/library/albums/{id}");
        let response: AlbumsResponse = self.client.get(&path).await?;
        first_resource("album", id, response.data)
    }

    /// Lists artists in the user's library.
    #[instrument(skip(self))]
    pub async fn artists(&self, page: PageOptions) -> AppleMusicResult<Vec<Artist>> {
        let path = build_path("me/library/artists", &page_params(page));
        let response: ArtistsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches a library artist by ID.
    #[instrument(skip(self))]
    pub async fn artist(&self, id: &str) -> AppleMusicResult<Artist> {
        let path = format!("me/library/artists/{id}");
        let response: ArtistsResponse = self.client.get(&path).await?;
        first_resource("artist", id, response.data)
    }

    /// Lists resources recently added to the library. The data is mixed
    /// kinds, so only the resource identity is typed.
    #[instrument(skip(self))]
    pub async fn recently_added(&self, page: PageOptions) -> AppleMusicResult<Vec<Resource>> {
        let path = build_path("me/library/recently-added", &page_params(page));
        let response: ResourcesResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Lists the user's heavy-rotation resources.
    #[instrument(skip(self))]
    pub async fn heavy_rotation(&self, page: PageOptions) -> AppleMusicResult<Vec<Resource>> {
        let path = build_path("me/library/heavy-rotation", &page_params(page));
        let response: ResourcesResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Adds catalog resources of one kind to the library.
    ///
    /// The endpoint answers 202 with an empty body; success is the absence
    /// of an error.
    #[instrument(skip(self))]
    pub async fn add(&self, ids: &[&str], resource_type: &str) -> AppleMusicResult<()> {
        require_ids(ids)?;
        if resource_type.is_empty() {
            return Err(AppleMusicError::Configuration {
                message: "resource type is required".to_string(),
            });
        }

        let body = AddResourcesRequest {
            data: ids
                .iter()
                .map(|id| ResourceRef {
                    id,
                    resource_type,
                })
                .collect(),
        };

        self.client.post_empty("me/library", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_request_body_shape() {
        let body = AddResourcesRequest {
            data: vec![
                ResourceRef {
                    id: "900",
                    resource_type: "songs",
                },
                ResourceRef {
                    id: "901",
                    resource_type: "songs",
                },
            ],
        };
        let rendered = serde_json::to_value(&body).unwrap();
        assert_eq!(
            rendered,
            serde_json::json!({
                "data": [
                    {"id": "900", "type": "songs"},
                    {"id": "901", "type": "songs"},
                ]
            })
        );
    }
}
