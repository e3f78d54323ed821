//! Artist resources.

use serde::{Deserialize, Serialize};

use super::common::{Artwork, DataResponse, EditorialNotes, Relationship, Resource};

/// An artist from the catalog or a user's library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(default)]
    pub attributes: ArtistAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<ArtistRelationships>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArtistAttributes {
    pub artwork: Artwork,
    pub editorial_notes: EditorialNotes,
    pub genre_names: Vec<String>,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistRelationships {
    pub albums: Relationship,
    pub genres: Relationship,
    #[serde(rename = "music-videos")]
    pub music_videos: Relationship,
    pub playlists: Relationship,
    pub station: Relationship,
}

/// Envelope for artist endpoints.
pub type ArtistsResponse = DataResponse<Artist>;
