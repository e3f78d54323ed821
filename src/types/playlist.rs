//! Playlist resources.

use serde::{Deserialize, Serialize};

use super::common::{Artwork, DataResponse, EditorialNotes, PlayParameters, Relationship, Resource};

/// A playlist from the catalog or a user's library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(default)]
    pub attributes: PlaylistAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<PlaylistRelationships>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistAttributes {
    pub artwork: Artwork,
    pub curator_name: String,
    /// Editorial description; user playlists only fill `standard`.
    pub description: EditorialNotes,
    pub is_featured: bool,
    pub last_modified_date: String,
    pub name: String,
    pub play_params: PlayParameters,
    pub playlist_type: String,
    pub url: String,
    pub track_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistRelationships {
    pub curator: Relationship,
    pub tracks: Relationship,
    #[serde(rename = "featured-artists")]
    pub featured_artists: Relationship,
}

/// Envelope for playlist endpoints.
pub type PlaylistsResponse = DataResponse<Playlist>;
