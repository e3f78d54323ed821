//! Album resources.

use serde::{Deserialize, Serialize};

use super::common::{Artwork, DataResponse, EditorialNotes, PlayParameters, Relationship, Resource};

/// An album from the catalog or a user's library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(default)]
    pub attributes: AlbumAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<AlbumRelationships>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlbumAttributes {
    pub artist_name: String,
    pub artwork: Artwork,
    pub content_rating: String,
    pub copyright: String,
    pub editorial_notes: EditorialNotes,
    pub genre_names: Vec<String>,
    pub is_complete: bool,
    pub is_compilation: bool,
    pub is_single: bool,
    pub name: String,
    pub play_params: PlayParameters,
    pub record_label: String,
    pub release_date: String,
    pub track_count: u32,
    pub upc: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumRelationships {
    pub artists: Relationship,
    pub genres: Relationship,
    pub tracks: Relationship,
    #[serde(rename = "record-labels")]
    pub record_labels: Relationship,
}

/// Envelope for album endpoints.
pub type AlbumsResponse = DataResponse<Album>;
