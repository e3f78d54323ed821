//! Song resources.

use serde::{Deserialize, Serialize};

use super::common::{Artwork, DataResponse, EditorialNotes, PlayParameters, Preview, Relationship, Resource};

/// A song from the catalog or a user's library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(default)]
    pub attributes: SongAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<SongRelationships>,
}

impl Song {
    /// URL of the first preview clip, when the catalog provides one.
    pub fn preview_url(&self) -> Option<&str> {
        self.attributes
            .previews
            .first()
            .map(|preview| preview.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SongAttributes {
    pub album_name: String,
    pub artist_name: String,
    pub artwork: Artwork,
    pub composer: String,
    pub content_rating: String,
    pub disc_number: u32,
    pub duration_in_millis: u64,
    pub editorial_notes: EditorialNotes,
    pub genre_names: Vec<String>,
    pub has_lyrics: bool,
    pub is_apple_digital_master: bool,
    pub isrc: String,
    pub name: String,
    pub play_params: PlayParameters,
    pub previews: Vec<Preview>,
    pub release_date: String,
    pub track_number: u32,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongRelationships {
    pub albums: Relationship,
    pub artists: Relationship,
    pub genres: Relationship,
    pub station: Relationship,
    pub composers: Relationship,
    pub library: Relationship,
}

/// Envelope for song endpoints.
pub type SongsResponse = DataResponse<Song>;
