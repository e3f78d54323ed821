//! Search request options and result shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::album::AlbumsResponse;
use super::artist::ArtistsResponse;
use super::common::ResourcesResponse;
use super::playlist::PlaylistsResponse;
use super::song::SongsResponse;
use super::station::StationsResponse;

/// Resource kinds understood by the search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchType {
    Songs,
    Albums,
    Artists,
    Playlists,
    MusicVideos,
    Stations,
    Curators,
    RadioStations,
    AppleCurators,
    RecordLabels,
}

impl SearchType {
    /// Wire name used in the `types` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Songs => "songs",
            SearchType::Albums => "albums",
            SearchType::Artists => "artists",
            SearchType::Playlists => "playlists",
            SearchType::MusicVideos => "music-videos",
            SearchType::Stations => "stations",
            SearchType::Curators => "curators",
            SearchType::RadioStations => "radio-stations",
            SearchType::AppleCurators => "apple-curators",
            SearchType::RecordLabels => "record-labels",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional controls for search requests. Unset fields are left off the
/// query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Overrides the service's storefront for this request.
    pub storefront: Option<String>,
    /// Language tag sent as the `l` parameter.
    pub language: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub extend: Vec<String>,
}

/// Reply from the search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub results: SearchResultsData,
}

/// Per-kind buckets in a search reply. Only the requested kinds are
/// populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs: Option<SongsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub albums: Option<AlbumsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artists: Option<ArtistsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlists: Option<PlaylistsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stations: Option<StationsResponse>,
    #[serde(rename = "music-videos", skip_serializing_if = "Option::is_none")]
    pub music_videos: Option<ResourcesResponse>,
    #[serde(rename = "top", skip_serializing_if = "Option::is_none")]
    pub top_results: Option<ResourcesResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curators: Option<ResourcesResponse>,
    #[serde(rename = "radio-stations", skip_serializing_if = "Option::is_none")]
    pub radio_stations: Option<ResourcesResponse>,
    #[serde(rename = "apple-curators", skip_serializing_if = "Option::is_none")]
    pub apple_curators: Option<ResourcesResponse>,
    #[serde(rename = "record-labels", skip_serializing_if = "Option::is_none")]
    pub record_labels: Option<ResourcesResponse>,
}
