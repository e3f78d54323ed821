//! Data models for the catalog and library APIs.
//!
//! Wire names are camelCase (with a few hyphenated exceptions); each model
//! carries the shared [`Resource`] identity triplet plus its attributes and
//! relationships. Unknown and missing fields are tolerated everywhere so
//! catalog additions never break decoding.

mod album;
mod artist;
mod common;
mod playlist;
mod search;
mod song;
mod station;

pub use album::{Album, AlbumAttributes, AlbumRelationships, AlbumsResponse};
pub use artist::{Artist, ArtistAttributes, ArtistRelationships, ArtistsResponse};
pub use common::{
    Artwork, DataResponse, EditorialNotes, PageOptions, PlayParameters, Preview, QueryOptions,
    Relationship, Resource, ResourceRef, ResourcesResponse,
};
pub use playlist::{Playlist, PlaylistAttributes, PlaylistRelationships, PlaylistsResponse};
pub use search::{SearchOptions, SearchResults, SearchResultsData, SearchType};
pub use song::{Song, SongAttributes, SongRelationships, SongsResponse};
pub use station::{Station, StationAttributes, StationsResponse};
