//! Radio station resources.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::common::{Artwork, DataResponse, EditorialNotes, PlayParameters, Relationship, Resource};

/// A radio station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(default)]
    pub attributes: StationAttributes,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub relationships: HashMap<String, Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StationAttributes {
    pub artwork: Artwork,
    pub editorial_notes: EditorialNotes,
    pub is_live: bool,
    pub name: String,
    pub play_params: PlayParameters,
    pub url: String,
}

/// Envelope for station endpoints.
pub type StationsResponse = DataResponse<Station>;
