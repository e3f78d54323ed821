//! Shapes shared by every resource kind.

use serde::{Deserialize, Serialize};

/// Identity triplet carried by every catalog and library resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// A link from one resource to related resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Artwork metadata with a templated URL.
///
/// The `url` contains `{w}` and `{h}` placeholders the caller substitutes
/// with the wanted dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Artwork {
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub bg_color: String,
    pub text_color1: String,
    pub text_color2: String,
    pub text_color3: String,
    pub text_color4: String,
}

/// Playback parameters attached to playable resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayParameters {
    pub id: String,
    pub kind: String,
    pub is_library: bool,
    #[serde(rename = "previewURL")]
    pub preview_url: String,
    pub catalog_id: String,
}

/// Long- and short-form editorial copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorialNotes {
    pub standard: String,
    pub short: String,
}

/// A preview clip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preview {
    pub url: String,
    pub playable: bool,
}

/// Standard `data` envelope returned by collection endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// Envelope of bare resources, used where the API returns mixed kinds.
pub type ResourcesResponse = DataResponse<Resource>;

/// Reference to a resource by ID and type, used in write request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRef<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub resource_type: &'a str,
}

/// Paging controls for list endpoints. Unset fields are omitted from the
/// query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageOptions {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
        }
    }
}

/// Query controls shared by the library listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Language tag sent as the `l` parameter.
    pub language: Option<String>,
    pub storefront: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_round_trips_type_field() {
        let resource: Resource =
            serde_json::from_str(r#"{"type":"songs","id":"123","href":"/v1/catalog/us/songs/123"}"#)
                .unwrap();
        assert_eq!(resource.resource_type, "songs");
        assert_eq!(resource.id, "123");

        let rendered = serde_json::to_value(&resource).unwrap();
        assert_eq!(rendered["type"], "songs");
    }

    #[test]
    fn resource_ref_serializes_for_write_bodies() {
        let body = serde_json::to_value(ResourceRef {
            id: "900",
            resource_type: "songs",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"id": "900", "type": "songs"}));
    }

    #[test]
    fn data_response_tolerates_missing_fields() {
        let response: ResourcesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_empty());
        assert!(response.next.is_none());
    }
}
