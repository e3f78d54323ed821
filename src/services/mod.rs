//! Typed service wrappers over the transport.
//!
//! Each service holds a shared client handle and does nothing beyond path
//! and query assembly. Catalog endpoints authenticate with the developer
//! token alone; `me/` endpoints also require a user token on the client.

mod catalog;
mod library;
mod playlists;
mod radio;
mod recommendations;
mod search;

pub use catalog::CatalogService;
pub use library::LibraryService;
pub use playlists::PlaylistService;
pub use radio::RadioService;
pub use recommendations::RecommendationService;
pub use search::SearchService;

use url::form_urlencoded;

use crate::errors::{AppleMusicError, AppleMusicResult};
use crate::types::{PageOptions, QueryOptions};

/// Storefront used until a caller overrides it.
pub const DEFAULT_STOREFRONT: &str = "us";

pub(crate) fn comma_separated(items: &[&str]) -> String {
    items.join(",")
}

pub(crate) fn require_ids(ids: &[&str]) -> AppleMusicResult<()> {
    if ids.is_empty() {
        return Err(AppleMusicError::Configuration {
            message: "at least one ID is required".to_string(),
        });
    }
    Ok(())
}

/// Appends an encoded query string to `base` when there are parameters.
pub(crate) fn build_path(base: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (name, value) in params {
        query.append_pair(name, value);
    }
    format!("{}?{}", base, query.finish())
}

/// Unwraps the first element of a single-resource `data` array.
pub(crate) fn first_resource<T>(resource: &str, id: &str, mut data: Vec<T>) -> AppleMusicResult<T> {
    if data.is_empty() {
        return Err(AppleMusicError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        });
    }
    Ok(data.swap_remove(0))
}

pub(crate) fn page_params(page: PageOptions) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(limit) = page.limit {
        params.push(("limit", limit.to_string()));
    }
    if let Some(offset) = page.offset {
        params.push(("offset", offset.to_string()));
    }
    params
}

pub(crate) fn query_params(options: &QueryOptions) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(limit) = options.limit {
        params.push(("limit", limit.to_string()));
    }
    if let Some(offset) = options.offset {
        params.push(("offset", offset.to_string()));
    }
    if !options.include.is_empty() {
        params.push(("include", options.include.join(",")));
    }
    if !options.exclude.is_empty() {
        params.push(("exclude", options.exclude.join(",")));
    }
    if let Some(language) = &options.language {
        params.push(("l", language.clone()));
    }
    if let Some(storefront) = &options.storefront {
        params.push(("storefront", storefront.clone()));
    }
    params
}
