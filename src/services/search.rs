//! Catalog and library search.

use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use crate::client::AppleMusicClient;
use crate::errors::{AppleMusicError, AppleMusicResult};
use crate::services::{build_path, DEFAULT_STOREFRONT};
use crate::types::{SearchOptions, SearchResults, SearchType};

#[derive(Debug, Default, Deserialize)]
struct SearchHintsResponse {
    #[serde(default)]
    results: SearchHintsResults,
}

#[derive(Debug, Default, Deserialize)]
struct SearchHintsResults {
    #[serde(default)]
    terms: Vec<String>,
}

/// Access to the search endpoints.
#[derive(Debug)]
pub struct SearchService {
    client: Arc<AppleMusicClient>,
    storefront: String,
}

impl SearchService {
    pub fn new(client: Arc<AppleMusicClient>) -> Self {
        Self {
            client,
            storefront: DEFAULT_STOREFRONT.to_string(),
        }
    }

    /// Changes the default storefront for catalog searches.
    pub fn set_storefront(&mut self, storefront: impl Into<String>) {
        self.storefront = storefront.into();
    }

    fn search_params(
        term: &str,
        types: &[SearchType],
        options: &SearchOptions,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![("term", term.to_string())];

        if !types.is_empty() {
            let names: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
            params.push(("types", names.join(",")));
        }
        if let Some(limit) = options.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = options.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(language) = &options.language {
            params.push(("l", language.clone()));
        }
        if !options.include.is_empty() {
            params.push(("include", options.include.join(",")));
        }
        if !options.exclude.is_empty() {
            params.push(("exclude", options.exclude.join(",")));
        }
        if !options.extend.is_empty() {
            params.push(("extend", options.extend.join(",")));
        }

        params
    }

    /// Searches the catalog.
    ///
    /// `options.storefront` overrides the service default for this call
    /// only.
    #[instrument(skip(self, options))]
    pub async fn search(
        &self,
        term: &str,
        types: &[SearchType],
        options: &SearchOptions,
    ) -> AppleMusicResult<SearchResults> {
        if term.is_empty() {
            return Err(AppleMusicError::Configuration {
                message: "search term is required".to_string(),
            });
        }

        let storefront = options.storefront.as_deref().unwrap_or(&self.storefront);
        let path = build_path(
            &format!("catalog/{storefront}/search"),
            &Self::search_params(term, types, options),
        );
        self.client.get(&path).await
    }

    /// Fetches completion hints for a partial search term.
    #[instrument(skip(self))]
    pub async fn search_hints(&self, term: &str) -> AppleMusicResult<Vec<String>> {
        if term.is_empty() {
            return Err(AppleMusicError::Configuration {
                message: "search term is required".to_string(),
            });
        }

        let path = build_path(
            &format!("catalog/{}/search/hints", self.storefront),
            &[("term", term.to_string())],
        );
        let response: SearchHintsResponse = self.client.get(&path).await?;
        Ok(response.results.terms)
    }

    /// Searches the user's library. Requires a user token on the client.
    #[instrument(skip(self, options))]
    pub async fn search_library(
        &self,
        term: &str,
        types: &[SearchType],
        options: &SearchOptions,
    ) -> AppleMusicResult<SearchResults> {
        if term.is_empty() {
            return Err(AppleMusicError::Configuration {
                message: "search term is required".to_string(),
            });
        }

        let path = build_path(
            "me/library/search",
            &Self::search_params(term, types, options),
        );
        self.client.get(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_cover_all_options() {
        let options = SearchOptions {
            limit: Some(5),
            offset: Some(10),
            storefront: Some("fi".to_string()),
            language: Some("fi-FI".to_string()),
            include: vec!["artists".to_string()],
            exclude: vec!["stations".to_string()],
            extend: vec!["artistBio".to_string()],
        };
        let params = SearchService::search_params(
            "sibelius",
            &[SearchType::Songs, SearchType::Albums],
            &options,
        );

        assert_eq!(
            params,
            vec![
                ("term", "sibelius".to_string()),
                ("types", "songs,albums".to_string()),
                ("limit", "5".to_string()),
                ("offset", "10".to_string()),
                ("l", "fi-FI".to_string()),
                ("include", "artists".to_string()),
                ("exclude", "stations".to_string()),
                ("extend", "artistBio".to_string()),
            ]
        );
    }

    #[test]
    fn bare_term_produces_single_param() {
        let params = SearchService::search_params("abba", &[], &SearchOptions::default());
        assert_eq!(params, vec![("term", "abba".to_string())]);
    }

    #[test]
    fn hints_response_tolerates_missing_results() {
        let response: SearchHintsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.terms.is_empty());

        let response: SearchHintsResponse =
            serde_json::from_str(r#"{"results": {"terms": ["abba", "abbey road"]}}"#).unwrap();
        assert_eq!(response.results.terms, vec!["abba", "abbey road"]);
    }
}
