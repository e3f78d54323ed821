//! Radio stations: catalog lookups and the user's recently played.

use std::sync::Arc;

use tracing::instrument;

use crate::client::AppleMusicClient;
use crate::errors::AppleMusicResult;
use crate::services::{build_path, first_resource, page_params, DEFAULT_STOREFRONT};
use crate::types::{PageOptions, Station, StationsResponse};

/// Access to `catalog/<storefront>/stations` and `me/recent/stations`.
#[derive(Debug)]
pub struct RadioService {
    client: Arc<AppleMusicClient>,
    storefront: String,
}

impl RadioService {
    pub fn new(client: Arc<AppleMusicClient>) -> Self {
        Self {
            client,
            storefront: DEFAULT_STOREFRONT.to_string(),
        }
    }

    /// Changes the storefront used for catalog lookups.
    pub fn set_storefront(&mut self, storefront: impl Into<String>) {
        self.storefront = storefront.into();
    }

    /// Lists catalog radio stations.
    #[instrument(skip(self))]
    pub async fn stations(&self, page: PageOptions) -> AppleMusicResult<Vec<Station>> {
        let path = build_path(
            &format!("catalog/{}/stations", self.storefront),
            &page_params(page),
        );
        let response: StationsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches a station by catalog ID.
    #[instrument(skip(self))]
    pub async fn station(&self, id: &str) -> AppleMusicResult<Station> {
        let path = format!("catalog/{}/stations/{}", self.storefront, id);
        let response: StationsResponse = self.client.get(&path).await?;
        first_resource("station", id, response.data)
    }

    /// Lists featured catalog stations.
    #[instrument(skip(self))]
    pub async fn featured_stations(&self, page: PageOptions) -> AppleMusicResult<Vec<Station>> {
        let path = build_path(
            &format!("catalog/{}/stations/featured", self.storefront),
            &page_params(page),
        );
        let response: StationsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Lists the user's recently played stations. Requires a user token.
    #[instrument(skip(self))]
    pub async fn recent_stations(&self, page: PageOptions) -> AppleMusicResult<Vec<Station>> {
        let path = build_path("me/recent/stations", &page_params(page));
        let response: StationsResponse = self.client.get(&path).await?;
        Ok(response.data)
    }
}
