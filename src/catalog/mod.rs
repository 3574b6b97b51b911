pub use autocomplete::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CatalogSettings;
use crate::util::*;

mod autocomplete;

/// An astronomical object offered while typing its name
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSuggestion {
    pub id: String,
    pub name: String,
}

/// A camera offered while typing its model
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRecord {
    pub value: String,
    pub text: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub also_known_as: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub sensor_width_mm: Option<f64>,
    pub sensor_height_mm: Option<f64>,
    pub number_of_pixels_in_width: Option<u32>,
    pub number_of_pixels_in_height: Option<u32>,
}

/// The server side lookups behind the form
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_objects(&self, query: &str) -> PlannerResult<Vec<ObjectSuggestion>>;
    async fn cameras(&self, query: &str) -> PlannerResult<Vec<CameraRecord>>;
}

pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(settings: &CatalogSettings) -> PlannerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_list<T>(&self, path: &str, param: &str, query: &str) -> PlannerResult<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("GET {} {}={}", url, param, query);
        let list = self
            .client
            .get(url)
            .query(&[(param, query)])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<T>>()
            .await?;
        Ok(list)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search_objects(&self, query: &str) -> PlannerResult<Vec<ObjectSuggestion>> {
        self.get_list("search_objects", "query", query).await
    }

    async fn cameras(&self, query: &str) -> PlannerResult<Vec<CameraRecord>> {
        self.get_list("cameras", "q", query).await
    }
}
