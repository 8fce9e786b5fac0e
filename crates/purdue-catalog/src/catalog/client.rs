//! HTTP client for the Purdue.io OData API.

use super::error::CatalogError;
use super::odata;
use super::types::{Course, ODataCollection, Subject};
use super::CourseSource;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Base URL for the catalog API.
const CATALOG_BASE_URL: &str = "https://api.purdue.io/odata";

/// Resource paths under the base URL.
const SUBJECTS_PATH: &str = "/Subjects";
const COURSES_PATH: &str = "/Courses";

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL for the OData API
    pub base_url: String,
    /// User agent string
    pub user_agent: String,
    /// Connect timeout per request
    pub connect_timeout: Duration,
    /// Total timeout per request
    pub request_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: CATALOG_BASE_URL.to_string(),
            user_agent: format!("purdue-catalog/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Client for the catalog API. Holds one `reqwest::Client` for the lifetime
/// of the run so connections are reused across subjects.
pub struct CatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_config(CatalogConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        // Fail early on a bad base URL instead of per request.
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CatalogError::Network {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    /// Fetches a collection resource and unwraps the OData `value` envelope.
    async fn fetch_collection<T>(
        &self,
        resource: &'static str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, CatalogError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, resource);
        debug!(url = %url, "requesting catalog resource");

        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                status: response.status(),
                resource,
            });
        }

        let body = response.text().await?;
        let collection: ODataCollection<T> =
            serde_json::from_str(&body).map_err(|e| CatalogError::Malformed {
                resource,
                message: e.to_string(),
            })?;

        Ok(collection.value)
    }
}

impl CourseSource for CatalogClient {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>, CatalogError> {
        self.fetch_collection(SUBJECTS_PATH, &[]).await
    }

    async fn fetch_courses(
        &self,
        subject_id: &str,
        term: &str,
    ) -> Result<Vec<Course>, CatalogError> {
        let query = [
            ("$filter", odata::subject_filter(subject_id)),
            ("$expand", odata::classes_expansion(term)),
        ];
        self.fetch_collection(COURSES_PATH, &query).await
    }
}
