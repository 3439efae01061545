//! Identifier search against the registry API.
//!
//! One endpoint: `POST {base_url}/v1/Entities/Search` with a JSON body
//! `{"QueryText": <inn>, "Type": "Identifiers"}` (wire casing per the
//! live API). The response carries `TotalItems` and an `Items` array of
//! raw company objects; only the first item is consumed.

use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{ConfigError, RegistryConfig};
use crate::entity::{Entity, RawEntity};
use crate::error::RegistryError;

/// Endpoint label used in errors and logs.
const SEARCH_ENDPOINT: &str = "POST /v1/Entities/Search";

/// The registry sits behind a gateway that rejects non-browser agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

const ACCEPT_JSON: &str = "application/json,text/*;q=0.99";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SearchRequest<'a> {
    query_text: &'a str,
    r#type: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct SearchResponse {
    total_items: u64,
    items: Vec<RawEntity>,
}

/// Client for the registry search API.
///
/// Holds a reusable HTTP session configured with the bearer credential.
/// The session is released when the client is dropped, on every exit
/// path, and never shared mutably between concurrent lookups.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: Url,
    max_list_fields: Option<usize>,
    max_concurrency: usize,
}

impl RegistryClient {
    /// Build a client from configuration. No network I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Config`] when the token cannot be carried
    /// in an HTTP header, or [`RegistryError::Http`] when the underlying
    /// HTTP client cannot be constructed.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token.as_str()))
            .map_err(|_| RegistryError::Config(ConfigError::MalformedToken))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| RegistryError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        tracing::debug!(base_url = %config.base_url, "registry HTTP session initialized");

        Ok(Self {
            http,
            base_url: config.base_url,
            max_list_fields: config.max_list_fields,
            max_concurrency: config.max_concurrency.max(1),
        })
    }

    /// Look up a single company by INN.
    ///
    /// `Ok(None)` means the registry had no match for the identifier.
    /// Transport failures, non-2xx statuses, and undecodable payloads
    /// stay distinguishable as errors; none of them is conflated with
    /// "not found".
    pub async fn search_by_inn(&self, inn: &str) -> Result<Option<Entity>, RegistryError> {
        let url = format!(
            "{}/v1/Entities/Search",
            self.base_url.as_str().trim_end_matches('/')
        );
        let request = SearchRequest {
            query_text: inn,
            r#type: "Identifiers",
        };

        tracing::debug!(inn, url = %url, ">>> identifier search");

        let resp = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RegistryError::Http {
                endpoint: SEARCH_ENDPOINT.into(),
                source: e,
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| RegistryError::Http {
            endpoint: SEARCH_ENDPOINT.into(),
            source: e,
        })?;

        tracing::debug!(inn, status = status.as_u16(), payload = %body, "<<< registry response");

        if !status.is_success() {
            return Err(RegistryError::Api {
                endpoint: SEARCH_ENDPOINT.into(),
                status: status.as_u16(),
                body,
            });
        }

        let decoded: SearchResponse =
            serde_json::from_str(&body).map_err(|e| RegistryError::Deserialization {
                endpoint: SEARCH_ENDPOINT.into(),
                source: e,
            })?;

        if decoded.total_items == 0 {
            tracing::debug!(inn, "no match in the registry");
            return Ok(None);
        }
        // First item wins; the registry orders matches by relevance.
        let Some(first) = decoded.items.into_iter().next() else {
            tracing::debug!(inn, "empty item list despite a positive total");
            return Ok(None);
        };

        Entity::from_raw(first, self.max_list_fields).map(Some)
    }

    /// Look up many INNs concurrently.
    ///
    /// Output position `i` corresponds to input position `i` regardless
    /// of completion order, and the result always has the input's length.
    /// Every lookup is an independent unit of work: a failure on one
    /// identifier is logged, becomes `None` in that slot, and never
    /// cancels or affects the others. At most `max_concurrency` requests
    /// are in flight at once.
    pub async fn search_batch(&self, inns: &[String]) -> Vec<Option<Entity>> {
        stream::iter(inns)
            .map(|inn| async move {
                match self.search_by_inn(inn).await {
                    Ok(found) => found,
                    Err(err) => {
                        tracing::warn!(inn = %inn, error = %err, "lookup failed, leaving an empty slot");
                        None
                    }
                }
            })
            .buffered(self.max_concurrency)
            .collect::<Vec<Option<Entity>>>()
            .await
    }
}
