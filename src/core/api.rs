//! Recipe service HTTP client.
//!
//! [`RecipeApi`] wraps a [`Transport`] with the credential headers, query
//! building, a request deadline, error normalization and JSON decoding.
//! On top of the generic [`RecipeApi::get_json`] sit the two operations the
//! application uses: [`RecipeApi::search`] and [`RecipeApi::random`].

use std::future::Future;

use serde_json::Value;

use crate::config::{API_HOST, API_HOST_HEADER, API_KEY_HEADER, endpoints, messages};
use crate::core::error::ApiError;
use crate::models::{Recipe, SearchQuery, normalize_list};
use crate::utils::{RaceResult, log, race_with_timeout, with_query};

/// Raw HTTP response handed back by a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    /// `None` when the body could not be read.
    pub body: Option<String>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Platform seam for HTTP GETs and the request deadline.
///
/// Dropping the future returned by [`Transport::get`] must cancel the
/// request; dropping the one returned by [`Transport::sleep`] must clear the
/// timer.
pub trait Transport {
    /// Send a GET. Errors are transport failures (DNS, refused, CORS...).
    fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<RawResponse, String>>;

    /// Resolve after `ms` milliseconds.
    fn sleep(&self, ms: u32) -> impl Future<Output = ()>;
}

/// Client for the upstream recipe service.
pub struct RecipeApi<T> {
    transport: T,
    api_key: String,
    base_url: String,
    timeout_ms: u32,
}

impl<T: Transport> RecipeApi<T> {
    /// Create a client whose requests give up after `timeout_ms`
    /// ([`crate::config::FETCH_TIMEOUT_MS`] in the app).
    ///
    /// A blank key is accepted here; requests then fail with
    /// [`ApiError::MissingApiKey`] without touching the network.
    pub fn new(transport: T, api_key: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: format!("https://{}", API_HOST),
            timeout_ms,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `path` and decode the body as JSON.
    ///
    /// Query parameters that are `None` or blank are not sent.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> Result<Value, ApiError> {
        if self.api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }

        let url = with_query(&format!("{}{}", self.base_url, path), query);
        let headers = [
            (API_KEY_HEADER, self.api_key.as_str()),
            (API_HOST_HEADER, API_HOST),
        ];

        let request = self.transport.get(&url, &headers);
        let deadline = self.transport.sleep(self.timeout_ms);

        let response = match race_with_timeout(request, deadline).await {
            RaceResult::TimedOut => {
                log::warn(&format!("GET {} timed out after {} ms", path, self.timeout_ms));
                return Err(ApiError::Timeout);
            }
            RaceResult::Completed(Err(message)) => {
                log::warn(&format!("GET {} failed: {}", path, message));
                let message = if message.trim().is_empty() {
                    messages::NETWORK_FALLBACK.to_string()
                } else {
                    message
                };
                return Err(ApiError::Network(message));
            }
            RaceResult::Completed(Ok(response)) => response,
        };

        if !response.is_success() {
            let message = response
                .body
                .filter(|body| !body.trim().is_empty())
                .or_else(|| Some(response.status_text).filter(|s| !s.trim().is_empty()))
                .unwrap_or_else(|| messages::UPSTREAM_FALLBACK.to_string());
            return Err(ApiError::Upstream {
                status: response.status,
                message,
            });
        }

        let body = response
            .body
            .ok_or_else(|| ApiError::Decode("response body unreadable".to_string()))?;
        serde_json::from_str(&body).map_err(|e| {
            log::warn(&format!("GET {} returned invalid JSON: {}", path, e));
            ApiError::Decode(e.to_string())
        })
    }

    /// Popularity-sorted search with recipe details and instructions included.
    pub async fn search(&self, query: &SearchQuery, limit: u32) -> Result<Vec<Recipe>, ApiError> {
        let data = self
            .get_json(
                endpoints::COMPLEX_SEARCH,
                &[
                    ("query", Some(query.text.clone())),
                    ("includeIngredients", Some(query.ingredient.clone())),
                    ("number", Some(limit.to_string())),
                    ("addRecipeInformation", Some("true".to_string())),
                    ("instructionsRequired", Some("true".to_string())),
                    ("sort", Some("popularity".to_string())),
                ],
            )
            .await?;

        Ok(normalize_list(&data, "results", log_dropped))
    }

    /// Random recipes for the suggestions panel.
    pub async fn random(&self, limit: u32) -> Result<Vec<Recipe>, ApiError> {
        let data = self
            .get_json(endpoints::RANDOM, &[("number", Some(limit.to_string()))])
            .await?;

        Ok(normalize_list(&data, "recipes", log_dropped))
    }
}

fn log_dropped(raw: &Value) {
    let id = raw.get("id").map(Value::to_string).unwrap_or_default();
    log::warn(&format!("dropping upstream recipe without a usable shape (id: {})", id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FETCH_TIMEOUT_MS;
    use crate::core::mock::{MockReply, MockTransport};
    use serde_json::json;

    fn api(transport: MockTransport) -> RecipeApi<MockTransport> {
        RecipeApi::new(transport, "test-key", FETCH_TIMEOUT_MS)
    }

    #[tokio::test]
    async fn test_search_builds_request() {
        let transport = MockTransport::new();
        transport.push(MockReply::json(json!({"results": [{"id": 1, "title": "Stew"}]})));
        let api = api(transport);

        let recipes = api
            .search(&SearchQuery::new("stew", ""), 5)
            .await
            .unwrap();
        assert_eq!(recipes, vec![Recipe::new(1, "Stew")]);

        let requests = api.transport().requests();
        assert_eq!(requests.len(), 1);
        let url = &requests[0].url;
        assert!(url.starts_with(&format!("https://{}/recipes/complexSearch?", API_HOST)));
        assert!(url.contains("query=stew"));
        assert!(url.contains("number=5"));
        assert!(url.contains("addRecipeInformation=true"));
        assert!(url.contains("instructionsRequired=true"));
        assert!(url.contains("sort=popularity"));
        assert!(!url.contains("includeIngredients"));
        assert!(requests[0]
            .headers
            .contains(&(API_KEY_HEADER.to_string(), "test-key".to_string())));
        assert!(requests[0]
            .headers
            .contains(&(API_HOST_HEADER.to_string(), API_HOST.to_string())));
    }

    #[tokio::test]
    async fn test_random_reads_recipes_field() {
        let transport = MockTransport::new();
        transport.push(MockReply::json(json!({"recipes": [{"id": 9, "title": "Soup"}]})));
        let api = api(transport);

        let recipes = api.random(5).await.unwrap();
        assert_eq!(recipes[0].id, 9);
        assert!(api.transport().requests()[0].url.ends_with("/recipes/random?number=5"));
    }

    #[tokio::test]
    async fn test_missing_results_is_empty_not_error() {
        let transport = MockTransport::new();
        transport.push(MockReply::json(json!({"totalResults": 0})));
        let api = api(transport);
        assert!(api.search(&SearchQuery::new("x", ""), 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_cancels_request() {
        let transport = MockTransport::new();
        transport.push(MockReply::Stall);
        let api = RecipeApi::new(transport, "test-key", 50);

        let err = api.random(5).await.unwrap_err();
        assert_eq!(err, ApiError::Timeout);
        assert_eq!(err.to_string(), messages::TIMEOUT);
        assert_eq!(api.transport().cancelled(), 1);
        assert_eq!(api.transport().last_timeout(), Some(50));
    }

    #[tokio::test]
    async fn test_upstream_error_uses_body() {
        let transport = MockTransport::new();
        transport.push(MockReply::status(402, "Payment Required", Some("quota exceeded")));
        let err = api(transport).random(5).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Upstream {
                status: 402,
                message: "quota exceeded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_upstream_error_falls_back_to_status_line() {
        let transport = MockTransport::new();
        transport.push(MockReply::status(503, "Service Unavailable", None));
        transport.push(MockReply::status(500, "", Some("  ")));
        let api = api(transport);

        assert_eq!(
            api.random(5).await.unwrap_err().to_string(),
            "HTTP 503: Service Unavailable"
        );
        assert_eq!(
            api.random(5).await.unwrap_err().to_string(),
            "HTTP 500: Request failed"
        );
    }

    #[tokio::test]
    async fn test_decode_error() {
        let transport = MockTransport::new();
        transport.push(MockReply::status(200, "OK", Some("<html>oops</html>")));
        let err = api(transport).random(5).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_network_error() {
        let transport = MockTransport::new();
        transport.push(MockReply::Fail("connection refused".to_string()));
        transport.push(MockReply::Fail(String::new()));
        let api = api(transport);

        assert_eq!(
            api.random(5).await.unwrap_err(),
            ApiError::Network("connection refused".to_string())
        );
        assert_eq!(
            api.random(5).await.unwrap_err().to_string(),
            messages::NETWORK_FALLBACK
        );
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let api = RecipeApi::new(MockTransport::new(), "  ", FETCH_TIMEOUT_MS);
        assert_eq!(api.random(5).await.unwrap_err(), ApiError::MissingApiKey);
        assert!(api.transport().requests().is_empty());
    }
}
