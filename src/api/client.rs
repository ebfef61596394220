//! HTTP client for the category backend.

use crate::api::error::ApiError;
use crate::api::models::{coerce_list, Category, CategoryPayload};
use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

/// Error bodies are surfaced in a one-line status bar; anything longer than
/// this is noise, not information.
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

/// Create a custom redirect policy with loop detection and limited hops.
///
/// - Limits redirects to 3 hops maximum
/// - Detects redirect loops (same URL appearing twice in chain)
/// - Logs redirect chain for debugging
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        // Limit to 3 redirects
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        // Detect loops
        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Client for the category REST endpoints.
///
/// Cheap to share: holds a pooled `reqwest::Client` and the parsed base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base_url '{}'", config.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("base_url '{}' cannot carry path segments", config.base_url);
        }

        let http = reqwest::Client::builder()
            .redirect(create_redirect_policy())
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    /// Build `{base}/Categories` or `{base}/Categories/{id}`.
    fn categories_url(&self, id: Option<i64>) -> Url {
        let mut url = self.base_url.clone();
        // Validated as a base in `new`, so path_segments_mut cannot fail
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("Categories");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    /// Fetch the full category collection.
    ///
    /// Transport and HTTP-status failures are errors; a body that is not a
    /// JSON array degrades to an empty collection (logged, never propagated).
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.categories_url(None);
        tracing::debug!(url = %url, "Fetching category collection");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let message = extract_error_message(response).await;
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(ApiError::from_reqwest)?;
        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "Category response is not valid JSON, treating as empty");
                return Ok(Vec::new());
            }
        };

        Ok(coerce_list(value))
    }

    /// Delete one category by id.
    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        let url = self.categories_url(Some(id));
        tracing::debug!(id, url = %url, "Deleting category");

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        check_status(response).await
    }

    /// Create a new category.
    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<(), ApiError> {
        let url = self.categories_url(None);
        tracing::debug!(name = %payload.name, url = %url, "Creating category");

        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        check_status(response).await
    }

    /// Update an existing category (full replacement of the editable fields).
    pub async fn update_category(&self, id: i64, payload: &CategoryPayload) -> Result<(), ApiError> {
        let url = self.categories_url(Some(id));
        tracing::debug!(id, name = %payload.name, url = %url, "Updating category");

        let response = self
            .http
            .put(url)
            .json(payload)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        check_status(response).await
    }

    /// Probe a row image address. Only reachability matters; the body is
    /// drained and discarded so the connection can be reused.
    pub async fn probe_image(&self, address: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .get(address)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: None,
            });
        }

        let _ = response.bytes().await.map_err(ApiError::from_reqwest)?;
        Ok(())
    }
}

/// Map a non-success response to `ApiError::Status` with any server message.
async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = extract_error_message(response).await;
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"message": "..."}` in either casing, or a bare text body.
/// Returns `None` for empty or unreadable bodies.
async fn extract_error_message(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "Message"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return Some(msg.chars().take(MAX_ERROR_MESSAGE_CHARS).collect());
            }
        }
        // JSON without a message field carries nothing worth showing
        return None;
    }

    Some(trimmed.chars().take(MAX_ERROR_MESSAGE_CHARS).collect())
}

// ============================================================================
// Tests
// ============================================================================
