//! HTTP client for the spreadsheet web app that backs the catalog.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use bsi_core::Product;

use crate::error::SheetsError;
use crate::normalize::normalize_products;
use crate::retry::retry_with_backoff;
use crate::types::{ImagePayload, RawProduct};

/// Query action understood by the sheet script for proxied Drive images.
pub const IMAGE_ACTION: &str = "getImageBase64";

/// Client for the spreadsheet endpoint.
///
/// Every call is a single GET against the configured base URL. Non-2xx
/// responses surface as [`SheetsError::UnexpectedStatus`], bodies that are
/// not the promised shape as [`SheetsError::UnexpectedShape`]. Retries are
/// off unless enabled with [`SheetsClient::with_retries`].
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SheetsClient {
    /// Creates a client for `base_url` with the given timeout and `User-Agent`.
    ///
    /// The base URL is used verbatim: Apps Script endpoints end in `/exec`
    /// and must not gain a trailing slash.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::InvalidEndpoint`] if `base_url` does not parse.
    /// - [`SheetsError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SheetsError> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| SheetsError::InvalidEndpoint {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SheetsError::InvalidEndpoint {
                url: base_url.to_string(),
                reason: "scheme must be http or https".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retries for transient failures (see `retry.rs`).
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the product list as raw sheet rows.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Http`] / [`SheetsError::UnexpectedStatus`] on network failure.
    /// - [`SheetsError::Api`] if the script answers with an error object.
    /// - [`SheetsError::UnexpectedShape`] if the body is not a JSON array.
    /// - [`SheetsError::Deserialize`] if the body is not JSON or a row is not an object.
    pub async fn fetch_raw_products(&self) -> Result<Vec<RawProduct>, SheetsError> {
        let url = self.build_url(&[]);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        if !body.is_array() {
            return Err(SheetsError::UnexpectedShape {
                context: "product list".to_owned(),
                expected: "a JSON array of product rows",
            });
        }

        let rows: Vec<RawProduct> =
            serde_json::from_value(body).map_err(|e| SheetsError::Deserialize {
                context: "product list".to_owned(),
                source: e,
            })?;

        tracing::debug!(rows = rows.len(), "fetched product rows");
        Ok(rows)
    }

    /// Fetches and normalizes the full product list, preserving sheet order.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_raw_products`].
    pub async fn fetch_products(&self) -> Result<Vec<Product>, SheetsError> {
        let rows = self.fetch_raw_products().await?;
        Ok(normalize_products(rows))
    }

    /// Fetches a Drive image through the sheet's base64 proxy action.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Http`] / [`SheetsError::UnexpectedStatus`] on network failure.
    /// - [`SheetsError::Api`] if the script reports an error for this file.
    /// - [`SheetsError::UnexpectedShape`] if `imageData`/`mimeType` are missing or blank.
    pub async fn fetch_image(&self, file_id: &str) -> Result<ImagePayload, SheetsError> {
        let url = self.build_url(&[("action", IMAGE_ACTION), ("id", file_id)]);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let context = format!("image {file_id}");
        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };

        match (field("imageData"), field("mimeType")) {
            (Some(image_data), Some(mime_type)) => Ok(ImagePayload {
                image_data,
                mime_type,
            }),
            _ => Err(SheetsError::UnexpectedShape {
                context,
                expected: "an object with imageData and mimeType",
            }),
        }
    }

    /// Appends `params` to the base URL's query string.
    fn build_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<Value, SheetsError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let client = &self.client;
            let url = url.clone();
            async move {
                let response = client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SheetsError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
                    context: url.to_string(),
                    source: e,
                })
            }
        })
        .await
    }

    /// Surfaces `{ "error": "..." }` bodies as [`SheetsError::Api`].
    fn check_api_error(body: &Value) -> Result<(), SheetsError> {
        let Some(error) = body.get("error") else {
            return Ok(());
        };
        let message = match error {
            Value::String(s) => s.clone(),
            Value::Bool(false) | Value::Null => return Ok(()),
            other => body
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| other.to_string(), str::to_owned),
        };
        Err(SheetsError::Api(message))
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
