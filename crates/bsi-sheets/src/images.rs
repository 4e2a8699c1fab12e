//! Proxied product image resolution.
//!
//! A product's image locators are Drive share links. Each one is turned into
//! a file id, fetched through the sheet's base64 proxy, and handed back as a
//! `data:` URI. Failures never propagate: the slot keeps its placeholder and
//! the condition is logged.
//!
//! [`ImagePool`] runs many resolutions with a fixed number in flight and
//! stops early when its [`CancelSignal`] fires, so a torn-down view does not
//! leave requests running.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::sync::watch;

use bsi_core::ProductId;

use crate::client::SheetsClient;
use crate::drive::extract_drive_file_id;
use crate::types::ImagePayload;

/// What a view should display in an image slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSource {
    Placeholder,
    DataUri { mime_type: String, data: String },
}

impl ImageSource {
    /// Value for an `<img src>`; placeholders resolve to `placeholder_url`.
    #[must_use]
    pub fn to_src(&self, placeholder_url: &str) -> String {
        match self {
            ImageSource::Placeholder => placeholder_url.to_owned(),
            ImageSource::DataUri { mime_type, data } => format!("data:{mime_type};base64,{data}"),
        }
    }

    /// Decoded image bytes, if this is a resolved image.
    #[must_use]
    pub fn decode(&self) -> Option<Vec<u8>> {
        match self {
            ImageSource::Placeholder => None,
            ImageSource::DataUri { data, .. } => STANDARD.decode(data).ok(),
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder)
    }
}

/// Resolves single image locators through the sheet's proxy action.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    client: SheetsClient,
}

impl ImageResolver {
    #[must_use]
    pub fn new(client: SheetsClient) -> Self {
        Self { client }
    }

    /// Resolves `locator` to a displayable source.
    ///
    /// Locators without a Drive file id short-circuit to the placeholder
    /// without touching the network.
    pub async fn resolve(&self, locator: &str) -> ImageSource {
        let Some(file_id) = extract_drive_file_id(locator) else {
            tracing::debug!(locator, "image locator has no drive file id; using placeholder");
            return ImageSource::Placeholder;
        };

        match self.client.fetch_image(&file_id).await {
            Ok(payload) => accept_payload(&file_id, payload),
            Err(e) => {
                tracing::warn!(file_id = %file_id, error = %e, "image fetch failed; keeping placeholder");
                ImageSource::Placeholder
            }
        }
    }
}

/// Validates a proxy payload: MIME type must be `image/*` and the body must
/// be decodable base64.
fn accept_payload(file_id: &str, payload: ImagePayload) -> ImageSource {
    let mime_type = payload.mime_type.trim().to_ascii_lowercase();
    if !mime_type.starts_with("image/") {
        tracing::warn!(file_id, mime_type = %mime_type, "proxy returned a non-image payload");
        return ImageSource::Placeholder;
    }

    let data: String = payload
        .image_data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if let Err(e) = STANDARD.decode(&data) {
        tracing::warn!(file_id, error = %e, "proxy returned invalid base64");
        return ImageSource::Placeholder;
    }

    ImageSource::DataUri { mime_type, data }
}

/// Fires a [`CancelSignal`]. Dropping the trigger also cancels.
#[derive(Debug)]
pub struct CancelTrigger(watch::Sender<bool>);

impl CancelTrigger {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

/// Cloneable view of a cancellation flag.
#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);

impl CancelSignal {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow() || self.0.has_changed().is_err()
    }

    /// Completes once the trigger fires or is dropped.
    pub async fn cancelled(&mut self) {
        // An Err means the trigger was dropped, which counts as cancellation.
        let _ = self.0.wait_for(|cancelled| *cancelled).await;
    }
}

/// Creates a linked trigger/signal pair.
#[must_use]
pub fn cancel_pair() -> (CancelTrigger, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelTrigger(tx), CancelSignal(rx))
}

/// One image slot to fill: which card, which position, which locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub product_id: ProductId,
    pub slot: usize,
    pub locator: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    Resolved(ImageSource),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOutcome {
    pub request: ImageRequest,
    pub status: ImageStatus,
}

/// Bounded, cancellable batch image resolution.
#[derive(Debug, Clone)]
pub struct ImagePool {
    resolver: ImageResolver,
    concurrency: usize,
}

impl ImagePool {
    /// `concurrency` is clamped to at least 1.
    #[must_use]
    pub fn new(resolver: ImageResolver, concurrency: usize) -> Self {
        Self {
            resolver,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolves every request with at most `concurrency` fetches in flight.
    ///
    /// Outcomes are returned in request order. Requests still pending when
    /// `cancel` fires come back as [`ImageStatus::Cancelled`]; one request's
    /// failure never affects another.
    pub async fn resolve_all(
        &self,
        requests: Vec<ImageRequest>,
        cancel: CancelSignal,
    ) -> Vec<ImageOutcome> {
        let total = requests.len();
        let mut outcomes: Vec<(usize, ImageOutcome)> = stream::iter(requests.into_iter().enumerate())
            .map(|(idx, request)| {
                let resolver = self.resolver.clone();
                let mut cancel = cancel.clone();
                async move {
                    if cancel.is_cancelled() {
                        return (idx, ImageOutcome { request, status: ImageStatus::Cancelled });
                    }
                    let status = tokio::select! {
                        source = resolver.resolve(&request.locator) => ImageStatus::Resolved(source),
                        () = cancel.cancelled() => ImageStatus::Cancelled,
                    };
                    (idx, ImageOutcome { request, status })
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        outcomes.sort_by_key(|(idx, _)| *idx);

        let mut resolved = 0usize;
        let mut placeholders = 0usize;
        let mut cancelled = 0usize;
        for (_, outcome) in &outcomes {
            match &outcome.status {
                ImageStatus::Resolved(ImageSource::DataUri { .. }) => resolved += 1,
                ImageStatus::Resolved(ImageSource::Placeholder) => placeholders += 1,
                ImageStatus::Cancelled => cancelled += 1,
            }
        }
        tracing::info!(total, resolved, placeholders, cancelled, "image pass finished");

        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }
}
