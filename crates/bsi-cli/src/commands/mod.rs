//! Command handlers for the CLI.
//!
//! Each handler is the top-level routine of one view: load failures are
//! logged with full detail and replaced by the view's static message, so
//! the only errors that propagate out are I/O errors writing the output.

mod catalog;
mod detail;
mod featured;
mod image;

use std::io::Write;

use bsi_core::{AppConfig, Product};
use bsi_sheets::{
    CancelSignal, ImageOutcome, ImagePool, ImageRequest, ImageResolver, SheetsClient, SheetsError,
};

use crate::render::Renderer;

pub use catalog::CatalogArgs;
pub use detail::DetailArgs;

/// Why a view could not get its product snapshot.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Sheets(#[from] SheetsError),
    #[error("interrupted before the product list arrived")]
    Interrupted,
}

/// Shared context for every command: config, HTTP client, output backend
/// and the process-wide cancellation signal.
pub struct App {
    config: AppConfig,
    client: SheetsClient,
    renderer: Box<dyn Renderer>,
    cancel: CancelSignal,
}

impl App {
    /// # Errors
    ///
    /// Returns an error if the configured endpoint is not a valid URL or the
    /// HTTP client cannot be built.
    pub fn new(
        config: AppConfig,
        renderer: Box<dyn Renderer>,
        cancel: CancelSignal,
    ) -> anyhow::Result<Self> {
        let client = SheetsClient::new(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_retries(
            config.max_retries,
            config.retry_backoff_base_secs.saturating_mul(1000),
        );
        Ok(Self {
            config,
            client,
            renderer,
            cancel,
        })
    }

    /// Fetches the product list, giving up early on cancellation.
    async fn load_products(&self) -> Result<Vec<Product>, LoadError> {
        let mut cancel = self.cancel.clone();
        tokio::select! {
            result = self.client.fetch_products() => {
                let products = result?;
                tracing::info!(products = products.len(), "product list loaded");
                Ok(products)
            }
            () = cancel.cancelled() => Err(LoadError::Interrupted),
        }
    }

    /// Runs `requests` through the bounded image pool.
    async fn resolve_images(&self, requests: Vec<ImageRequest>) -> Vec<ImageOutcome> {
        if requests.is_empty() {
            return Vec::new();
        }
        let pool = ImagePool::new(
            ImageResolver::new(self.client.clone()),
            self.config.image_concurrency,
        );
        pool.resolve_all(requests, self.cancel.clone()).await
    }

    /// Renders a static message in place of the view.
    fn emit_message(&self, out: &mut (dyn Write + Send), message: &str) -> anyhow::Result<()> {
        let rendered = self.renderer.message(message)?;
        emit(out, &rendered)
    }
}

fn emit(out: &mut (dyn Write + Send), rendered: &str) -> anyhow::Result<()> {
    out.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../commands_test.rs"]
mod tests;
