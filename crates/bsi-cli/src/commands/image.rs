//! `image` command: resolve one locator through the proxy.

use std::io::Write;
use std::path::Path;

use anyhow::Context as _;

use bsi_sheets::ImageResolver;

use super::{emit, App};
use crate::view::ImageSlot;

impl App {
    /// Resolves `locator` and renders the result. With `save_to`, the
    /// decoded bytes are also written to that path.
    ///
    /// A locator that cannot be resolved renders the placeholder and writes
    /// no file.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the output or the image file fails.
    pub async fn run_image(
        &self,
        locator: &str,
        save_to: Option<&Path>,
        out: &mut (dyn Write + Send),
    ) -> anyhow::Result<()> {
        let resolver = ImageResolver::new(self.client.clone());
        let mut cancel = self.cancel.clone();
        let source = tokio::select! {
            source = resolver.resolve(locator) => source,
            () = cancel.cancelled() => {
                tracing::info!("image resolution interrupted");
                return Ok(());
            }
        };

        if let (Some(path), Some(bytes)) = (save_to, source.decode()) {
            tokio::fs::write(path, &bytes)
                .await
                .with_context(|| format!("failed to write image to {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "image written");
        } else if let Some(path) = save_to {
            tracing::warn!(path = %path.display(), "image unavailable; nothing written");
        }

        let mut slot = ImageSlot::new(Some(locator));
        slot.fill(source);
        let rendered = self.renderer.image(&slot)?;
        emit(out, &rendered)
    }
}
