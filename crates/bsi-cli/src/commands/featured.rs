//! `featured` command.

use std::io::Write;

use super::{emit, App, LoadError};
use crate::view::{apply_card_images, card_image_requests, messages, FeaturedView};

impl App {
    /// Renders the featured section.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the output fails.
    pub async fn run_featured(
        &self,
        resolve_images: bool,
        out: &mut (dyn Write + Send),
    ) -> anyhow::Result<()> {
        let products = match self.load_products().await {
            Ok(products) => products,
            Err(LoadError::Interrupted) => {
                tracing::info!("featured load interrupted");
                return Ok(());
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load featured products");
                return self.emit_message(out, messages::FEATURED_ERROR);
            }
        };

        let mut view = FeaturedView::build(&products, self.config.low_stock_threshold);
        tracing::debug!(featured = view.cards.len(), "featured products selected");

        if resolve_images {
            let outcomes = self.resolve_images(card_image_requests(&view.cards)).await;
            apply_card_images(&mut view.cards, &outcomes);
        }

        let rendered = self.renderer.featured(&view)?;
        emit(out, &rendered)
    }
}
