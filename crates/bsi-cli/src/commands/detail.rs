//! `detail` command.

use std::io::Write;

use super::{emit, App, LoadError};
use crate::session::DetailSession;
use crate::view::messages;

#[derive(Debug, Clone, Default)]
pub struct DetailArgs {
    pub id: Option<String>,
    pub color: Option<String>,
    pub quantity: Option<u32>,
    pub resolve_images: bool,
}

impl App {
    /// Renders one product page, or the matching detail message on failure.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the output fails.
    pub async fn run_detail(
        &self,
        args: &DetailArgs,
        out: &mut (dyn Write + Send),
    ) -> anyhow::Result<()> {
        // No id means nothing to look up; skip the fetch entirely.
        let has_id = args.id.as_deref().is_some_and(|id| !id.trim().is_empty());
        if !has_id {
            tracing::warn!("detail requested without a product id");
            return self.emit_message(out, messages::MISSING_ID);
        }

        let products = match self.load_products().await {
            Ok(products) => products,
            Err(LoadError::Interrupted) => {
                tracing::info!("detail load interrupted");
                return Ok(());
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load product detail");
                return self.emit_message(out, messages::DETAIL_ERROR);
            }
        };

        let mut session = match DetailSession::open(
            &products,
            args.id.as_deref(),
            self.config.related_limit,
            self.config.low_stock_threshold,
        ) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "product detail unavailable");
                return self.emit_message(out, e.user_message());
            }
        };

        tracing::debug!(id = %session.product().id, "product detail opened");
        session.select_color(args.color.as_deref());
        if let Some(quantity) = args.quantity {
            let applied = session.set_quantity(quantity);
            if applied != quantity {
                tracing::debug!(requested = quantity, applied, "quantity clamped to stock");
            }
        }
        tracing::debug!(
            color = session.color().unwrap_or("-"),
            quantity = session.quantity(),
            "selection applied"
        );

        let mut view = match session.view(&self.config.whatsapp_number) {
            Ok(view) => view,
            Err(e) => {
                tracing::error!(error = %e, "failed to build contact link");
                return self.emit_message(out, messages::DETAIL_ERROR);
            }
        };

        if args.resolve_images {
            let outcomes = self.resolve_images(view.image_requests()).await;
            view.apply_images(&outcomes);
        }

        let rendered = self.renderer.detail(&view)?;
        emit(out, &rendered)
    }
}
