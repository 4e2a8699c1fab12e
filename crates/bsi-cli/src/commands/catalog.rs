//! `catalog` command: one-shot listing and the interactive search loop.

use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use bsi_sheets::ImageOutcome;

use super::{emit, App, LoadError};
use crate::debounce::debounce;
use crate::session::CatalogSession;
use crate::view::{apply_card_images, card_image_requests, messages};

#[derive(Debug, Clone, Default)]
pub struct CatalogArgs {
    pub search: Option<String>,
    pub category: Option<String>,
    pub resolve_images: bool,
}

/// A line typed in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CatalogInput {
    Term(String),
    Category(String),
    Quit,
}

impl CatalogInput {
    /// `:categoria <name>` (or `:c <name>`) switches category, `:salir` (or
    /// `:q`) ends the loop, anything else is a search term.
    pub(crate) fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if matches!(trimmed, ":salir" | ":q") {
            return CatalogInput::Quit;
        }
        for prefix in [":categoria", ":categoría", ":c"] {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    return CatalogInput::Category(rest.trim().to_owned());
                }
            }
        }
        CatalogInput::Term(line.to_owned())
    }
}

impl App {
    /// Opens a catalog session, or renders the catalog error message.
    async fn open_catalog(
        &self,
        args: &CatalogArgs,
        out: &mut (dyn Write + Send),
    ) -> anyhow::Result<Option<(CatalogSession, Vec<ImageOutcome>)>> {
        let products = match self.load_products().await {
            Ok(products) => products,
            Err(LoadError::Interrupted) => {
                tracing::info!("catalog load interrupted");
                return Ok(None);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load catalog");
                self.emit_message(out, messages::CATALOG_ERROR)?;
                return Ok(None);
            }
        };

        let mut session = CatalogSession::new(products, self.config.low_stock_threshold);
        if let Some(category) = &args.category {
            session.set_category(category);
        }
        if let Some(term) = &args.search {
            session.set_term(term);
        }

        // Images are resolved once for the whole snapshot so later filter
        // changes never refetch.
        let outcomes = if args.resolve_images {
            self.resolve_images(card_image_requests(&session.all_cards()))
                .await
        } else {
            Vec::new()
        };
        Ok(Some((session, outcomes)))
    }

    fn render_catalog(
        &self,
        session: &CatalogSession,
        outcomes: &[ImageOutcome],
        out: &mut (dyn Write + Send),
    ) -> anyhow::Result<()> {
        let mut view = session.view();
        apply_card_images(&mut view.cards, outcomes);
        let rendered = self.renderer.catalog(&view)?;
        emit(out, &rendered)
    }

    /// Renders the catalog once with the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the output fails.
    pub async fn run_catalog(
        &self,
        args: &CatalogArgs,
        out: &mut (dyn Write + Send),
    ) -> anyhow::Result<()> {
        let Some((session, outcomes)) = self.open_catalog(args, out).await? else {
            return Ok(());
        };
        self.render_catalog(&session, &outcomes, out)
    }

    /// Renders the catalog, then re-renders for every debounced search term
    /// or category change read from `input` until it closes, `:salir` is
    /// typed, or the process is interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if reading `input` or writing the output fails.
    pub async fn run_catalog_interactive<R>(
        &self,
        args: &CatalogArgs,
        input: R,
        out: &mut (dyn Write + Send),
    ) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let Some((mut session, outcomes)) = self.open_catalog(args, out).await? else {
            return Ok(());
        };
        self.render_catalog(&session, &outcomes, out)?;

        let (term_tx, term_rx) = mpsc::channel::<String>(32);
        let mut term_tx = Some(term_tx);
        let mut terms = debounce(
            term_rx,
            Duration::from_millis(self.config.search_debounce_ms),
        );
        let mut lines = input.lines();
        let mut cancel = self.cancel.clone();

        loop {
            tokio::select! {
                line = lines.next_line(), if term_tx.is_some() => match line? {
                    Some(line) => match CatalogInput::parse(&line) {
                        CatalogInput::Quit => break,
                        CatalogInput::Category(category) => {
                            session.set_category(&category);
                            self.render_catalog(&session, &outcomes, out)?;
                        }
                        CatalogInput::Term(term) => {
                            if let Some(tx) = &term_tx {
                                // The debouncer only stops once we drop the sender.
                                let _ = tx.send(term).await;
                            }
                        }
                    },
                    None => term_tx = None,
                },
                term = terms.recv() => match term {
                    Some(term) => {
                        tracing::debug!(term = %term, "applying search term");
                        session.set_term(&term);
                        self.render_catalog(&session, &outcomes, out)?;
                    }
                    None => break,
                },
                () = cancel.cancelled() => {
                    tracing::info!("interactive catalog interrupted");
                    break;
                }
            }
        }
        Ok(())
    }
}
