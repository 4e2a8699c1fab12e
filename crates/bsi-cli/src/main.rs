mod commands;
mod debounce;
mod render;
mod session;
mod view;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::commands::{App, CatalogArgs, DetailArgs};
use crate::render::{JsonRenderer, Renderer, TextRenderer};

#[derive(Debug, Parser)]
#[command(name = "bsi")]
#[command(about = "Bike Stunt Importados product catalog")]
struct Cli {
    /// Output format for rendered views
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, optionally filtered by search term and category
    Catalog {
        /// Case-insensitive match against product name or brand
        #[arg(long)]
        search: Option<String>,

        /// Category name; "todos" shows every category
        #[arg(long)]
        category: Option<String>,

        /// Keep reading search terms from stdin and re-render after each one
        #[arg(long)]
        interactive: bool,

        /// Fetch product images through the sheet's image proxy
        #[arg(long)]
        resolve_images: bool,
    },
    /// Show one product with related items and a WhatsApp purchase link
    Detail {
        /// Product id as it appears in the catalog link
        #[arg(long)]
        id: Option<String>,

        /// Preferred colour for the purchase message
        #[arg(long)]
        color: Option<String>,

        /// Units to request; clamped to available stock
        #[arg(long)]
        quantity: Option<u32>,

        #[arg(long)]
        resolve_images: bool,
    },
    /// Show products flagged for the featured section
    Featured {
        #[arg(long)]
        resolve_images: bool,
    },
    /// Resolve a single Drive image locator
    Image {
        locator: String,

        /// Write the decoded image bytes to this path
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bsi_core::load_app_config()?;

    // Logs go to stderr so rendered views on stdout stay clean.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.env.colored_logs())
        .init();

    let (trigger, cancel) = bsi_sheets::cancel_pair();
    tokio::spawn(async move {
        shutdown_signal().await;
        trigger.cancel();
    });

    let renderer: Box<dyn Renderer> = match cli.format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    };
    let app = App::new(config, renderer, cancel)?;
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Catalog {
            search,
            category,
            interactive,
            resolve_images,
        } => {
            let args = CatalogArgs {
                search,
                category,
                resolve_images,
            };
            if interactive {
                let input = tokio::io::BufReader::new(tokio::io::stdin());
                app.run_catalog_interactive(&args, input, &mut stdout)
                    .await?;
            } else {
                app.run_catalog(&args, &mut stdout).await?;
            }
        }
        Commands::Detail {
            id,
            color,
            quantity,
            resolve_images,
        } => {
            let args = DetailArgs {
                id,
                color,
                quantity,
                resolve_images,
            };
            app.run_detail(&args, &mut stdout).await?;
        }
        Commands::Featured { resolve_images } => {
            app.run_featured(resolve_images, &mut stdout).await?;
        }
        Commands::Image { locator, out } => {
            app.run_image(&locator, out.as_deref(), &mut stdout).await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, cancelling pending work");
}
