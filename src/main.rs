use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::KeyResolver;

mod app;
mod cli;
mod config;
mod demo;
mod dialog;
mod message;
mod store;
mod theme;
mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting dialoghost");

    let args = cli::Args::parse();

    let config = config::load(args.config.as_deref())?;
    let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings)));
    let theme = theme::theme_from_name(&config.theme.name);

    let mut app = App::new(resolver, theme);
    if let Some(dialog) = args.dialog {
        app.open_on_start(dialog)?;
    }
    app.run(args.frame_rate, args.tick_rate).await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("dialoghost").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "dialoghost.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    Ok(guard)
}
