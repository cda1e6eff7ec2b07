use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quire::app::AppContext;
use quire::cli::{commands, Cli, Commands};
use quire::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr so the prompt on stdout stays readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);

    let ctx = AppContext::new(config)?;

    match cli.command() {
        Commands::Browse => {
            quire::repl::run(Arc::new(ctx)).await?;
        }
        Commands::Feed { url } => {
            commands::show_feed(&ctx, url.as_deref()).await?;
        }
        Commands::Search { query } => {
            commands::search(&ctx, &query).await?;
        }
        Commands::Admin => {
            commands::show_admin(&ctx).await?;
        }
    }

    Ok(())
}
