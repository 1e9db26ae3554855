const BANNER: &str = r#"
             _   _                    _
 _   _ _ __ | |_(_)_ __ ___   ___  __| |
| | | | '_ \| __| | '_ ` _ \ / _ \/ _` |
| |_| | |_) | |_| | | | | | |  __/ (_| |
 \__,_| .__/ \__|_|_| |_| |_|\___|\__,_|
      |_|
  "#;

mod cli;
mod config;
mod delivery;
mod formatter;
mod numbers;
mod pipeline;
mod web;

#[cfg(test)]
mod test_support;

use crate::{config::AppConfig, pipeline::Pipeline};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

fn init_logging(log_level: &str) -> eyre::Result<()> {
    let log_level = match log_level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_ansi(false)
        .with_env_filter(env_filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // initialize colored eyre for better-looking errors
    color_eyre::install()?;

    // print banner
    println!("{}", BANNER.cyan());

    // parse cli args
    let cli = cli::UptimedCli::parse();

    // load default config, then override/merge using the toml file and environment
    let mut config = AppConfig::load(&cli.config)?;

    // initialize tracing/logging
    init_logging(&config.general.log_level)?;

    info!("Starting uptimed!");

    match cli.subcmd {
        cli::SubCommand::Serve(serve) => {
            if let Some(port) = serve.port {
                config.server.port = port;
            }
            web::serve(config).await?;
        }
        cli::SubCommand::Check(check) => {
            let callback = delivery::CallbackClient::from_config(&config.callback);
            let pipeline = Pipeline::from_config(&config.probe, Arc::new(callback))?;

            info!("Checking {} sites...", check.sites.len());
            let report = pipeline.check(&check.sites).await;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if let Some(return_url) = check.return_url {
                pipeline.delivery().deliver(&return_url, &report).await?;
                info!("Report delivered to '{}'", return_url);
            }
        }
    }

    Ok(())
}
