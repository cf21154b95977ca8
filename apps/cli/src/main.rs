#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod handlers;
pub mod models;

use crate::handlers::{negotiate, transcode};
use crate::models::args::{Cli, Commands};

use anyhow::{Context, Result};
use clap::Parser;
use mgate::domain::config::GatewayConfig;
use mgate::kernel::config::load_config;
use mgate_logger::{LevelFilter, Logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::builder()
        .name("mgate")
        .level(if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN })
        .init()?;

    let config = match &cli.config {
        Some(path) => load_config::<GatewayConfig>(Some(path))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => GatewayConfig::default(),
    };
    let gateway = mgate::negotiator(&config)?;

    let output = match cli.command {
        Commands::Negotiate { accept, default } => {
            negotiate::negotiate(&gateway, &accept, default.as_deref())?
        },
        Commands::Transcode { content_type, accept, default, input } => {
            let body = transcode::read_input(input.as_deref())?;
            transcode::transcode(&gateway, &content_type, &accept, default.as_deref(), &body)?
        },
    };

    println!("{output}");
    Ok(())
}
