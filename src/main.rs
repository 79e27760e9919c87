//! Quire - content pipeline for mdx blogs.

mod cli;
mod config;
mod index;
mod logger;
mod pipeline;
mod post;
mod tree;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Index { args } => cli::index::run(&config, args).map(|_| ()),
        Commands::Compile { args } => cli::compile::run(&config, args).map(|_| ()),
    }
}
