//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Content pipeline for mdx blogs: summary index and code block trees
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Tree output directory (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory holding `posts.<slug>.mdx` files (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: quire.toml)
    #[arg(short = 'C', long, global = true, default_value = "quire.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the post summary index, augmenting post heads where needed
    #[command(visible_alias = "i")]
    Index {
        #[command(flatten)]
        args: IndexArgs,
    },

    /// Compile post bodies into trees with interactive code blocks
    #[command(visible_alias = "c")]
    Compile {
        #[command(flatten)]
        args: CompileArgs,
    },
}

/// Index command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct IndexArgs {
    /// Index file to write (overrides `[index] output`)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Report what would change without writing any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Never rewrite post heads, only build the index
    #[arg(long)]
    pub no_rewrite: bool,
}

/// Compile command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CompileArgs {
    /// Post files to compile. If omitted, compiles every post in the content directory.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub paths: Vec<PathBuf>,

    /// Skip syntax highlighting of code blocks
    #[arg(long)]
    pub no_highlight: bool,
}
