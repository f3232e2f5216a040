use clap::{Parser, Subcommand};
use folio::error::{FolioError, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive, e.g. `folio=debug`.
pub const LOG_ENV: &str = "FOLIO_LOG";

#[derive(Parser, Debug)]
#[command(name = "folio", bin_name = "folio", version)]
#[command(about = "Journal and notebook engine for a portfolio site", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Site root (defaults to the nearest directory holding folio.json or blog/posts.json)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the post manifest from the content tree
    Index,

    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Category to show, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Print the list section as HTML
        #[arg(long)]
        html: bool,
    },

    /// Open one post
    View {
        slug: String,

        /// Print the page with the post modal open as HTML
        #[arg(long)]
        html: bool,
    },

    /// Show or set configuration
    Config {
        /// Configuration key (posts-dir, manifest, categories, excerpt-length)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

/// Logs go to stderr so stdout stays clean for listings and markup.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| FolioError::Api(format!("Failed to initialize logging: {}", e)))
}
