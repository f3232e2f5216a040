//! # CLI Layer
//!
//! This module is one client of the folio library, not the application itself.
//! It is the only place that parses arguments, writes to stdout/stderr and
//! turns a failed command into a non-zero exit.
//!
//! - `run()`: dispatch (called by `main.rs`)
//! - `init_context()`: locates the site and builds the API
//! - `handle_*()`: per-command handlers that call the API and print results

use super::render::{
    render_config, render_filter_bar, render_full_post, render_messages, render_post_list,
};
use super::setup::{init_tracing, Cli, Commands};
use clap::Parser;
use folio::api::{CmdResult, ConfigAction, FolioApi, MessageLevel};
use folio::error::{FolioError, Result};
use folio::init::initialize;
use folio::model::Filter;
use folio::store::fs::FileSource;
use std::path::PathBuf;
use tracing::debug;

struct AppContext {
    api: FolioApi<FileSource>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Index) => handle_index(&mut ctx),
        Some(Commands::List { category, html }) => handle_list(&mut ctx, &category, html),
        Some(Commands::View { slug, html }) => handle_view(&mut ctx, &slug, html),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, "all", false),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.root.as_deref())?;
    debug!(site_root = %ctx.site_root.display(), "site located");
    Ok(AppContext { api: ctx.api })
}

fn handle_index(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.rebuild_index()?;
    finish(&result)
}

fn handle_list(ctx: &mut AppContext, category: &str, html: bool) -> Result<()> {
    ctx.api.load();
    let filter: Filter = category.parse().unwrap_or_default();
    if let Filter::Category(c) = &filter {
        if !ctx.api.config().categories.contains(c) {
            debug!(category = %c, "filtering on a category the site does not index");
        }
    }

    let result = ctx.api.set_filter(filter);
    if html {
        print!("{}", ctx.api.paint()?);
    } else {
        print!("{}", render_filter_bar(&result.filters));
        if let Some(listing) = &result.listing {
            print!("{}", render_post_list(listing));
        }
    }
    finish(&result)
}

fn handle_view(ctx: &mut AppContext, slug: &str, html: bool) -> Result<()> {
    ctx.api.load();
    let result = ctx.api.open(slug);

    match &result.opened {
        Some(_) if html => print!("{}", ctx.api.paint()?),
        Some(post) => print!("{}", render_full_post(post)),
        None if result.has_errors() => return finish(&result),
        None => return Err(FolioError::PostNotFound(slug.to_string())),
    }
    finish(&result)
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config_action(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    finish(&result)
}

/// Prints messages; error-level messages fail the command instead.
fn finish(result: &CmdResult) -> Result<()> {
    let (errors, rest): (Vec<_>, Vec<_>) = result
        .messages
        .iter()
        .cloned()
        .partition(|m| m.level == MessageLevel::Error);

    print!("{}", render_messages(&rest));

    if errors.is_empty() {
        Ok(())
    } else {
        let joined: Vec<String> = errors.into_iter().map(|m| m.content).collect();
        Err(FolioError::Api(joined.join("; ")))
    }
}
