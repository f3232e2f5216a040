//! # Manifest Builder
//!
//! Scans `<posts_dir>/<category>/*.md` under the site root and writes the
//! manifest the rest of folio reads.
//!
//! Per file:
//! - **slug**: the file stem.
//! - **title**: the first `# ` heading, minus a leading `<Category> - ` label;
//!   without a heading, the file stem with any `YYYY-MM-DD-` prefix dropped,
//!   dashes turned into spaces and each word capitalised.
//! - **date**: the `YYYY-MM-DD` file name prefix, else the modification date.
//! - **excerpt**: the first line after a heading that is not blank and does not
//!   open with `---` or `**`, cut to the configured length with `...`.
//! - **path**: site-relative, `/` separated.
//!
//! A missing category directory is created and skipped. Files that cannot be
//! read are logged and left out; they never abort the run.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::FolioConfig;
use crate::error::Result;
use crate::markdown;
use crate::model::{parse_post_date, sort_newest_first, Category, Manifest, PostSummary};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const NO_EXCERPT: &str = "No description available.";

static DATE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").unwrap());

/// What an index run did, for reporting.
#[derive(Debug, Clone, Default)]
pub struct IndexReport {
    pub manifest_path: PathBuf,
    pub posts: Vec<PostSummary>,
    pub per_category: Vec<(Category, usize)>,
    pub created_dirs: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, String)>,
}

impl IndexReport {
    pub fn total(&self) -> usize {
        self.posts.len()
    }
}

/// Scan the content tree. Posts come back newest first.
pub fn scan_posts(site_root: &Path, config: &FolioConfig) -> Result<IndexReport> {
    let posts_dir = site_root.join(&config.posts_dir);
    let mut report = IndexReport::default();

    for category in &config.categories {
        let category_dir = posts_dir.join(category.as_str());

        if !category_dir.exists() {
            info!(dir = %category_dir.display(), "creating category directory");
            fs::create_dir_all(&category_dir)?;
            report.created_dirs.push(category_dir);
            report.per_category.push((category.clone(), 0));
            continue;
        }

        let mut count = 0;
        for file in markdown_files(&category_dir)? {
            match extract_metadata(&file, category, config) {
                Ok(post) => {
                    if report.posts.iter().any(|p| p.slug == post.slug) {
                        warn!(slug = %post.slug, file = %file.display(), "duplicate slug, skipping");
                        report
                            .skipped
                            .push((file, format!("duplicate slug {}", post.slug)));
                        continue;
                    }
                    info!(title = %post.title, "indexed");
                    report.posts.push(post);
                    count += 1;
                }
                Err(e) => {
                    error!(file = %file.display(), error = %e, "error processing post");
                    report.skipped.push((file, e.to_string()));
                }
            }
        }
        report.per_category.push((category.clone(), count));
    }

    sort_newest_first(&mut report.posts, |p| p.date);
    Ok(report)
}

/// `*.md` files directly inside `dir`, in file name order.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_markdown = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".md"));
        if is_markdown && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Build the summary for one markdown file.
pub fn extract_metadata(
    file: &Path,
    category: &Category,
    config: &FolioConfig,
) -> Result<PostSummary> {
    let content = fs::read_to_string(file)?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let slug = file_name
        .strip_suffix(".md")
        .unwrap_or(&file_name)
        .to_string();

    let title = match markdown::first_heading(&content) {
        Some(heading) => strip_category_label(&heading, &config.categories),
        None => title_from_slug(&slug),
    };

    let date = match date_from_file_name(&file_name) {
        Some(date) => date,
        None => modified_date(file)?,
    };

    Ok(PostSummary {
        title,
        date,
        category: category.clone(),
        excerpt: extract_excerpt(&content, config.excerpt_length),
        path: format!("{}/{}/{}", config.posts_dir, category.as_str(), file_name),
        slug,
    })
}

/// "2024-01-05-first-steps" becomes "First Steps".
pub fn title_from_slug(slug: &str) -> String {
    let stem = DATE_PREFIX
        .find(slug)
        .and_then(|m| slug[m.end()..].strip_prefix('-'))
        .unwrap_or(slug);

    let mut title = String::with_capacity(stem.len());
    let mut prev_is_word = false;
    for c in stem.chars() {
        let c = if c == '-' { ' ' } else { c };
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        prev_is_word = is_word;
    }
    title
}

/// Drops a leading "<Category> -" label from a heading, ignoring case.
pub fn strip_category_label(heading: &str, categories: &[Category]) -> String {
    for category in categories {
        let name = category.as_str();
        let Some(prefix) = heading.get(..name.len()) else {
            continue;
        };
        if !prefix.eq_ignore_ascii_case(name) {
            continue;
        }
        if let Some(rest) = heading[name.len()..].trim_start().strip_prefix('-') {
            return rest.trim().to_string();
        }
    }
    heading.trim().to_string()
}

pub fn date_from_file_name(file_name: &str) -> Option<NaiveDate> {
    DATE_PREFIX
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_post_date(m.as_str()))
}

fn modified_date(file: &Path) -> Result<NaiveDate> {
    let modified = fs::metadata(file)?.modified()?;
    Ok(DateTime::<Utc>::from(modified).date_naive())
}

/// First qualifying line after a heading, trimmed and cut to `max_chars`.
pub fn extract_excerpt(content: &str, max_chars: usize) -> String {
    let mut seen_heading = false;
    for line in content.lines() {
        if line.starts_with('#') {
            seen_heading = true;
            continue;
        }
        if !seen_heading || line.trim().is_empty() {
            continue;
        }
        if line.starts_with("---") || line.starts_with("**") {
            continue;
        }

        let trimmed = line.trim();
        let mut excerpt: String = trimmed.chars().take(max_chars).collect();
        if trimmed.chars().count() >= max_chars {
            excerpt.push_str("...");
        }
        return excerpt;
    }
    NO_EXCERPT.to_string()
}

/// Scan the site and write the manifest.
pub fn run(site_root: &Path, config: &FolioConfig) -> Result<CmdResult> {
    let mut report = scan_posts(site_root, config)?;
    report.manifest_path = site_root.join(&config.manifest);

    let manifest = Manifest::new(report.posts.clone(), Utc::now());
    if let Some(parent) = report.manifest_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&report.manifest_path, manifest.to_json()?)?;
    info!(path = %report.manifest_path.display(), posts = report.total(), "manifest written");

    let mut result = CmdResult::default();
    for dir in &report.created_dirs {
        result.add_message(CmdMessage::info(format!(
            "Created directory: {}",
            dir.display()
        )));
    }
    for post in &report.posts {
        result.add_message(CmdMessage::info(format!("Indexed: {}", post.title)));
    }
    for (file, reason) in &report.skipped {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {}: {}",
            file.display(),
            reason
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Index updated: {} posts",
        report.total()
    )));
    for (category, count) in &report.per_category {
        result.add_message(CmdMessage::info(format!(
            "  {}: {}",
            category.label(),
            count
        )));
    }
    result.add_message(CmdMessage::info(format!(
        "Index saved to: {}",
        report.manifest_path.display()
    )));

    Ok(result.with_index_report(report))
}
