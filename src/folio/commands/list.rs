//! Post listing: filter state plus the pure list view model.
//!
//! [`PostRenderer::render`] computes what the list shows; painting it (HTML in
//! `paint.rs`, terminal in the CLI) is a separate step.

use crate::commands::CmdResult;
use crate::model::{format_long_date, sort_newest_first, Category, Filter, PostSummary};
use chrono::NaiveDate;
use serde::Serialize;

/// One card in the list. `slug` resolves back to the full summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub slug: String,
    pub title: String,
    pub category: Category,
    pub date: NaiveDate,
    pub display_date: String,
    pub excerpt: String,
}

impl From<&PostSummary> for ListEntry {
    fn from(post: &PostSummary) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            category: post.category.clone(),
            date: post.date,
            display_date: format_long_date(post.date),
            excerpt: post.excerpt.clone(),
        }
    }
}

/// Result of a render: either the empty-state indicator or a non-empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty,
    Posts(Vec<ListEntry>),
}

impl ListView {
    pub fn entries(&self) -> &[ListEntry] {
        match self {
            ListView::Empty => &[],
            ListView::Posts(entries) => entries,
        }
    }

    pub fn shows_empty_state(&self) -> bool {
        matches!(self, ListView::Empty)
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.entries().iter().map(|e| e.slug.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    pub key: String,
    pub label: String,
    pub active: bool,
}

/// Owns the current filter and turns the post collection into a [`ListView`].
#[derive(Debug, Clone, Default)]
pub struct PostRenderer {
    filter: Filter,
}

impl PostRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: Filter) -> Self {
        Self { filter }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn render(&self, posts: &[PostSummary]) -> ListView {
        let mut selected: Vec<&PostSummary> =
            posts.iter().filter(|p| self.filter.matches(p)).collect();

        if selected.is_empty() {
            return ListView::Empty;
        }

        sort_newest_first(&mut selected, |p| p.date);
        ListView::Posts(selected.into_iter().map(ListEntry::from).collect())
    }

    /// "All" followed by one button per category. Exactly one is active; a
    /// filter on an undeclared category gets its own trailing button.
    pub fn filter_buttons(&self, categories: &[Category]) -> Vec<FilterButton> {
        let mut buttons = vec![FilterButton {
            key: Filter::All.key().to_string(),
            label: "All".to_string(),
            active: self.filter == Filter::All,
        }];

        for category in categories {
            buttons.push(FilterButton {
                key: category.as_str().to_string(),
                label: category.label(),
                active: matches!(&self.filter, Filter::Category(c) if c == category),
            });
        }

        if let Filter::Category(current) = &self.filter {
            if !categories.contains(current) {
                buttons.push(FilterButton {
                    key: current.as_str().to_string(),
                    label: current.label(),
                    active: true,
                });
            }
        }

        buttons
    }
}

pub fn run(posts: &[PostSummary], renderer: &PostRenderer, categories: &[Category]) -> CmdResult {
    CmdResult::default().with_listing(renderer.render(posts), renderer.filter_buttons(categories))
}
