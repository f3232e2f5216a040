//! The post viewer: a two-state machine (Closed, Open) around fetching and
//! rendering one post.
//!
//! Opening is split in two so a slow response can be told apart from a fresh
//! one. [`PostViewer::begin_open`] hands out a [`Ticket`] stamped with a
//! generation number; [`PostViewer::complete_open`] applies a fetched body only
//! when its ticket is still the newest. A close also retires outstanding
//! tickets, so nothing reopens a viewer the reader dismissed.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::markdown;
use crate::model::{format_long_date, Category, PostSummary};
use crate::store::{ContentSource, PostStore};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error};

pub const LOAD_FAILED_NOTICE: &str = "Failed to load post content";

/// A post ready for display: header fields plus the rendered body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenPost {
    pub slug: String,
    pub title: String,
    pub category: Category,
    pub date: NaiveDate,
    pub display_date: String,
    pub markdown: String,
    pub content_html: String,
}

impl OpenPost {
    fn compose(post: &PostSummary, markdown: String) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            category: post.category.clone(),
            date: post.date,
            display_date: format_long_date(post.date),
            content_html: markdown::to_html(&markdown),
            markdown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open(OpenPost),
}

/// Ways a reader can dismiss the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    CloseButton,
    Overlay,
    EscapeKey,
}

/// Proof of an open request, valid until a newer one is issued or the viewer closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    post: PostSummary,
}

impl Ticket {
    pub fn path(&self) -> &str {
        &self.post.path
    }

    pub fn slug(&self) -> &str {
        &self.post.slug
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    UnknownSlug,
    /// The fetch failed; carries the notice to show the reader.
    Failed(String),
    /// A newer request (or a close) superseded this one.
    Stale,
}

#[derive(Debug, Default)]
pub struct PostViewer {
    state: ViewerState,
    generation: u64,
}

impl PostViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open(_))
    }

    /// Page scrolling is locked exactly while a post is open.
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    pub fn current(&self) -> Option<&OpenPost> {
        match &self.state {
            ViewerState::Open(post) => Some(post),
            ViewerState::Closed => None,
        }
    }

    /// Resolve `slug` and issue a ticket for fetching it. `None` for unknown slugs.
    pub fn begin_open(&mut self, slug: &str, store: &PostStore) -> Option<Ticket> {
        let post = store.find(slug)?.clone();
        self.generation += 1;
        Some(Ticket {
            generation: self.generation,
            post,
        })
    }

    /// Apply the result of fetching a ticket's post.
    pub fn complete_open(&mut self, ticket: &Ticket, fetched: Result<String>) -> OpenOutcome {
        if ticket.generation != self.generation {
            debug!(slug = ticket.slug(), "discarding stale post response");
            return OpenOutcome::Stale;
        }

        match fetched {
            Ok(body) => {
                self.state = ViewerState::Open(OpenPost::compose(&ticket.post, body));
                OpenOutcome::Opened
            }
            Err(e) => {
                error!(slug = ticket.slug(), path = ticket.path(), error = %e, "error loading post");
                OpenOutcome::Failed(LOAD_FAILED_NOTICE.to_string())
            }
        }
    }

    /// Resolve, fetch and display in one step.
    pub fn open<S: ContentSource>(
        &mut self,
        slug: &str,
        store: &PostStore,
        source: &S,
    ) -> OpenOutcome {
        let Some(ticket) = self.begin_open(slug, store) else {
            debug!(slug, "open requested for unknown slug");
            return OpenOutcome::UnknownSlug;
        };
        let fetched = source.fetch(ticket.path());
        self.complete_open(&ticket, fetched)
    }

    /// Close the viewer. Returns whether anything changed; closing a closed
    /// viewer is a no-op whatever the trigger.
    pub fn close(&mut self, trigger: CloseTrigger) -> bool {
        if !self.is_open() {
            return false;
        }
        debug!(?trigger, "closing post viewer");
        self.state = ViewerState::Closed;
        self.generation += 1;
        true
    }
}

pub fn run<S: ContentSource>(
    viewer: &mut PostViewer,
    store: &PostStore,
    source: &S,
    slug: &str,
) -> CmdResult {
    let mut result = CmdResult::default();
    match viewer.open(slug, store, source) {
        OpenOutcome::Opened => {
            if let Some(post) = viewer.current() {
                result = result.with_opened(post.clone());
            }
        }
        OpenOutcome::UnknownSlug => {
            result.add_message(CmdMessage::warning(format!("No post with slug {}", slug)));
        }
        OpenOutcome::Failed(notice) => result.add_message(CmdMessage::error(notice)),
        OpenOutcome::Stale => {}
    }
    result
}
