//! # API Facade
//!
//! [`FolioApi`] is the single entry point for folio clients. It owns the
//! pieces of page state (post snapshot, current filter, viewer) and dispatches
//! to the command layer.
//!
//! ## Page Events
//!
//! Interactive clients feed [`PageEvent`]s to [`FolioApi::handle`]:
//!
//! | Event            | Effect                                   |
//! |------------------|------------------------------------------|
//! | `FilterClicked`  | set filter, re-render the list           |
//! | `CardClicked`    | open the post behind the card            |
//! | `CloseClicked`   | close the viewer                         |
//! | `OverlayClicked` | close the viewer                         |
//! | `KeyPressed`     | close the viewer on `Escape`, else none  |
//!
//! Every close path is a no-op while the viewer is already closed.
//!
//! ## Generic Over ContentSource
//!
//! Production clients use `FolioApi<FileSource>`; tests use
//! `FolioApi<MemorySource>` and never touch the filesystem.

use crate::commands::config;
use crate::commands::index;
use crate::commands::list::{self, PostRenderer};
use crate::commands::view::{self, PostViewer};
use crate::config::FolioConfig;
use crate::error::Result;
use crate::model::Filter;
use crate::paint;
use crate::store::{ContentSource, PostStore};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    FilterClicked(Filter),
    CardClicked(String),
    CloseClicked,
    OverlayClicked,
    KeyPressed(String),
}

pub struct FolioApi<S: ContentSource> {
    source: S,
    site_root: PathBuf,
    config: FolioConfig,
    store: PostStore,
    renderer: PostRenderer,
    viewer: PostViewer,
}

impl<S: ContentSource> FolioApi<S> {
    pub fn new(source: S, site_root: PathBuf, config: FolioConfig) -> Self {
        Self {
            source,
            site_root,
            config,
            store: PostStore::new(),
            renderer: PostRenderer::new(),
            viewer: PostViewer::new(),
        }
    }

    /// Load the manifest. Never fails; returns the number of posts.
    pub fn load(&mut self) -> usize {
        self.store.load(&self.source, &self.config.manifest)
    }

    pub fn render(&self) -> CmdResult {
        list::run(self.store.all(), &self.renderer, &self.config.categories)
    }

    pub fn set_filter(&mut self, filter: Filter) -> CmdResult {
        self.renderer.set_filter(filter);
        self.render()
    }

    pub fn open(&mut self, slug: &str) -> CmdResult {
        view::run(&mut self.viewer, &self.store, &self.source, slug)
    }

    pub fn close(&mut self, trigger: CloseTrigger) -> bool {
        self.viewer.close(trigger)
    }

    pub fn handle(&mut self, event: PageEvent) -> CmdResult {
        match event {
            PageEvent::FilterClicked(filter) => self.set_filter(filter),
            PageEvent::CardClicked(slug) => self.open(&slug),
            PageEvent::CloseClicked => self.close_result(CloseTrigger::CloseButton),
            PageEvent::OverlayClicked => self.close_result(CloseTrigger::Overlay),
            PageEvent::KeyPressed(key) if key == "Escape" => {
                self.close_result(CloseTrigger::EscapeKey)
            }
            PageEvent::KeyPressed(_) => CmdResult::default(),
        }
    }

    fn close_result(&mut self, trigger: CloseTrigger) -> CmdResult {
        self.close(trigger);
        CmdResult::default()
    }

    /// Markup for the current page state.
    pub fn paint(&self) -> Result<String> {
        let view = self.renderer.render(self.store.all());
        let buttons = self.renderer.filter_buttons(&self.config.categories);
        paint::page(&view, &buttons, self.viewer.current())
    }

    /// Rebuild the manifest from the content tree, then reload it.
    pub fn rebuild_index(&mut self) -> Result<CmdResult> {
        let result = index::run(&self.site_root, &self.config)?;
        self.load();
        Ok(result)
    }

    pub fn config_action(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = config::run(&self.site_root, action)?;
        if let Some(updated) = &result.config {
            self.config = updated.clone();
        }
        Ok(result)
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn renderer(&self) -> &PostRenderer {
        &self.renderer
    }

    pub fn viewer(&self) -> &PostViewer {
        &self.viewer
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn site_root(&self) -> &Path {
        &self.site_root
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::{FilterButton, ListEntry, ListView};
pub use crate::commands::view::{CloseTrigger, OpenOutcome, OpenPost, LOAD_FAILED_NOTICE};
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::store::memory::fixtures::SiteFixture;
    use crate::store::memory::MemorySource;

    fn api() -> FolioApi<MemorySource> {
        let source = SiteFixture::new()
            .with_post("a", Category::Journal, "2024-01-01", "# A\n\nHello.")
            .with_post("b", Category::Notebook, "2024-06-01", "# B\n\nWorld.")
            .build();
        let mut api = FolioApi::new(source, PathBuf::from("."), FolioConfig::default());
        api.load();
        api
    }

    #[test]
    fn initial_render_is_unfiltered() {
        let api = api();
        let result = api.render();
        assert_eq!(result.listing.unwrap().slugs(), vec!["b", "a"]);
        assert!(result.filters[0].active);
    }

    #[test]
    fn filter_click_rerenders() {
        let mut api = api();
        let result = api.handle(PageEvent::FilterClicked(Filter::Category(
            Category::Journal,
        )));
        assert_eq!(result.listing.unwrap().slugs(), vec!["a"]);
        assert_eq!(api.renderer().filter(), &Filter::Category(Category::Journal));
    }

    #[test]
    fn card_click_opens_and_every_close_path_closes() {
        let mut api = api();
        for close in [
            PageEvent::CloseClicked,
            PageEvent::OverlayClicked,
            PageEvent::KeyPressed("Escape".into()),
        ] {
            let opened = api.handle(PageEvent::CardClicked("a".into()));
            assert_eq!(opened.opened.unwrap().slug, "a");
            assert!(api.viewer().is_open());

            api.handle(close);
            assert!(!api.viewer().is_open());
        }
    }

    #[test]
    fn other_keys_leave_viewer_open() {
        let mut api = api();
        api.handle(PageEvent::CardClicked("b".into()));
        api.handle(PageEvent::KeyPressed("Enter".into()));
        assert!(api.viewer().is_open());
    }

    #[test]
    fn empty_site_renders_empty_state() {
        let mut api = FolioApi::new(MemorySource::new(), PathBuf::from("."), FolioConfig::default());
        assert_eq!(api.load(), 0);
        let result = api.render();
        assert!(result.listing.unwrap().shows_empty_state());

        let html = api.paint().unwrap();
        assert!(html.contains("display: block;"));
    }

    #[test]
    fn failed_open_surfaces_notice() {
        let source = SiteFixture::new()
            .with_post("a", Category::Journal, "2024-01-01", "# A")
            .build()
            .with_status("blog/posts/journal/a.md", 500);
        let mut api = FolioApi::new(source, PathBuf::from("."), FolioConfig::default());
        api.load();

        let result = api.handle(PageEvent::CardClicked("a".into()));
        assert!(result.has_errors());
        assert_eq!(result.messages[0].content, LOAD_FAILED_NOTICE);
        assert!(!api.viewer().is_open());
    }

    #[test]
    fn paint_reflects_open_post() {
        let mut api = api();
        api.open("a");
        let html = api.paint().unwrap();
        assert!(html.contains("post-modal active"));
        assert!(html.contains("<p>Hello.</p>"));
    }
}
