//! # Storage Layer
//!
//! Everything folio reads (the manifest and each post's markdown) goes through the
//! [`ContentSource`] trait, so the pipeline runs the same against a site directory
//! on disk or an in-memory fixture.
//!
//! ## Implementations
//!
//! - [`fs::FileSource`]: reads site-relative paths under a root directory.
//!   Missing files surface as a 404 status, paths escaping the root as 403.
//! - [`memory::MemorySource`]: canned bodies and statuses for tests.
//!
//! ## PostStore
//!
//! [`PostStore`] holds the snapshot of post summaries taken from the manifest.
//! Loading never fails: any problem reading or parsing the manifest leaves the
//! store empty, and "zero posts" is an ordinary state for every caller.
//!
//! ```text
//! site/
//! ├── folio.json              # optional configuration
//! └── blog/
//!     ├── posts.json          # manifest (written by `folio index`)
//!     └── posts/
//!         ├── journal/*.md
//!         └── notebook/*.md
//! ```

use crate::error::Result;
use crate::model::{Manifest, PostSummary};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

pub mod fs;
pub mod memory;

/// Read-only access to site resources by site-relative path.
pub trait ContentSource {
    /// Fetch the text of the resource at `path`.
    ///
    /// Non-success outcomes are reported as [`crate::error::FolioError::Status`].
    fn fetch(&self, path: &str) -> Result<String>;
}

impl<T: ContentSource + ?Sized> ContentSource for &T {
    fn fetch(&self, path: &str) -> Result<String> {
        (**self).fetch(path)
    }
}

/// In-memory snapshot of the manifest's post summaries.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<PostSummary>,
    last_updated: Option<DateTime<Utc>>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: Manifest) -> Self {
        Self {
            posts: manifest.posts,
            last_updated: manifest.last_updated,
        }
    }

    /// Replace the snapshot with the manifest at `manifest_path`.
    ///
    /// Returns the number of posts loaded. On any failure the store is left
    /// empty and the problem is logged.
    pub fn load<S: ContentSource>(&mut self, source: &S, manifest_path: &str) -> usize {
        let loaded = source
            .fetch(manifest_path)
            .and_then(|body| Manifest::parse(&body));

        match loaded {
            Ok(manifest) => {
                debug!(
                    path = manifest_path,
                    posts = manifest.posts.len(),
                    "manifest loaded"
                );
                *self = Self::from_manifest(manifest);
            }
            Err(e) => {
                warn!(path = manifest_path, error = %e, "manifest unavailable, showing no posts");
                *self = Self::default();
            }
        }
        self.posts.len()
    }

    pub fn all(&self) -> &[PostSummary] {
        &self.posts
    }

    pub fn find(&self, slug: &str) -> Option<&PostSummary> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::memory::fixtures::SiteFixture;
    use super::memory::MemorySource;
    use super::*;
    use crate::model::Category;

    #[test]
    fn loads_posts_in_manifest_order() {
        let source = SiteFixture::new()
            .with_post("a", Category::Journal, "2024-01-01", "# A")
            .with_post("b", Category::Notebook, "2024-06-01", "# B")
            .build();

        let mut store = PostStore::new();
        let count = store.load(&source, SiteFixture::MANIFEST);

        assert_eq!(count, 2);
        let slugs: Vec<_> = store.all().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b"]);
        assert!(store.last_updated().is_some());
        assert_eq!(store.find("b").unwrap().category, Category::Notebook);
        assert!(store.find("zzz").is_none());
    }

    #[test]
    fn missing_manifest_yields_empty_store() {
        let source = MemorySource::new();
        let mut store = PostStore::new();

        assert_eq!(store.load(&source, "blog/posts.json"), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn server_error_yields_empty_store() {
        let source = MemorySource::new().with_status("blog/posts.json", 500);
        let mut store = PostStore::new();

        assert_eq!(store.load(&source, "blog/posts.json"), 0);
        assert!(store.all().is_empty());
    }

    #[test]
    fn malformed_manifest_replaces_previous_snapshot_with_empty() {
        let good = SiteFixture::new()
            .with_post("a", Category::Journal, "2024-01-01", "# A")
            .build();
        let mut store = PostStore::new();
        store.load(&good, SiteFixture::MANIFEST);
        assert_eq!(store.len(), 1);

        let broken = MemorySource::new().with_body(SiteFixture::MANIFEST, "{ not json");
        store.load(&broken, SiteFixture::MANIFEST);
        assert!(store.is_empty());
        assert!(store.last_updated().is_none());
    }
}
