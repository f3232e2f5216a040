use super::ContentSource;
use crate::error::{FolioError, Result};
use std::cell::Cell;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Resource {
    Body(String),
    Status(u16),
}

/// In-memory content for testing and development.
/// Unknown paths answer with a 404 status.
#[derive(Debug, Default)]
pub struct MemorySource {
    resources: HashMap<String, Resource>,
    fetches: Cell<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, path: &str, body: impl Into<String>) -> Self {
        self.insert_body(path, body);
        self
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.resources
            .insert(path.to_string(), Resource::Status(status));
        self
    }

    pub fn insert_body(&mut self, path: &str, body: impl Into<String>) {
        self.resources
            .insert(path.to_string(), Resource::Body(body.into()));
    }

    /// Number of `fetch` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl ContentSource for MemorySource {
    fn fetch(&self, path: &str) -> Result<String> {
        self.fetches.set(self.fetches.get() + 1);
        match self.resources.get(path) {
            Some(Resource::Body(body)) => Ok(body.clone()),
            Some(Resource::Status(status)) => Err(FolioError::Status {
                path: path.to_string(),
                status: *status,
            }),
            None => Err(FolioError::Status {
                path: path.to_string(),
                status: 404,
            }),
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{parse_post_date, Category, Manifest, PostSummary};
    use chrono::Utc;

    /// Builds a [`MemorySource`] holding a manifest and one markdown body per post.
    #[derive(Default)]
    pub struct SiteFixture {
        posts: Vec<PostSummary>,
        bodies: Vec<(String, String)>,
    }

    impl SiteFixture {
        pub const MANIFEST: &'static str = "blog/posts.json";

        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_post(mut self, slug: &str, category: Category, date: &str, body: &str) -> Self {
            let path = format!("blog/posts/{}/{}.md", category, slug);
            self.posts.push(PostSummary {
                slug: slug.to_string(),
                title: format!("Post {}", slug),
                date: parse_post_date(date).expect("fixture dates must be valid"),
                category,
                excerpt: format!("Excerpt for {}", slug),
                path: path.clone(),
            });
            self.bodies.push((path, body.to_string()));
            self
        }

        pub fn manifest(&self) -> Manifest {
            Manifest::new(self.posts.clone(), Utc::now())
        }

        pub fn build(self) -> MemorySource {
            let json = self
                .manifest()
                .to_json()
                .expect("fixture manifest serializes");
            let mut source = MemorySource::new().with_body(Self::MANIFEST, json);
            for (path, body) in self.bodies {
                source.insert_body(&path, body);
            }
            source
        }
    }
}
