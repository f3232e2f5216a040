use crate::error::{FolioError, Result};
use crate::model::Category;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "folio.json";
const DEFAULT_POSTS_DIR: &str = "blog/posts";
const DEFAULT_MANIFEST: &str = "blog/posts.json";
const DEFAULT_EXCERPT_LENGTH: usize = 150;

/// Site configuration, stored in `folio.json` at the site root.
/// Every path is relative to the site root and uses `/` separators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolioConfig {
    /// Directory holding one sub-directory of markdown files per category
    #[serde(default = "default_posts_dir")]
    pub posts_dir: String,

    /// Where the manifest is written and read
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Categories scanned by the index builder and offered as filters, in order
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,

    /// Excerpt cut-off, in characters
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
}

fn default_posts_dir() -> String {
    DEFAULT_POSTS_DIR.to_string()
}

fn default_manifest() -> String {
    DEFAULT_MANIFEST.to_string()
}

fn default_categories() -> Vec<Category> {
    vec![Category::Journal, Category::Notebook]
}

fn default_excerpt_length() -> usize {
    DEFAULT_EXCERPT_LENGTH
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            posts_dir: default_posts_dir(),
            manifest: default_manifest(),
            categories: default_categories(),
            excerpt_length: default_excerpt_length(),
        }
    }
}

impl FolioConfig {
    /// Load config from the site root, or return defaults if there is none
    pub fn load<P: AsRef<Path>>(site_root: P) -> Result<Self> {
        let config_path = site_root.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: FolioConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the site root
    pub fn save<P: AsRef<Path>>(&self, site_root: P) -> Result<()> {
        let site_root = site_root.as_ref();
        if !site_root.exists() {
            fs::create_dir_all(site_root)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(site_root.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(FolioError::Config(
                "at least one category is required".to_string(),
            ));
        }
        if self.excerpt_length == 0 {
            return Err(FolioError::Config(
                "excerpt_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["posts-dir", "manifest", "categories", "excerpt-length"]
    }

    /// Current value of a config key, formatted for display
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "posts-dir" => Ok(self.posts_dir.clone()),
            "manifest" => Ok(self.manifest.clone()),
            "categories" => Ok(self
                .categories
                .iter()
                .map(Category::as_str)
                .collect::<Vec<_>>()
                .join(",")),
            "excerpt-length" => Ok(self.excerpt_length.to_string()),
            other => Err(FolioError::Config(format!("Unknown config key: {}", other))),
        }
    }

    /// Set a config key from its display form (categories are comma separated)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "posts-dir" => self.posts_dir = normalize_dir(value),
            "manifest" => self.manifest = normalize_dir(value),
            "categories" => {
                self.categories = value
                    .split(',')
                    .map(|c| c.trim().to_lowercase())
                    .filter(|c| !c.is_empty())
                    .map(Category::from)
                    .collect();
            }
            "excerpt-length" => {
                self.excerpt_length = value.parse().map_err(|_| {
                    FolioError::Config(format!("excerpt-length must be a number, got {}", value))
                })?;
            }
            other => return Err(FolioError::Config(format!("Unknown config key: {}", other))),
        }
        self.validate()
    }
}

fn normalize_dir(value: &str) -> String {
    value
        .replace('\\', "/")
        .trim_start_matches("./")
        .trim_end_matches('/')
        .to_string()
}
