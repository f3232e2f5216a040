use crate::api::FolioApi;
use crate::config::{FolioConfig, CONFIG_FILENAME};
use crate::error::Result;
use crate::store::fs::FileSource;
use directories::BaseDirs;
use std::path::{Path, PathBuf};

pub struct FolioContext {
    pub api: FolioApi<FileSource>,
    pub site_root: PathBuf,
}

fn is_site_root(dir: &Path) -> bool {
    dir.join(CONFIG_FILENAME).is_file() || dir.join("blog").join("posts.json").is_file()
}

/// Find the site root by walking up from cwd looking for a `folio.json` or a
/// `blog/posts.json`. Stops at the home directory or the filesystem root.
pub fn find_site_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if is_site_root(&current) {
            return Some(current);
        }

        if let Some(ref home) = home_dir {
            if &current == home {
                return None;
            }
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

/// Build the API for a site. An explicit root wins; otherwise the nearest
/// site root above `cwd`, falling back to `cwd` itself.
pub fn initialize(cwd: &Path, explicit_root: Option<&Path>) -> Result<FolioContext> {
    let site_root = match explicit_root {
        Some(root) if root.is_absolute() => root.to_path_buf(),
        Some(root) => cwd.join(root),
        None => find_site_root(cwd).unwrap_or_else(|| cwd.to_path_buf()),
    };

    let config = FolioConfig::load(&site_root)?;
    let api = FolioApi::new(FileSource::new(&site_root), site_root.clone(), config);

    Ok(FolioContext { api, site_root })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_site_root_with_config() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join(CONFIG_FILENAME), "{}").unwrap();

        assert_eq!(find_site_root(root), Some(root.to_path_buf()));
    }

    #[test]
    fn test_find_site_root_with_manifest_from_nested_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let nested = root.join("blog").join("posts").join("journal");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("blog/posts.json"), "{\"posts\": []}").unwrap();

        assert_eq!(find_site_root(&nested), Some(root.to_path_buf()));
    }

    #[test]
    fn test_find_site_root_nearest_wins() {
        let temp = TempDir::new().unwrap();
        let outer = temp.path();
        let inner = outer.join("sub-site");
        fs::create_dir_all(&inner).unwrap();
        fs::write(outer.join(CONFIG_FILENAME), "{}").unwrap();
        fs::write(inner.join(CONFIG_FILENAME), "{}").unwrap();

        assert_eq!(find_site_root(&inner), Some(inner.clone()));
    }

    #[test]
    fn test_find_site_root_none() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("some").join("deep").join("path");
        fs::create_dir_all(&dir).unwrap();

        assert_eq!(find_site_root(&dir), None);
    }

    #[test]
    fn test_initialize_prefers_explicit_root() {
        let temp = TempDir::new().unwrap();
        let site = temp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        fs::write(
            site.join(CONFIG_FILENAME),
            r#"{"manifest": "data/index.json"}"#,
        )
        .unwrap();

        let ctx = initialize(temp.path(), Some(Path::new("site"))).unwrap();
        assert_eq!(ctx.site_root, site);
        assert_eq!(ctx.api.config().manifest, "data/index.json");
    }

    #[test]
    fn test_initialize_falls_back_to_cwd() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(temp.path(), None).unwrap();
        assert_eq!(ctx.site_root, temp.path());
        assert_eq!(ctx.api.config(), &FolioConfig::default());
    }
}
