use crate::commands::{CmdMessage, CmdResult};
use crate::config::FolioConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(site_root: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = FolioConfig::load(site_root)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = FolioConfig::load(site_root)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Ok(val) => result.add_message(CmdMessage::info(val)),
                Err(e) => result.add_message(CmdMessage::error(e.to_string())),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = FolioConfig::load(site_root)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(site_root)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn set_persists_and_reports() {
        let temp = TempDir::new().unwrap();
        let result = run(
            temp.path(),
            ConfigAction::Set("excerpt-length".into(), "90".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[0].content, "excerpt-length set to 90");
        assert_eq!(FolioConfig::load(temp.path()).unwrap().excerpt_length, 90);
    }

    #[test]
    fn invalid_set_does_not_write() {
        let temp = TempDir::new().unwrap();
        let result = run(
            temp.path(),
            ConfigAction::Set("excerpt-length".into(), "0".into()),
        )
        .unwrap();

        assert!(result.has_errors());
        assert!(!temp.path().join("folio.json").exists());
    }

    #[test]
    fn show_key_and_unknown_key() {
        let temp = TempDir::new().unwrap();
        let shown = run(temp.path(), ConfigAction::ShowKey("manifest".into())).unwrap();
        assert_eq!(shown.messages[0].content, "blog/posts.json");

        let unknown = run(temp.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert!(unknown.has_errors());
    }

    #[test]
    fn show_all_returns_config() {
        let temp = TempDir::new().unwrap();
        let result = run(temp.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(FolioConfig::default()));
    }
}
