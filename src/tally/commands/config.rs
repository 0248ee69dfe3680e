use crate::commands::{CmdMessage, CmdResult, TallyPaths};
use crate::config::TallyConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &TallyPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = TallyConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = TallyConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let previous = TallyConfig::load(dir)?;
            let mut config = previous.clone();
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }

            let display_val = config.get(&key).unwrap_or(value);
            if config == previous {
                let mut result = CmdResult::default().with_config(config);
                result.add_message(CmdMessage::info(format!(
                    "{} is already {}",
                    key, display_val
                )));
                return Ok(result);
            }

            config.save(dir)?;
            let switched_from = (config.collection != previous.collection)
                .then_some(previous.collection);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            if let Some(old) = switched_from {
                result.add_message(CmdMessage::info(format!(
                    "Items in {} are kept; switch back with `tally config collection {}`",
                    old, old
                )));
            }
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::view::SortDirective;
    use tempfile::TempDir;

    fn paths(temp: &TempDir) -> TallyPaths {
        TallyPaths {
            data_dir: temp.path().to_path_buf(),
        }
    }

    #[test]
    fn set_persists_and_reports() {
        let temp = TempDir::new().unwrap();
        let result = run(
            &paths(&temp),
            ConfigAction::Set("default-sort".into(), "NAME-DESC".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[0].content, "default-sort set to name-desc");
        let loaded = TallyConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.default_sort, SortDirective::NameDesc);
    }

    #[test]
    fn invalid_set_is_reported_not_saved() {
        let temp = TempDir::new().unwrap();
        let result = run(
            &paths(&temp),
            ConfigAction::Set("default-sort".into(), "sideways".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!temp.path().join("config.json").exists());
    }

    #[test]
    fn setting_the_current_value_does_not_write() {
        let temp = TempDir::new().unwrap();
        let result = run(
            &paths(&temp),
            ConfigAction::Set("collection".into(), "inventory".into()),
        )
        .unwrap();

        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(result.messages[0].content, "collection is already inventory");
        assert!(!temp.path().join("config.json").exists());
    }

    #[test]
    fn switching_collection_points_back_to_the_old_one() {
        let temp = TempDir::new().unwrap();
        let result = run(
            &paths(&temp),
            ConfigAction::Set("collection".into(), "pantry".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].content, "collection set to pantry");
        assert!(result.messages[1]
            .content
            .contains("tally config collection inventory"));
        assert_eq!(TallyConfig::load(temp.path()).unwrap().collection, "pantry");
    }

    #[test]
    fn reserved_collection_is_reported_not_saved() {
        let temp = TempDir::new().unwrap();
        let result = run(
            &paths(&temp),
            ConfigAction::Set("collection".into(), "config".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!temp.path().join("config.json").exists());
    }

    #[test]
    fn show_key_and_show_all() {
        let temp = TempDir::new().unwrap();
        let result = run(&paths(&temp), ConfigAction::ShowKey("collection".into())).unwrap();
        assert_eq!(result.messages[0].content, "inventory");

        let result = run(&paths(&temp), ConfigAction::ShowKey("nope".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);

        let result = run(&paths(&temp), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(TallyConfig::default()));
    }
}
