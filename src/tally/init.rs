use crate::api::{TallyApi, TallyPaths};
use crate::config::TallyConfig;
use crate::error::{Result, TallyError};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "TALLY_HOME";

pub struct TallyContext {
    pub api: TallyApi<FileStore>,
    pub config: TallyConfig,
}

/// Picks the data directory: an explicit path, then `$TALLY_HOME`, then the
/// platform data dir.
pub fn resolve_data_dir(explicit: Option<&Path>, env_home: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(home) = env_home.filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "tally", "tally")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TallyError::Config("Could not determine a data directory".into()))
}

pub fn initialize(data_dir: PathBuf) -> Result<TallyContext> {
    let config = TallyConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir.clone()).with_collection(&config.collection);
    let api = TallyApi::new(store, TallyPaths { data_dir });
    Ok(TallyContext { api, config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_wins() {
        let dir = resolve_data_dir(Some(Path::new("/tmp/x")), Some("/tmp/y")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn env_home_beats_platform_dir() {
        let dir = resolve_data_dir(None, Some("/tmp/y")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/y"));
    }

    #[test]
    fn empty_env_home_is_ignored() {
        assert_eq!(
            resolve_data_dir(None, Some("")).ok(),
            resolve_data_dir(None, None).ok()
        );
    }

    #[test]
    fn initialize_uses_configured_collection() {
        let temp = TempDir::new().unwrap();
        let mut config = TallyConfig::default();
        config.set("collection", "pantry").unwrap();
        config.save(temp.path()).unwrap();

        let mut ctx = initialize(temp.path().to_path_buf()).unwrap();
        ctx.api.add_item("rice").unwrap();

        assert_eq!(ctx.config.collection, "pantry");
        assert!(temp.path().join("pantry.json").exists());
        assert_eq!(ctx.api.snapshot().unwrap().len(), 1);
    }
}
