use crate::error::{Result, TallyError};
use crate::store::fs::DEFAULT_COLLECTION;
use crate::view::SortDirective;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_STEM: &str = "config";
const CONFIG_FILENAME: &str = "config.json";

/// Configuration for tally, stored as config.json in the data directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TallyConfig {
    /// Name of the collection document (`{collection}.json`)
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Sort used when none is given on the command line
    #[serde(default, with = "directive_str")]
    pub default_sort: SortDirective,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            default_sort: SortDirective::None,
        }
    }
}

impl TallyConfig {
    pub const KEYS: [&'static str; 2] = ["collection", "default-sort"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: TallyConfig = serde_json::from_str(&content)?;
        validate_collection(&config.collection)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "collection" => Some(self.collection.clone()),
            "default-sort" => Some(self.default_sort.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "collection" => {
                let value = value.trim();
                validate_collection(value)?;
                self.collection = value.to_string();
            }
            "default-sort" => {
                self.default_sort = value
                    .parse()
                    .map_err(|e: TallyError| TallyError::Config(e.to_string()))?;
            }
            other => {
                return Err(TallyError::Config(format!(
                    "Unknown config key: {} (known keys: {})",
                    other,
                    Self::KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Collections are files next to `config.json`, so the name must stay inside
/// the data directory and must not shadow the config file.
fn validate_collection(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(TallyError::Config(format!(
            "Invalid collection name: {:?}",
            name
        )));
    }
    if name.eq_ignore_ascii_case(CONFIG_STEM) {
        return Err(TallyError::Config(format!(
            "Collection name {:?} is reserved for the config file",
            name
        )));
    }
    Ok(())
}

mod directive_str {
    use crate::view::SortDirective;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &SortDirective, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<SortDirective, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TallyConfig::default();
        assert_eq!(config.collection, "inventory");
        assert_eq!(config.default_sort, SortDirective::None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = TallyConfig::load(temp.path().join("missing")).unwrap();
        assert_eq!(config, TallyConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();

        let mut config = TallyConfig::default();
        config.set("default-sort", "count-desc").unwrap();
        config.set("collection", "pantry").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = TallyConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.default_sort, SortDirective::CountDesc);
        assert_eq!(loaded.collection, "pantry");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"default_sort":"name-desc"}"#).unwrap();

        let loaded = TallyConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.collection, "inventory");
        assert_eq!(loaded.default_sort, SortDirective::NameDesc);
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = TallyConfig::default();
        assert_eq!(config.get("collection").as_deref(), Some("inventory"));
        assert_eq!(config.get("default-sort").as_deref(), Some("none"));
        assert_eq!(config.get("colour"), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = TallyConfig::default();
        assert!(config.set("default-sort", "sideways").is_err());
        assert!(config.set("collection", "../escape").is_err());
        assert!(config.set("collection", "  ").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, TallyConfig::default());
    }

    #[test]
    fn test_collection_cannot_shadow_config_file() {
        let mut config = TallyConfig::default();
        assert!(matches!(
            config.set("collection", "config"),
            Err(TallyError::Config(_))
        ));
        assert!(config.set("collection", "Config").is_err());
        assert_eq!(config.collection, "inventory");
        assert!(config.set("collection", "configs").is_ok());
    }

    #[test]
    fn test_load_rejects_reserved_collection() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"collection":"config"}"#).unwrap();
        assert!(matches!(
            TallyConfig::load(temp.path()),
            Err(TallyError::Config(_))
        ));
    }
}
