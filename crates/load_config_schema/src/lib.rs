// crates/load_config_schema/src/lib.rs

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use repo_config_error::{ConfigError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// One declared setting of the checked-in schema file.
///
/// Absent fields (and explicit `null`s) load as empty strings / `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Command that could derive the value; carried but never run here.
    #[serde(
        default,
        rename = "shellscript",
        alias = "shellScript",
        deserialize_with = "null_as_default"
    )]
    pub shell_script: String,
    /// The current value: the schema's default, replaced by the stored value once merged.
    #[serde(default, deserialize_with = "null_as_default")]
    pub default: String,
    #[serde(
        default,
        rename = "tempEnvironmentVariableName",
        deserialize_with = "null_as_default"
    )]
    pub temp_environment_variable_name: String,
    #[serde(default, rename = "requiredAsEnv", deserialize_with = "null_as_default")]
    pub required_as_env: bool,
}

impl ConfigItem {
    pub fn new(description: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            default: default.into(),
            ..Self::default()
        }
    }

    pub fn with_env_name(mut self, name: impl Into<String>) -> Self {
        self.temp_environment_variable_name = name.into();
        self
    }

    /// `NAME=value` when this item is exported to the environment file.
    pub fn env_line(&self) -> Option<String> {
        if self.temp_environment_variable_name.is_empty() {
            None
        } else {
            Some(format!("{}={}", self.temp_environment_variable_name, self.default))
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The declared configuration: item key to [`ConfigItem`], iterated in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    items: BTreeMap<String, ConfigItem>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, item: ConfigItem) -> Option<ConfigItem> {
        self.items.insert(key.into(), item)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigItem> {
        self.items.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigItem> {
        self.items.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigItem)> {
        self.items.iter().map(|(key, item)| (key.as_str(), item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(String, ConfigItem)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, ConfigItem)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Loads the schema file at `path`.
///
/// Fails with `NotFound` when the file is absent and `Parse` when the content is
/// not a JSON object whose members are objects.
pub fn load_schema(path: &Path) -> Result<Schema> {
    if !path.exists() {
        return Err(ConfigError::not_found(path));
    }
    let file = File::open(path).map_err(|e| ConfigError::io("failed to open JSON file", e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ConfigError::parse("JSON file", path, e))
}
