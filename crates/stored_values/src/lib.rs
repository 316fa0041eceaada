// crates/stored_values/src/lib.rs

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use load_config_schema::Schema;
use repo_config_error::{ConfigError, Result};
use resolve_output_paths::OutputPaths;
use serde::{Deserialize, Serialize};

/// One persisted `{"Name": ..., "Value": ...}` entry of the JSON store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredValue {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Value", default)]
    pub value: String,
}

/// Previously chosen values, keyed by item name.
pub type StoredValues = BTreeMap<String, String>;

/// Anything the interactive editor can persist a schema into.
pub trait SchemaSink {
    fn save(&self, schema: &Schema) -> Result<()>;
}

/// File-backed store: the JSON array of name/value pairs plus the env file.
#[derive(Debug, Clone)]
pub struct ValueStore {
    paths: OutputPaths,
}

impl ValueStore {
    pub fn new(paths: OutputPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    pub fn exists(&self) -> bool {
        self.paths.json_output_file.exists()
    }

    /// Modification time of the JSON store, `None` when it does not exist.
    pub fn modified(&self) -> Result<Option<SystemTime>> {
        match fs::metadata(&self.paths.json_output_file) {
            Ok(meta) => meta
                .modified()
                .map(Some)
                .map_err(|e| ConfigError::io("failed to read modification time of existing values file", e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::io("failed to stat existing values file", e)),
        }
    }

    /// Reads the stored values; a missing store yields an empty mapping.
    pub fn read(&self) -> Result<StoredValues> {
        read_stored_values(&self.paths.json_output_file)
    }
}

impl SchemaSink for ValueStore {
    fn save(&self, schema: &Schema) -> Result<()> {
        write_stored_values(&self.paths, schema)
    }
}

/// Reads the ordered name/value pairs of the JSON store at `path`.
pub fn read_stored_pairs(path: &Path) -> Result<Vec<StoredValue>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(ConfigError::io("failed to open existing values file", e)),
    };
    // Older stores wrote `null` for an empty schema.
    let pairs: Option<Vec<StoredValue>> = serde_json::from_str(&content)
        .map_err(|e| ConfigError::parse("existing values file", path, e))?;
    Ok(pairs.unwrap_or_default())
}

/// Reads the JSON store at `path` into a mapping; a later duplicate `Name` wins.
pub fn read_stored_values(path: &Path) -> Result<StoredValues> {
    let pairs = read_stored_pairs(path)?;
    Ok(pairs.into_iter().map(|pair| (pair.name, pair.value)).collect())
}

/// The JSON store content for `schema`: every item in key order, 4-space indented.
pub fn render_json(schema: &Schema) -> io::Result<String> {
    let pairs: Vec<StoredValue> = schema
        .iter()
        .map(|(key, item)| StoredValue {
            name: key.to_string(),
            value: item.default.clone(),
        })
        .collect();

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    pairs.serialize(&mut serializer).map_err(io::Error::from)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// The env file content for `schema`, or `None` when no item is exported.
pub fn render_env(schema: &Schema) -> Option<String> {
    let lines: Vec<String> = schema.iter().filter_map(|(_, item)| item.env_line()).collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Rewrites the whole JSON store from `schema`, then the env file if any item
/// is exported. A stale env file is left alone when nothing is exported, and a
/// failure writing the env file leaves the already written JSON store in place.
pub fn write_stored_values(paths: &OutputPaths, schema: &Schema) -> Result<()> {
    fs::create_dir_all(&paths.output_dir).map_err(|e| {
        ConfigError::io(
            format!("failed to create directory '{}'", paths.output_dir.display()),
            e,
        )
    })?;

    let json = render_json(schema).map_err(|e| ConfigError::io("failed to write JSON output file", e))?;
    fs::write(&paths.json_output_file, json)
        .map_err(|e| ConfigError::io("failed to create JSON output file", e))?;
    log::info!(
        "saved {} value(s) to {}",
        schema.len(),
        paths.json_output_file.display()
    );

    if let Some(env) = render_env(schema) {
        fs::write(&paths.env_output_file, env)
            .map_err(|e| ConfigError::io("failed to create env output file", e))?;
        log::info!("wrote {}", paths.env_output_file.display());
    }
    Ok(())
}
