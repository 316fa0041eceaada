// crates/reconcile_config/src/lib.rs

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use load_config_schema::Schema;
use repo_config_error::{ConfigError, Result};
use stored_values::{StoredValues, ValueStore};

/// Why a run has to drop into the interactive editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveReason {
    /// Not running silently: the user asked for the editor.
    Requested,
    /// The schema gained or lost keys since the last save.
    SchemaChanged,
    /// These keys still have an empty value.
    MissingValues(Vec<String>),
}

impl InteractiveReason {
    /// One-line notice shown before the editor starts, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            InteractiveReason::Requested => None,
            InteractiveReason::SchemaChanged => {
                Some("Configuration changes detected. Proceeding interactively.")
            }
            InteractiveReason::MissingValues(_) => {
                Some("Missing values detected. Proceeding interactively.")
            }
        }
    }
}

/// What a collect run should do after merging stored values into the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Interactive(InteractiveReason),
    SaveSilently,
    UpToDate,
}

/// State of the stored-values file relative to the schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreState {
    /// `None` when no store has been written yet.
    pub store_modified: Option<SystemTime>,
    pub schema_modified: SystemTime,
}

impl StoreState {
    /// Reads the modification times of the schema file and of `store`.
    pub fn read(schema_path: &Path, store: &ValueStore) -> Result<Self> {
        let schema_modified = fs::metadata(schema_path)
            .and_then(|meta| meta.modified())
            .map_err(|e| ConfigError::io("failed to read modification time of JSON file", e))?;
        Ok(Self {
            store_modified: store.modified()?,
            schema_modified,
        })
    }

    pub fn exists(&self) -> bool {
        self.store_modified.is_some()
    }

    /// True when there is no store, or the schema was modified strictly after it.
    pub fn is_stale(&self) -> bool {
        match self.store_modified {
            None => true,
            Some(store) => self.schema_modified > store,
        }
    }
}

/// Replaces each schema item's default with its stored value, when one exists.
pub fn merge_stored_values(schema: &mut Schema, stored: &StoredValues) {
    for (key, value) in stored {
        if let Some(item) = schema.get_mut(key) {
            item.default = value.clone();
        }
    }
}

/// True when a schema key has no stored value or a stored key left the schema.
pub fn has_changes(schema: &Schema, stored: &StoredValues) -> bool {
    schema.keys().any(|key| !stored.contains_key(key))
        || stored.keys().any(|key| !schema.contains_key(key))
}

/// Keys whose current value is the empty string, in key order.
pub fn missing_values(schema: &Schema) -> Vec<String> {
    schema
        .iter()
        .filter(|(_, item)| item.default.is_empty())
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Decides between prompting, saving silently and doing nothing.
///
/// `schema` must already have the stored values merged in. Staleness gates the
/// change check; the missing-value check only runs when the store is current.
pub fn decide(silent: bool, state: &StoreState, schema: &Schema, stored: &StoredValues) -> Decision {
    if !silent {
        return Decision::Interactive(InteractiveReason::Requested);
    }

    if state.is_stale() {
        // Without a store there is nothing to compare the schema against.
        let changed = state.exists() && has_changes(schema, stored);
        log::debug!(
            "schema is newer than the stored values (store exists: {}, changed: {})",
            state.exists(),
            changed
        );
        return if changed {
            Decision::Interactive(InteractiveReason::SchemaChanged)
        } else {
            Decision::SaveSilently
        };
    }

    let missing = missing_values(schema);
    if !missing.is_empty() {
        log::debug!("missing values for {:?}", missing);
        return Decision::Interactive(InteractiveReason::MissingValues(missing));
    }

    // Nothing to ask for, but keys dropped from (or added to) the schema
    // still need to be reflected in the store.
    if has_changes(schema, stored) {
        log::debug!("stored keys differ from the schema; rewriting the store");
        Decision::SaveSilently
    } else {
        Decision::UpToDate
    }
}
