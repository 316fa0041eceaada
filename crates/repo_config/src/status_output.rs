// crates/repo_config/src/status_output.rs

use std::fmt::Display;

use resolve_output_paths::OutputPaths;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// The single JSON object the CLI prints to stdout after every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOutput {
    pub status: Status,
    pub message: String,
    pub env_file: String,
    pub json_file: String,
}

impl StatusOutput {
    pub fn success(paths: &OutputPaths) -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
            env_file: paths.env_output_file.display().to_string(),
            json_file: paths.json_output_file.display().to_string(),
        }
    }

    pub fn error(err: &impl Display) -> Self {
        Self {
            status: Status::Error,
            message: err.to_string(),
            env_file: String::new(),
            json_file: String::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
