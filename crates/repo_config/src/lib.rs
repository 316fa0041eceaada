// crates/repo_config/src/lib.rs

pub mod collect;
pub mod config;
pub mod delete;
pub mod status_output;

pub use collect::{collect_config, collect_config_with, CollectOutcome};
pub use config::{cli, AppConfig, CommandKind};
pub use delete::{delete_config, delete_config_with, DeleteOutcome};
pub use status_output::{Status, StatusOutput};
