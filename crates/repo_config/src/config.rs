// crates/repo_config/src/config.rs

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use resolve_output_paths::PathResolver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Collect,
    Delete,
}

/// Runtime configuration composed from the command line; passed explicitly
/// into the collect/delete entry points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub command: CommandKind,
    pub json_file: PathBuf,
    pub silent: bool,
    /// Overrides the git-derived project name (falls back to `REPO_CONFIG_PROJECT_NAME`).
    pub project_name: Option<String>,
    pub verbose: bool,
}

/// The `repo-config` command line.
pub fn cli() -> Command {
    let json = Arg::new("json")
        .long("json")
        .short('j')
        .required(true)
        .num_args(1)
        .value_parser(value_parser!(PathBuf))
        .help("Path to the JSON configuration file (required)");
    let silent = Arg::new("silent")
        .long("silent")
        .short('s')
        .help("Run in silent mode")
        .action(ArgAction::SetTrue);

    Command::new("repo-config")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Maps a checked-in JSON config with actual config values that won't be checked in")
        .long_about(
            "repo-config lets a repository declare the configuration it needs without checking \
             in the values. Run `repo-config collect --json settings.json --silent` whenever a \
             terminal starts to collect the values needed to run the application.",
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("project_name")
                .long("project-name")
                .global(true)
                .num_args(1)
                .help("Project name used for the output directory instead of the git root name"),
        )
        .subcommand(
            Command::new("collect")
                .about("Collect repository configurations")
                .arg(json.clone())
                .arg(silent.clone()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete repository configuration output files")
                .arg(json)
                .arg(silent),
        )
}

impl AppConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let (command, sub) = match matches.subcommand() {
            Some(("collect", sub)) => (CommandKind::Collect, sub),
            Some(("delete", sub)) => (CommandKind::Delete, sub),
            _ => bail!("expected a subcommand: collect or delete"),
        };
        let json_file = sub
            .get_one::<PathBuf>("json")
            .cloned()
            .ok_or_else(|| anyhow!("--json is required"))?;

        Ok(Self {
            command,
            json_file,
            silent: sub.get_flag("silent"),
            project_name: sub.get_one::<String>("project_name").cloned(),
            verbose: sub.get_flag("verbose"),
        })
    }

    /// Output locations: environment defaults plus the `--project-name` override.
    pub fn resolver(&self) -> repo_config_error::Result<PathResolver> {
        let resolver = PathResolver::from_env()?;
        Ok(match &self.project_name {
            Some(name) => resolver.with_project_name(name.clone()),
            None => resolver,
        })
    }

    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
