// crates/resolve_output_paths/src/lib.rs

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use get_git_root::get_git_root;
use repo_config_error::{ConfigError, Result};

/// Overrides the directory that holds every project's stored values.
pub const OUTPUT_ROOT_ENV: &str = "REPO_CONFIG_HOME";
/// Overrides the project identity normally derived from the git toplevel.
pub const PROJECT_NAME_ENV: &str = "REPO_CONFIG_PROJECT_NAME";

const OUTPUT_ROOT_DIR_NAME: &str = ".repo-config";
const FALLBACK_PROJECT_NAME: &str = "default";

/// Where the stored values for one schema file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub output_dir: PathBuf,
    pub json_output_file: PathBuf,
    pub env_output_file: PathBuf,
}

/// Maps a schema file to its project-scoped output files.
///
/// The resolver is a plain value so callers (and tests) can point it at any
/// output root without touching the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    output_root: PathBuf,
    project_name: Option<String>,
}

impl PathResolver {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            project_name: None,
        }
    }

    /// Builds a resolver from `REPO_CONFIG_HOME` / `REPO_CONFIG_PROJECT_NAME`,
    /// falling back to `<home>/.repo-config` and git-derived project names.
    pub fn from_env() -> Result<Self> {
        let output_root = match env::var_os(OUTPUT_ROOT_ENV) {
            Some(root) if !root.is_empty() => PathBuf::from(root),
            _ => default_output_root()?,
        };
        let project_name = env::var(PROJECT_NAME_ENV).ok().filter(|name| !name.trim().is_empty());
        Ok(Self {
            output_root,
            project_name,
        })
    }

    /// Forces the project identity instead of deriving it from git.
    pub fn with_project_name(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = Some(project_name.into());
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Resolves the output paths for `input_json_file`, creating the project
    /// directory (and its parents) when it does not exist yet.
    pub fn resolve(&self, input_json_file: &Path) -> Result<OutputPaths> {
        let paths = self.output_paths(input_json_file)?;
        if !paths.output_dir.is_dir() {
            fs::create_dir_all(&paths.output_dir).map_err(|e| {
                ConfigError::io(
                    format!("failed to create directory '{}'", paths.output_dir.display()),
                    e,
                )
            })?;
            log::debug!("created output directory {}", paths.output_dir.display());
        }
        Ok(paths)
    }

    /// Same as [`PathResolver::resolve`] without creating anything on disk.
    pub fn output_paths(&self, input_json_file: &Path) -> Result<OutputPaths> {
        let abs_input = absolute(input_json_file)?;
        let project_name = match &self.project_name {
            Some(name) => name.clone(),
            None => project_name(&abs_input),
        };
        let output_dir = self.output_root.join(project_name);
        let (json_name, env_name) = output_file_names(&abs_input);
        Ok(OutputPaths {
            json_output_file: output_dir.join(json_name),
            env_output_file: output_dir.join(env_name),
            output_dir,
        })
    }
}

/// `<home>/.repo-config`; an `Io` error when the home directory is unknown.
pub fn default_output_root() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(OUTPUT_ROOT_DIR_NAME))
        .ok_or_else(|| {
            ConfigError::io(
                "failed to get home directory",
                io::Error::new(io::ErrorKind::NotFound, "home directory could not be determined"),
            )
        })
}

/// Name of the project enclosing `input_json_file`: the last segment of its git
/// toplevel, or of the current working directory outside a repository.
pub fn project_name(input_json_file: &Path) -> String {
    let start_dir = input_json_file.parent().unwrap_or(input_json_file);
    let root = match get_git_root(start_dir) {
        Ok(git_root) => PathBuf::from(git_root),
        Err(err) => {
            log::debug!("{}; using the current directory as project", err);
            env::current_dir().unwrap_or_default()
        }
    };
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string())
}

/// `.<stem>-values.json` and `.<stem>-values.env` for the given schema file.
pub fn output_file_names(input_json_file: &Path) -> (String, String) {
    let stem = input_json_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (
        format!(".{}-values.json", stem),
        format!(".{}-values.env", stem),
    )
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|e| ConfigError::io("failed to get absolute path of input JSON file", e))
}
