// crates/repo_config/src/delete.rs

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use repo_config_error::{ConfigError, Result};
use resolve_output_paths::PathResolver;

/// How a delete run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Neither output file existed.
    NothingToDelete,
    /// The user did not confirm.
    Canceled,
    Deleted(Vec<PathBuf>),
}

/// Deletes the stored-values files derived from `input_json_file`, asking for
/// confirmation on `input` unless `silent`. Messages go to stderr.
pub fn delete_config<R: BufRead>(
    input_json_file: &Path,
    silent: bool,
    input: &mut R,
) -> Result<DeleteOutcome> {
    let resolver = PathResolver::from_env()?;
    let mut output = io::stderr();
    delete_config_with(input_json_file, silent, &resolver, input, &mut output)
}

/// [`delete_config`] with explicit output locations and message stream.
pub fn delete_config_with<R, W>(
    input_json_file: &Path,
    silent: bool,
    resolver: &PathResolver,
    input: &mut R,
    output: &mut W,
) -> Result<DeleteOutcome>
where
    R: BufRead,
    W: Write,
{
    let paths = resolver.resolve(input_json_file)?;
    let files: Vec<PathBuf> = [paths.json_output_file, paths.env_output_file]
        .into_iter()
        .filter(|file| file.exists())
        .collect();

    if files.is_empty() {
        writeln!(output, "No output files to delete.").map_err(message_error)?;
        return Ok(DeleteOutcome::NothingToDelete);
    }

    if !silent && !confirm(&files, input, output)? {
        writeln!(output, "Deletion canceled.").map_err(message_error)?;
        return Ok(DeleteOutcome::Canceled);
    }

    for file in &files {
        fs::remove_file(file).map_err(|e| {
            ConfigError::io(format!("failed to delete file '{}'", file.display()), e)
        })?;
        log::info!("deleted {}", file.display());
        if !silent {
            writeln!(output, "Deleted file: {}", file.display()).map_err(message_error)?;
        }
    }
    Ok(DeleteOutcome::Deleted(files))
}

fn confirm<R: BufRead, W: Write>(files: &[PathBuf], input: &mut R, output: &mut W) -> Result<bool> {
    writeln!(output, "Do you want to delete the following files?").map_err(message_error)?;
    for file in files {
        writeln!(output, " - {}", file.display()).map_err(message_error)?;
    }
    write!(output, "Type 'yes' to confirm: ")
        .and_then(|_| output.flush())
        .map_err(message_error)?;

    let mut answer = String::new();
    if input.read_line(&mut answer).map_err(ConfigError::input)? == 0 {
        return Err(ConfigError::end_of_input());
    }
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}

fn message_error(e: io::Error) -> ConfigError {
    ConfigError::io("failed to write message", e)
}
