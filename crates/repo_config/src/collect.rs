// crates/repo_config/src/collect.rs

use std::io::{self, BufRead, Write};
use std::path::Path;

use interactive_editor::run_editor;
use load_config_schema::load_schema;
use reconcile_config::{decide, merge_stored_values, Decision, StoreState};
use repo_config_error::{ConfigError, Result};
use resolve_output_paths::PathResolver;
use stored_values::{SchemaSink, ValueStore};

/// How a collect run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// The schema (with stored values merged in) was written without prompting.
    SavedSilently,
    /// The store was already current; nothing was written.
    UpToDate,
    /// The interactive editor ran and the user saved `saves` times.
    Edited { saves: usize },
}

/// Reconciles `input_json_file` against its stored values, prompting on stdin
/// and stderr when needed. Output locations come from the environment.
pub fn collect_config(input_json_file: &Path, silent: bool) -> Result<CollectOutcome> {
    let resolver = PathResolver::from_env()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stderr();
    collect_config_with(input_json_file, silent, &resolver, &mut input, &mut output)
}

/// [`collect_config`] with explicit output locations and prompt streams.
pub fn collect_config_with<R, W>(
    input_json_file: &Path,
    silent: bool,
    resolver: &PathResolver,
    input: &mut R,
    output: &mut W,
) -> Result<CollectOutcome>
where
    R: BufRead,
    W: Write,
{
    if !input_json_file.exists() {
        return Err(ConfigError::not_found(input_json_file));
    }
    let mut schema = load_schema(input_json_file)?;
    let store = ValueStore::new(resolver.resolve(input_json_file)?);

    let stored = store.read()?;
    merge_stored_values(&mut schema, &stored);
    let state = StoreState::read(input_json_file, &store)?;

    match decide(silent, &state, &schema, &stored) {
        Decision::Interactive(reason) => {
            if let Some(notice) = reason.notice() {
                writeln!(output, "{}", notice)
                    .map_err(|e| ConfigError::io("failed to write prompt", e))?;
            }
            let outcome = run_editor(schema, &store, input, output)?;
            Ok(CollectOutcome::Edited {
                saves: outcome.saves,
            })
        }
        Decision::SaveSilently => {
            store.save(&schema)?;
            Ok(CollectOutcome::SavedSilently)
        }
        Decision::UpToDate => {
            log::debug!(
                "{} is up to date",
                store.paths().json_output_file.display()
            );
            Ok(CollectOutcome::UpToDate)
        }
    }
}
