// crates/repo_config/src/main.rs

use anyhow::{Context, Result};
use std::io;

use repo_config::{cli, collect_config_with, delete_config_with, AppConfig, CommandKind, StatusOutput};
use resolve_output_paths::OutputPaths;

fn main() -> Result<()> {
    let matches = cli().get_matches();
    let config = AppConfig::from_matches(&matches)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_level()),
    )
    .init();
    log::debug!("{:?}", config);

    let status = match run(&config) {
        Ok(paths) => StatusOutput::success(&paths),
        Err(err) => {
            log::error!("{} failed: {}", command_name(config.command), err);
            StatusOutput::error(&err)
        }
    };

    // stdout carries only the status envelope; prompts and logs use stderr.
    println!("{}", status.to_json().context("Failed to serialize status output")?);
    if !status.is_ok() {
        std::process::exit(1);
    }
    Ok(())
}

fn run(config: &AppConfig) -> repo_config_error::Result<OutputPaths> {
    let resolver = config.resolver()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stderr();

    match config.command {
        CommandKind::Collect => {
            let outcome = collect_config_with(
                &config.json_file,
                config.silent,
                &resolver,
                &mut input,
                &mut output,
            )?;
            log::info!("collect finished: {:?}", outcome);
        }
        CommandKind::Delete => {
            let outcome = delete_config_with(
                &config.json_file,
                config.silent,
                &resolver,
                &mut input,
                &mut output,
            )?;
            log::info!("delete finished: {:?}", outcome);
        }
    }
    resolver.output_paths(&config.json_file)
}

fn command_name(command: CommandKind) -> &'static str {
    match command {
        CommandKind::Collect => "collect",
        CommandKind::Delete => "delete",
    }
}
