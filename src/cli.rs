use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::{
    io::{self, Write},
    path::Path,
};

use crate::app::{APP_NAME, App, ConsoleConfig};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity,
}

#[derive(Subcommand)]
pub enum Command {
    /// Inspect the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Run a single command line and print the resulting log
    Exec {
        /// Print only the last N log lines
        #[arg(long, value_name = "N")]
        tail: Option<usize>,

        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the value of a configuration key
    Get {
        #[arg(short, long)]
        key: String,
    },
    /// Print the location of the configuration file
    Path,
}

pub fn handle_config_action(action: ConfigAction) -> Result<()> {
    let mut stdout = io::stdout().lock();
    handle_config_action_with_path(action, None, &mut stdout)
}

fn handle_config_action_with_path(
    action: ConfigAction,
    config_path: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    debug!("Handling config action: {:?}", action);

    match action {
        ConfigAction::Get { key } => {
            info!("Getting config key: {}", key);

            let config = match config_path {
                Some(path) => ConsoleConfig::load_from(path)?,
                None => ConsoleConfig::load()?,
            };
            debug!("Config loaded successfully");

            match key.as_str() {
                "log_capacity" => writeln!(out, "{}", config.log_capacity)?,
                "history_capacity" => writeln!(out, "{}", config.history_capacity)?,
                "status_ttl_secs" => writeln!(out, "{}", config.status_ttl_secs)?,
                "auto_scroll" => writeln!(out, "{}", config.auto_scroll)?,
                _ => anyhow::bail!("Unknown config key: '{}'.", key),
            }
            Ok(())
        }
        ConfigAction::Path => {
            info!("Getting config path");

            let config_path = confy::get_configuration_file_path(APP_NAME, None)
                .context("Failed to get config path")?
                .display()
                .to_string();

            debug!("Config path resolved to: {}", config_path);
            writeln!(out, "{}", config_path)?;
            Ok(())
        }
    }
}

/// Dispatches `words` as one command line without the interactive shell.
pub fn handle_exec(words: &[String], tail: Option<usize>) -> Result<()> {
    let config = ConsoleConfig::load()?;
    let mut stdout = io::stdout().lock();
    exec_line(&config, &words.join(" "), tail, &mut stdout)
}

fn exec_line(
    config: &ConsoleConfig,
    line: &str,
    tail: Option<usize>,
    out: &mut impl Write,
) -> Result<()> {
    info!("Executing: {}", line);

    let mut app = App::new(config);
    if let Some(verb) = line.split_whitespace().next()
        && !app.registry.contains(verb)
    {
        warn!("'{}' is not a registered command", verb);
    }

    app.execute(line);

    let log = &app.console.log;
    if log.is_empty() {
        debug!("Nothing was logged for '{}'", line);
        return Ok(());
    }

    for entry in log.recent(tail.unwrap_or(log.len())) {
        writeln!(out, "{}", entry.display()).context("Failed to write command output")?;
    }
    Ok(())
}
