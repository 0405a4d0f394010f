mod app;
mod builtins;
mod cli;
mod command;
mod event;
mod history;
mod log_store;
mod status;
mod ui;

use anyhow::Result;
use clap::Parser;
use log::info;
use ratatui::DefaultTerminal;

use crate::{
    app::{App, ConsoleConfig},
    cli::{Cli, Command},
};

fn run_app(terminal: &mut DefaultTerminal, config: &ConsoleConfig) -> Result<()> {
    let mut app = App::start(config);

    while !app.should_quit() {
        app.log_rows = ui::log_rows(terminal.size()?);
        terminal.draw(|frame| ui::render(frame, &app))?;
        event::handle_events(&mut app)?;
    }

    info!("Console stopped");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    match cli.command {
        Some(Command::Config { action }) => cli::handle_config_action(action),
        Some(Command::Exec { tail, words }) => cli::handle_exec(&words, tail),
        None => {
            let config = ConsoleConfig::load()?;
            ratatui::run(|terminal| run_app(terminal, &config))
        }
    }
}
