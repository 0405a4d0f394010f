use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

use crate::{
    builtins::register_builtins,
    command::{CommandRegistry, Console},
    history::{DEFAULT_HISTORY_CAPACITY, InputHistory},
    log_store::DEFAULT_LOG_CAPACITY,
    status::DEFAULT_STATUS_TTL,
};

pub const APP_NAME: &str = "console_manager";

const STARTUP_NOTICE: &str = "Application started. Type 'help' for a list of commands.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub log_capacity: usize,
    pub history_capacity: usize,
    pub status_ttl_secs: u64,
    pub auto_scroll: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            status_ttl_secs: DEFAULT_STATUS_TTL.as_secs(),
            auto_scroll: true,
        }
    }
}

impl ConsoleConfig {
    pub fn load() -> Result<Self> {
        confy::load(APP_NAME, None).context("Failed to load configuration")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        confy::load_path(path).context("Failed to load configuration")
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_secs(self.status_ttl_secs)
    }
}

pub struct App {
    pub console: Console,
    pub registry: CommandRegistry,
    pub history: InputHistory,
    pub input: String,
    pub auto_scroll: bool,
    /// Lines scrolled up from the newest log entry; 0 follows the tail.
    pub scroll_offset: usize,
    /// Rows the log pane can show, refreshed from the terminal size before each frame.
    pub log_rows: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&ConsoleConfig::default())
    }
}

impl App {
    pub fn new(config: &ConsoleConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        debug!("Registered {} commands", registry.len());

        Self {
            console: Console::new(config.log_capacity, config.status_ttl()),
            registry,
            history: InputHistory::new(config.history_capacity),
            input: String::new(),
            auto_scroll: config.auto_scroll,
            scroll_offset: 0,
            log_rows: 0,
        }
    }

    /// Builds the app and logs the startup notice shown in the interactive shell.
    pub fn start(config: &ConsoleConfig) -> Self {
        let mut app = Self::new(config);
        app.console.log.append(STARTUP_NOTICE);
        info!("Console started");
        app
    }

    pub fn should_quit(&self) -> bool {
        !self.console.running
    }

    pub fn quit(&mut self) {
        self.console.running = false;
    }

    pub fn execute(&mut self, line: &str) -> bool {
        let matched = self.registry.dispatch(line, &mut self.console);
        if self.auto_scroll {
            self.scroll_offset = 0;
        }
        matched
    }

    /// Submits the input buffer: records it in history, dispatches it and empties the field.
    pub fn submit_input(&mut self) {
        if self.input.is_empty() {
            return;
        }

        let line = std::mem::take(&mut self.input);
        debug!("Submitting: {}", line);
        self.history.submit(line.clone());
        self.execute(&line);
    }

    pub fn recall_previous(&mut self) {
        if let Some(line) = self.history.recall_previous() {
            self.input = line.to_string();
        }
    }

    pub fn recall_next(&mut self) {
        match self.history.recall_next() {
            Some(line) => self.input = line.to_string(),
            None => self.input.clear(),
        }
    }

    /// Furthest the view can move up before the oldest entry reaches the top of the pane.
    pub fn max_scroll_offset(&self) -> usize {
        self.console.log.len().saturating_sub(self.log_rows)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_scroll_offset());
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self
            .scroll_offset
            .min(self.max_scroll_offset())
            .saturating_sub(lines);
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn toggle_auto_scroll(&mut self) {
        self.auto_scroll = !self.auto_scroll;
        if self.auto_scroll {
            self.scroll_offset = 0;
        }
    }
}
