use log::debug;
use std::{collections::BTreeMap, time::Duration};

use crate::{log_store::LogStore, status::StatusLine};

/// State every command may touch. Owned by the presentation loop and lent to handlers for
/// the duration of a single dispatch.
pub struct Console {
    pub log: LogStore,
    pub status: StatusLine,
    pub running: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            log: LogStore::default(),
            status: StatusLine::default(),
            running: true,
        }
    }
}

impl Console {
    pub fn new(log_capacity: usize, status_ttl: Duration) -> Self {
        Self {
            log: LogStore::new(log_capacity),
            status: StatusLine::new(status_ttl),
            running: true,
        }
    }
}

pub struct CommandContext<'a> {
    pub console: &'a mut Console,
    pub registry: &'a CommandRegistry,
}

impl CommandContext<'_> {
    pub fn log(&mut self, text: impl Into<String>) {
        self.console.log.append(text);
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.console.status.set(text);
    }

    /// Logs `text` and shows it on the status line.
    pub fn report(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.console.log.append(text.clone());
        self.console.status.set(text);
    }

    pub fn stop(&mut self) {
        self.console.running = false;
    }
}

pub trait CommandHandler {
    /// Runs to completion on the render thread. Argument problems are reported through
    /// `ctx`, never returned.
    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>);
}

impl<F> CommandHandler for F
where
    F: Fn(&[&str], &mut CommandContext<'_>),
{
    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) {
        self(args, ctx)
    }
}

pub struct CommandDescriptor {
    verb: String,
    description: String,
    handler: Box<dyn CommandHandler>,
}

impl CommandDescriptor {
    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `verb` to `handler`, replacing any earlier binding for the same verb.
    pub fn register(
        &mut self,
        verb: impl Into<String>,
        handler: impl CommandHandler + 'static,
        description: impl Into<String>,
    ) {
        let verb = verb.into();
        debug!("Registering command: {}", verb);

        self.commands.insert(
            verb.clone(),
            CommandDescriptor {
                verb,
                description: description.into(),
                handler: Box::new(handler),
            },
        );
    }

    /// Same as [`register`](Self::register), with the closure's argument types inferred.
    pub fn register_fn<F>(
        &mut self,
        verb: impl Into<String>,
        handler: F,
        description: impl Into<String>,
    ) where
        F: Fn(&[&str], &mut CommandContext<'_>) + 'static,
    {
        self.register(verb, handler, description);
    }

    /// Descriptors ordered by verb.
    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }

    pub fn contains(&self, verb: &str) -> bool {
        self.commands.contains_key(verb)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns whether the verb matched. Blank input is ignored without touching `console`.
    pub fn dispatch(&self, line: &str, console: &mut Console) -> bool {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return false;
        };
        let args: Vec<&str> = tokens.collect();

        match self.commands.get(verb) {
            Some(descriptor) => {
                debug!("Dispatching {} with {} args", verb, args.len());
                console.status.set(format!("Executing command: {}", verb));

                let mut ctx = CommandContext {
                    console,
                    registry: self,
                };
                descriptor.handler.execute(&args, &mut ctx);
                true
            }
            None => {
                debug!("Unknown command: {}", verb);
                console
                    .log
                    .append(format!("Error: command '{}' not found", verb));
                false
            }
        }
    }
}
