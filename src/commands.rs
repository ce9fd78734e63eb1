use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::error::{CommandError, Result};

/// A command name and its arguments, split from the process arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    args: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Builds a command from raw arguments (program name already removed).
    /// Returns `None` when there is no command name.
    pub fn from_args<I>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let name = args.next()?;
        Some(Self::new(name, args.collect()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

pub type Handler<S> = for<'a> fn(&'a mut S, Command) -> HandlerFuture<'a>;

/// Maps command names to handlers and dispatches to them.
pub struct Commands<S> {
    handlers: HashMap<String, Handler<S>>,
}

impl<S> Default for Commands<S> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<S> Commands<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, replacing any earlier handler for that name.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler<S>) {
        self.handlers.insert(name.into(), handler);
    }

    /// Runs the handler registered for `cmd` and returns its result untouched.
    pub async fn run(&self, state: &mut S, cmd: Command) -> Result<()> {
        let handler = *self
            .handlers
            .get(cmd.name())
            .ok_or_else(|| CommandError::UnknownCommand(cmd.name().to_string()))?;

        debug!("Dispatching '{}' with {} args", cmd.name(), cmd.args().len());
        handler(state, cmd).await
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
