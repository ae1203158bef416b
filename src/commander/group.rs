//! Named collections of commands, addressed as `prog group sub ...`.

use crate::adapter::Command;
use crate::error::{CommanderError, CommanderResult};

/// A command group: a named set of subcommands.
///
/// Subcommand names are lowercased on registration and on lookup.
///
/// # Example
///
/// ```
/// use commander::{CommandGroup, FnCommand, Outcome, Signature};
///
/// let group = CommandGroup::new("db")
///     .with_about("Database maintenance")
///     .with(FnCommand::new("Migrate", Signature::builder(), |_| Ok(Outcome::Unit)))
///     .unwrap();
///
/// assert!(group.get("migrate").is_some());
/// assert_eq!(group.names(), vec!["migrate"]);
/// ```
pub struct CommandGroup {
    name: String,
    about: Option<String>,
    commands: Vec<(String, Box<dyn Command>)>,
}

impl CommandGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            about: None,
            commands: Vec::new(),
        }
    }

    /// Set the one-line description shown in overviews.
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Add a subcommand. Returns an error if the name is taken or the
    /// signature is invalid.
    pub fn add<C: Command + 'static>(&mut self, command: C) -> CommanderResult<&mut Self> {
        command.signature()?;
        let key = command.name().to_lowercase();
        if self.get(&key).is_some() {
            return Err(CommanderError::duplicate_command(format!("{} {}", self.name, key)));
        }
        self.commands.push((key, Box::new(command)));
        Ok(self)
    }

    /// Add a subcommand, builder style.
    pub fn with<C: Command + 'static>(mut self, command: C) -> CommanderResult<Self> {
        self.add(command)?;
        Ok(self)
    }

    /// Look up a subcommand by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        let key = name.to_lowercase();
        self.commands
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, c)| c.as_ref())
    }

    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The group description.
    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// Subcommand names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Subcommand names with their summaries, for overviews.
    pub(crate) fn entries(&self) -> Vec<(String, Option<String>)> {
        self.commands
            .iter()
            .map(|(n, c)| (n.clone(), c.summary()))
            .collect()
    }

    /// Number of subcommands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the group has no subcommands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
