//! Command store and dispatcher.

use crate::adapter::{wants_help, Adapter, AdapterOptions, Command};
use crate::cli::utils::{write_diagnostic, write_help_hint};
use crate::cli::HelpRenderer;
use crate::commander::CommandGroup;
use crate::error::{CommanderError, CommanderResult};
use std::io::{self, Write};
use tracing::{debug, warn};

#[cfg(feature = "observability")]
use crate::observability::RunLogger;
#[cfg(feature = "observability")]
use std::path::PathBuf;

enum Entry {
    Command(Box<dyn Command>),
    Group(CommandGroup),
}

impl Entry {
    fn summary(&self) -> Option<String> {
        match self {
            Entry::Command(command) => command.summary(),
            Entry::Group(group) => group.about().map(str::to_string),
        }
    }
}

/// A set of named commands dispatched from `argv`.
///
/// Names are lowercased on registration and matched case-insensitively.
///
/// # Example
///
/// ```
/// use commander::{Commander, FnCommand, Outcome, Parameter, Signature, ValueType};
///
/// let mut app = Commander::new("demo");
/// app.register(FnCommand::new(
///     "greet",
///     Signature::builder().param(Parameter::new("name", ValueType::Str)),
///     |args| Ok(Outcome::text(format!("Hello, {}!", args.get::<String>("name")?))),
/// ))
/// .unwrap();
///
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = app.run_from_with_io(["demo", "greet", "--name", "Ada"], &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert_eq!(String::from_utf8(out).unwrap(), "Hello, Ada!\n");
/// ```
pub struct Commander {
    name: String,
    version: Option<String>,
    about: Option<String>,
    entries: Vec<(String, Entry)>,
    options: AdapterOptions,
    #[cfg(feature = "observability")]
    run_log: Option<(PathBuf, String)>,
}

impl Commander {
    /// Create an empty command set for the program `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            about: None,
            entries: Vec::new(),
            options: AdapterOptions::default(),
            #[cfg(feature = "observability")]
            run_log: None,
        }
    }

    /// Build a command set from loaded configuration.
    #[cfg(feature = "config")]
    pub fn from_config(config: &crate::config::CommanderConfig) -> Self {
        let mut commander = Self::new(config.app.name.clone()).with_options(config.adapter_options());
        commander.version = config.app.version.clone();
        commander.about = config.app.about.clone();
        #[cfg(feature = "observability")]
        let commander = match config.log_file_path() {
            Some(path) => commander.with_run_log(path, config.logging.log_level.clone()),
            None => commander,
        };
        commander
    }

    /// Set the version printed by `--version`.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the description printed in the overview.
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Set the options every adapter is built with.
    pub fn with_options(mut self, options: AdapterOptions) -> Self {
        self.options = options;
        self
    }

    /// Record every run in a markdown log at `path`.
    #[cfg(feature = "observability")]
    pub fn with_run_log(mut self, path: impl Into<PathBuf>, level: impl Into<String>) -> Self {
        self.run_log = Some((path.into(), level.into()));
        self
    }

    /// The program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The options every adapter is built with.
    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    /// Register a command under its lowercased name.
    ///
    /// Returns an error if a command or group with that name exists, or if
    /// the command's signature is invalid.
    pub fn register<C: Command + 'static>(&mut self, command: C) -> CommanderResult<&mut Self> {
        command.signature()?;
        let key = command.name().to_lowercase();
        self.insert(key, Entry::Command(Box::new(command)))
    }

    /// Register a command group.
    pub fn group(&mut self, group: CommandGroup) -> CommanderResult<&mut Self> {
        let key = group.name().to_string();
        self.insert(key, Entry::Group(group))
    }

    fn insert(&mut self, key: String, entry: Entry) -> CommanderResult<&mut Self> {
        if self.entries.iter().any(|(n, _)| *n == key) {
            return Err(CommanderError::duplicate_command(key));
        }
        debug!(command = %key, "registered command");
        self.entries.push((key, entry));
        Ok(self)
    }

    /// Registered command and group names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Look up a top-level command, ignoring case. Groups are not returned.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        match self.entry(name)? {
            Entry::Command(command) => Some(command.as_ref()),
            Entry::Group(_) => None,
        }
    }

    /// Look up a group, ignoring case.
    pub fn get_group(&self, name: &str) -> Option<&CommandGroup> {
        match self.entry(name)? {
            Entry::Group(group) => Some(group),
            Entry::Command(_) => None,
        }
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        let key = name.to_lowercase();
        self.entries.iter().find(|(n, _)| *n == key).map(|(_, e)| e)
    }

    /// Overview of every registered command.
    pub fn overview(&self) -> String {
        let entries: Vec<(String, Option<String>)> = self
            .entries
            .iter()
            .map(|(n, e)| (n.clone(), e.summary()))
            .collect();
        HelpRenderer::new(self.options.color).overview(&self.name, self.about.as_deref(), &entries)
    }

    /// Dispatch the process arguments and return the exit code.
    pub fn run(&self) -> i32 {
        self.run_from(std::env::args())
    }

    /// Dispatch `argv` (including the program name) against the process
    /// streams and return the exit code.
    pub fn run_from<I, T>(&self, argv: I) -> i32
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.run_from_with_io(argv, &mut stdout.lock(), &mut stderr.lock())
    }

    /// Dispatch `argv` (including the program name) with explicit streams.
    ///
    /// With no command the overview goes to `err` with the usage exit code;
    /// `--help` prints it to `out` and returns 0.
    pub fn run_from_with_io<I, T>(&self, argv: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let argv: Vec<String> = argv.into_iter().map(|t| t.as_ref().to_string()).collect();
        let args = argv.get(1..).unwrap_or_default();

        let Some(first) = args.first() else {
            return self.print_usage(&self.overview(), err);
        };

        match first.as_str() {
            "--help" | "-h" => return self.print(&self.overview(), out),
            "--version" | "-V" => {
                let line = match &self.version {
                    Some(version) => format!("{} {}\n", self.name, version),
                    None => format!("{}\n", self.name),
                };
                return self.print(&line, out);
            }
            _ => {}
        }

        match self.entry(first) {
            Some(Entry::Command(command)) => {
                let program = format!("{} {}", self.name, command.name().to_lowercase());
                self.dispatch(command.as_ref(), program, &args[1..], out, err)
            }
            Some(Entry::Group(group)) => self.dispatch_group(group, &args[1..], out, err),
            None => self.report(&CommanderError::unknown_command(first.as_str()), &self.name, err),
        }
    }

    fn dispatch_group(
        &self,
        group: &CommandGroup,
        args: &[String],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> i32 {
        let program = format!("{} {}", self.name, group.name());
        let overview = || {
            HelpRenderer::new(self.options.color).overview(&program, group.about(), &group.entries())
        };

        let Some(sub) = args.first() else {
            return self.print_usage(&overview(), err);
        };
        if wants_help(&args[..1]) {
            return self.print(&overview(), out);
        }

        match group.get(sub) {
            Some(command) => {
                let program = format!("{} {}", program, command.name().to_lowercase());
                self.dispatch(command, program, &args[1..], out, err)
            }
            None => self.report(
                &CommanderError::unknown_command(format!("{} {}", group.name(), sub)),
                &program,
                err,
            ),
        }
    }

    fn dispatch(
        &self,
        command: &dyn Command,
        program: String,
        tokens: &[String],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> i32 {
        debug!(program = %program, "dispatching command");
        let options = AdapterOptions {
            program_name: Some(program.clone()),
            ..self.options.clone()
        };

        let adapter = match Adapter::build_with(command, options) {
            Ok(adapter) => adapter,
            Err(error) => return self.report(&error, &program, err),
        };

        #[cfg(feature = "observability")]
        let adapter = match &self.run_log {
            Some((path, level)) => match RunLogger::new(Some(path), Some(level)) {
                Ok(logger) => adapter.with_run_logger(logger),
                Err(e) => {
                    warn!(error = %e, "run log disabled");
                    adapter
                }
            },
            None => adapter,
        };

        adapter.run_with_io(tokens, out, err)
    }

    fn print(&self, text: &str, out: &mut dyn Write) -> i32 {
        match out.write_all(text.as_bytes()) {
            Ok(()) => 0,
            Err(e) => {
                warn!(error = %e, "failed to write output");
                self.options.failure_exit_code
            }
        }
    }

    fn print_usage(&self, text: &str, err: &mut dyn Write) -> i32 {
        if let Err(e) = err.write_all(text.as_bytes()) {
            warn!(error = %e, "failed to write usage");
        }
        self.options.usage_exit_code
    }

    fn report(&self, error: &CommanderError, program: &str, err: &mut dyn Write) -> i32 {
        warn!(program, "{}", error);
        let written = write_diagnostic(err, program, &error.to_string(), self.options.color)
            .and_then(|()| {
                if error.is_usage_error() {
                    write_help_hint(err, program, self.options.color)
                } else {
                    Ok(())
                }
            });
        if let Err(e) = written {
            warn!(error = %e, "failed to write diagnostic");
        }
        error.exit_code(self.options.usage_exit_code, self.options.failure_exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{FnCommand, Outcome};
    use crate::parser::ParsedInvocation;
    use crate::signature::{Parameter, Signature, ValueType};

    fn greet() -> impl Command {
        FnCommand::new(
            "Greet",
            Signature::builder()
                .param(Parameter::new("name", ValueType::Str))
                .doc("Greet someone."),
            |args: &ParsedInvocation| Ok(Outcome::text(format!("Hello, {}!", args.get::<String>("name")?))),
        )
    }

    fn app() -> Commander {
        let mut app = Commander::new("demo")
            .with_version("1.0.0")
            .with_options(AdapterOptions {
                color: false,
                ..AdapterOptions::default()
            });
        app.register(greet()).unwrap();
        app.group(
            CommandGroup::new("db")
                .with_about("Database tasks")
                .with(FnCommand::new(
                    "migrate",
                    Signature::builder().param(Parameter::of::<i64>("steps").with_default(1)),
                    |args: &ParsedInvocation| Ok(Outcome::text(format!("migrated {}", args.get::<i64>("steps")?))),
                ))
                .unwrap(),
        )
        .unwrap();
        app
    }

    fn run(app: &Commander, argv: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = app.run_from_with_io(argv, &mut out, &mut err);
        (code, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_register_lowercases() {
        let app = app();
        assert_eq!(app.names(), vec!["greet", "db"]);
        assert!(app.get("GREET").is_some());
        assert!(app.get("db").is_none());
        assert!(app.get_group("DB").is_some());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut app = app();
        assert!(matches!(
            app.register(greet()),
            Err(CommanderError::DuplicateCommand { .. })
        ));
        assert!(matches!(
            app.group(CommandGroup::new("Greet")),
            Err(CommanderError::DuplicateCommand { .. })
        ));
    }

    #[test]
    fn test_dispatch_command() {
        let (code, out, _) = run(&app(), &["demo", "greet", "--name", "Ada"]);
        assert_eq!(code, 0);
        assert_eq!(out, "Hello, Ada!\n");

        let (code, out, _) = run(&app(), &["demo", "GREET", "Bob"]);
        assert_eq!(code, 0);
        assert_eq!(out, "Hello, Bob!\n");
    }

    #[test]
    fn test_dispatch_group() {
        let (code, out, _) = run(&app(), &["demo", "db", "migrate", "--steps", "3"]);
        assert_eq!(code, 0);
        assert_eq!(out, "migrated 3\n");

        let (code, _, err) = run(&app(), &["demo", "db", "drop"]);
        assert_eq!(code, 2);
        assert!(err.contains("unknown command 'db drop'"));

        let (code, _, err) = run(&app(), &["demo", "db"]);
        assert_eq!(code, 2);
        assert!(err.contains("migrate"));

        let (code, out, _) = run(&app(), &["demo", "db", "--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("Usage: demo db <COMMAND>"));
    }

    #[test]
    fn test_no_command() {
        let (code, out, err) = run(&app(), &["demo"]);
        assert_eq!(code, 2);
        assert!(out.is_empty());
        assert!(err.contains("greet"));
        assert!(err.contains("Greet someone."));
        assert!(err.contains("Database tasks"));
    }

    #[test]
    fn test_unknown_command() {
        let (code, _, err) = run(&app(), &["demo", "wave"]);
        assert_eq!(code, 2);
        assert!(err.starts_with("error: demo: unknown command 'wave'"));
    }

    #[test]
    fn test_top_level_help_and_version() {
        let (code, out, _) = run(&app(), &["demo", "--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("Usage: demo <COMMAND> [ARGS]..."));

        let (code, out, _) = run(&app(), &["demo", "--version"]);
        assert_eq!(code, 0);
        assert_eq!(out, "demo 1.0.0\n");
    }

    #[test]
    fn test_command_help_uses_full_program_name() {
        let (code, out, _) = run(&app(), &["demo", "greet", "--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("Usage: demo greet [OPTIONS] <name>"));
    }

    #[test]
    fn test_bad_signature_rejected_at_registration() {
        let mut app = app();
        let result = app.register(FnCommand::new(
            "broken",
            Signature::builder().tagged("data", "dict"),
            |_: &ParsedInvocation| Ok(Outcome::Unit),
        ));
        match result {
            Err(CommanderError::Signature { parameter, .. }) => assert_eq!(parameter, "data"),
            Err(other) => panic!("Expected Signature error, got {:?}", other),
            Ok(_) => panic!("Expected Signature error"),
        }
        assert!(app.get("broken").is_none());
        assert_eq!(run(&app, &["demo", "broken"]).0, 2);
    }
}
