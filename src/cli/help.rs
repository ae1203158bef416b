//! Help text rendering for commands and command sets.

use crate::cli::utils::{emphasis, heading, truncate_with_ellipsis};
use crate::signature::{Parameter, Signature};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

const SUMMARY_WIDTH: usize = 60;

/// Renders usage lines, parameter tables and command overviews.
///
/// # Example
///
/// ```
/// use commander::cli::HelpRenderer;
/// use commander::{Parameter, Signature, ValueType};
///
/// let signature = Signature::builder()
///     .param(Parameter::new("name", ValueType::Str))
///     .param(Parameter::of::<i64>("times").with_default(1))
///     .build()
///     .unwrap();
///
/// let renderer = HelpRenderer::new(false);
/// assert_eq!(renderer.usage("greet", &signature), "Usage: greet [OPTIONS] <name> [times]");
/// ```
#[derive(Clone, Debug)]
pub struct HelpRenderer {
    color: bool,
    width: u16,
}

impl HelpRenderer {
    /// Create a renderer; `color` enables ANSI styling.
    pub fn new(color: bool) -> Self {
        Self { color, width: 100 }
    }

    /// Set the table width in columns.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// The usage line, e.g. `Usage: greet [OPTIONS] <name> [times]`.
    pub fn usage(&self, program: &str, signature: &Signature) -> String {
        let mut parts = vec![format!("{} {}", heading("Usage:", self.color), program)];
        if !signature.is_empty() {
            parts.push("[OPTIONS]".to_string());
        }
        for parameter in signature.positional_parameters() {
            parts.push(positional_form(parameter));
        }
        parts.join(" ")
    }

    /// Full help for one command: description, usage and parameter table.
    pub fn render(&self, program: &str, signature: &Signature) -> String {
        let mut sections = Vec::new();

        if let Some(description) = signature.description() {
            if let Some(short) = &description.short_description {
                sections.push(short.clone());
            }
            if let Some(long) = &description.long_description {
                sections.push(long.clone());
            }
        }

        sections.push(self.usage(program, signature));

        if !signature.is_empty() {
            sections.push(format!(
                "{}\n{}",
                heading("Parameters:", self.color),
                self.parameter_table(signature)
            ));
        }

        if let Some(description) = signature.description() {
            if let Some(result) = &description.result_description {
                sections.push(format!("{}\n  {}", heading("Returns:", self.color), result));
            }
            if let Some(raises) = &description.raises_description {
                sections.push(format!("{}\n  {}", heading("Raises:", self.color), raises));
            }
        }

        let mut text = sections.join("\n\n");
        text.push('\n');
        text
    }

    /// The parameter table with columns parameter, type, default, required
    /// and description.
    pub fn parameter_table(&self, signature: &Signature) -> String {
        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(self.width);
        if self.color {
            table.enforce_styling();
        }

        table.set_header(
            ["Parameter", "Type", "Default", "Required", "Description"]
                .into_iter()
                .map(|h| self.header_cell(h)),
        );

        for parameter in signature.parameters() {
            table.add_row(vec![
                Cell::new(flag_column(parameter)),
                Cell::new(parameter.effective_type().to_string()),
                Cell::new(
                    parameter
                        .default
                        .as_ref()
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::new(if parameter.is_required() { "yes" } else { "no" }),
                Cell::new(parameter.description.as_deref().unwrap_or("")),
            ]);
        }

        table.to_string()
    }

    /// Overview of a command set: usage plus one line per command.
    ///
    /// `entries` holds command names with their short descriptions.
    pub fn overview(
        &self,
        program: &str,
        about: Option<&str>,
        entries: &[(String, Option<String>)],
    ) -> String {
        let mut text = String::new();
        if let Some(about) = about {
            text.push_str(about);
            text.push_str("\n\n");
        }
        text.push_str(&format!(
            "{} {} <COMMAND> [ARGS]...\n\n",
            heading("Usage:", self.color),
            program
        ));
        text.push_str(&heading("Commands:", self.color));
        text.push('\n');

        let name_width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, summary) in entries {
            let padding = " ".repeat(name_width - name.len());
            let summary = summary
                .as_deref()
                .map(|s| truncate_with_ellipsis(s, SUMMARY_WIDTH))
                .unwrap_or_default();
            text.push_str(
                format!("  {}{}  {}", emphasis(name, self.color), padding, summary).trim_end(),
            );
            text.push('\n');
        }

        text.push_str(&format!(
            "\nRun '{} <COMMAND> --help' for details on a command.\n",
            program
        ));
        text
    }

    fn header_cell(&self, text: &str) -> Cell {
        if self.color {
            Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
        } else {
            Cell::new(text)
        }
    }
}

fn flag_column(parameter: &Parameter) -> String {
    match parameter.short {
        Some(short) => format!("{}, -{}", parameter.long_flag(), short),
        None => parameter.long_flag(),
    }
}

fn positional_form(parameter: &Parameter) -> String {
    let suffix = if parameter.effective_type().is_list() { "..." } else { "" };
    if parameter.is_required() {
        format!("<{}>{}", parameter.name, suffix)
    } else {
        format!("[{}]{}", parameter.name, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::ValueType;

    fn signature() -> Signature {
        Signature::builder()
            .param(Parameter::new("name", ValueType::Str))
            .param(Parameter::of::<i64>("times").with_default(1).with_short('t'))
            .param(Parameter::flag("shout"))
            .param(Parameter::of::<Vec<String>>("tags").keyword_only().with_default(Vec::<String>::new()))
            .doc(
                "Greet someone.

                Prints one line per repetition.

                Args:
                    name: Who to greet.
                    times: How many times.

                Returns:
                    Nothing.
                ",
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_usage_line() {
        let renderer = HelpRenderer::new(false);
        assert_eq!(
            renderer.usage("greet", &signature()),
            "Usage: greet [OPTIONS] <name> [times]"
        );
        assert_eq!(renderer.usage("noop", &Signature::new()), "Usage: noop");
    }

    #[test]
    fn test_usage_marks_lists() {
        let signature = Signature::builder()
            .param(Parameter::of::<Vec<String>>("files"))
            .build()
            .unwrap();
        assert_eq!(
            HelpRenderer::new(false).usage("cat", &signature),
            "Usage: cat [OPTIONS] <files>..."
        );
    }

    #[test]
    fn test_render_lists_every_parameter() {
        let text = HelpRenderer::new(false).render("greet", &signature());

        assert!(text.starts_with("Greet someone."));
        assert!(text.contains("Prints one line per repetition."));
        assert!(text.contains("Usage: greet"));
        for expected in [
            "Parameter", "Type", "Default", "Required", "Description",
            "--name", "--times, -t", "--shout", "--tags",
            "str", "int", "bool", "list[str]",
            "Who to greet.", "How many times.",
            "Returns:", "Nothing.",
        ] {
            assert!(text.contains(expected), "help text is missing {:?}:\n{}", expected, text);
        }
    }

    #[test]
    fn test_table_rows() {
        let table = HelpRenderer::new(false).parameter_table(&signature());
        let name_row = table.lines().find(|l| l.contains("--name")).unwrap();
        assert!(name_row.contains("yes"));
        assert!(name_row.contains('-'));
        let times_row = table.lines().find(|l| l.contains("--times")).unwrap();
        assert!(times_row.contains("no"));
        assert!(times_row.contains('1'));
    }

    #[test]
    fn test_overview() {
        let entries = vec![
            ("greet".to_string(), Some("Greet someone.".to_string())),
            ("db".to_string(), None),
        ];
        let text = HelpRenderer::new(false).overview("demo", Some("Demo tool"), &entries);
        assert!(text.starts_with("Demo tool\n\nUsage: demo <COMMAND> [ARGS]..."));
        assert!(text.contains("  greet  Greet someone.\n"));
        assert!(text.contains("  db\n"));
    }
}
