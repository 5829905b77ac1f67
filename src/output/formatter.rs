//! Command formatter trait and factory.
//!
//! Every output format renders the same compiled `Command`; they differ only
//! in how the tokens are wrapped.

use crate::cli::OutputFormat;
use crate::compiler::Command;

/// Trait for turning a compiled command into output text.
pub trait CommandFormatter {
    /// Formats the command. The result carries no trailing newline.
    fn format(&self, command: &Command) -> String;
}

/// Creates the formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn CommandFormatter> {
    use super::json::JsonFormatter;
    use super::plain::PlainFormatter;
    use super::script::ScriptFormatter;

    match format {
        OutputFormat::Plain => Box::new(PlainFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Script => Box::new(ScriptFormatter),
    }
}
