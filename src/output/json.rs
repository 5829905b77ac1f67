//! JSON output for tools that run the command themselves.
//!
//! The document carries the program and argument tokens unjoined, so a
//! caller can pass them to `exec` without re-parsing shell syntax, plus the
//! display string for humans.

use serde::Serialize;

use super::formatter::CommandFormatter;
use crate::compiler::Command;

#[derive(Serialize)]
struct CommandDocument<'a> {
    program: &'a str,
    tokens: &'a [String],
    command: String,
}

pub struct JsonFormatter;

impl CommandFormatter for JsonFormatter {
    fn format(&self, command: &Command) -> String {
        let document = CommandDocument {
            program: command.program(),
            tokens: command.args(),
            command: command.display(),
        };

        serde_json::to_string_pretty(&document).expect("JSON serialization should not fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn command() -> Command {
        let mut session = Session::tippecanoe().unwrap();
        session.set_str("name", "World Cities").unwrap();
        session.set_input_path(0, "cities.geojson").unwrap();
        session.command()
    }

    #[test]
    fn format_produces_valid_json() {
        let output = JsonFormatter.format(&command());

        let parsed: serde_json::Value =
            serde_json::from_str(&output).expect("Output should be valid JSON");
        assert_eq!(parsed["program"], "tippecanoe");
        assert!(parsed["tokens"].is_array());
    }

    #[test]
    fn tokens_exclude_program() {
        let output = JsonFormatter.format(&command());

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let tokens = parsed["tokens"].as_array().unwrap();
        assert_eq!(tokens[0], "-o");
        assert_eq!(tokens.last().unwrap(), "cities.geojson");
    }

    #[test]
    fn command_keeps_quoting() {
        let output = JsonFormatter.format(&command());

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed["command"],
            "tippecanoe -o output.mbtiles -n 'World Cities' -z14 cities.geojson"
        );
    }
}
