//! Plain text output: the display string, ready to paste into a shell.

use super::formatter::CommandFormatter;
use crate::compiler::Command;

pub struct PlainFormatter;

impl CommandFormatter for PlainFormatter {
    fn format(&self, command: &Command) -> String {
        command.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn format_is_display_string() {
        let mut session = Session::tippecanoe().unwrap();
        session.set_input_path(0, "cities.geojson").unwrap();

        let output = PlainFormatter.format(&session.command());
        assert_eq!(output, "tippecanoe -o output.mbtiles -z14 cities.geojson");
        assert!(!output.contains('\n'));
    }
}
