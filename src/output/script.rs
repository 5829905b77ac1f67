//! Shell script output.

use super::formatter::CommandFormatter;
use crate::compiler::Command;

pub struct ScriptFormatter;

impl CommandFormatter for ScriptFormatter {
    fn format(&self, command: &Command) -> String {
        format!("#!/bin/sh\nset -e\n\n{}", command.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn format_starts_with_shebang() {
        let session = Session::tippecanoe().unwrap();
        let output = ScriptFormatter.format(&session.command());

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "#!/bin/sh");
        assert_eq!(lines.last().unwrap(), &session.display());
    }
}
