//! Output generation for tcgen.
//!
//! This module writes the compiled command to stdout or a file in one of
//! several formats, and prints the human-oriented listings (option
//! reference, recipes, per-option contributions).

pub mod formatter;
pub mod json;
pub mod plain;
pub mod script;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::compiler::{Command, Contribution};
use crate::recipes::Recipe;
use crate::schema::Schema;
use formatter::create_formatter;

/// Errors that can occur during output generation.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes commands and listings to stdout, stderr or a file.
///
/// The command itself goes to the output file when one is set, otherwise to
/// stdout. Listings always go to stdout and the contribution breakdown to
/// stderr, so that stdout stays pipeable.
pub struct OutputWriter {
    format: OutputFormat,
    output_file: Option<PathBuf>,
    no_color: bool,
}

impl OutputWriter {
    /// Creates a new output writer.
    ///
    /// # Arguments
    ///
    /// * `format` - The output format to use
    /// * `output_file` - Optional file to write the command to; if None, outputs to stdout
    /// * `no_color` - Whether to disable colored output
    pub fn new(format: OutputFormat, output_file: Option<PathBuf>, no_color: bool) -> Self {
        Self {
            format,
            output_file,
            no_color,
        }
    }

    /// Writes the formatted command.
    pub fn write(&self, command: &Command) -> Result<(), OutputError> {
        let formatter = create_formatter(self.format);
        let formatted = formatter.format(command);

        match &self.output_file {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, format!("{}\n", formatted))?;
                log::info!("Written: {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "{}", formatted)?;
            }
        }

        Ok(())
    }

    /// Writes which tokens each option contributed to stderr.
    pub fn write_explain(&self, contributions: &[Contribution<'_>]) -> Result<(), OutputError> {
        let stderr = io::stderr();
        let mut handle = stderr.lock();

        writeln!(handle, "{}", self.header("Contributions"))?;
        for line in explain_lines(contributions) {
            writeln!(handle, "{}", line)?;
        }

        Ok(())
    }

    /// Writes every option of the schema, grouped by section.
    pub fn write_option_list(&self, schema: &Schema) -> Result<(), OutputError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();

        let mut section = None;
        for def in schema.options() {
            if section != Some(def.section) {
                if section.is_some() {
                    writeln!(handle)?;
                }
                writeln!(handle, "{}", self.header(def.section.title()))?;
                section = Some(def.section);
            }

            let name = if self.no_color {
                def.name.to_string()
            } else {
                def.name.bold().to_string()
            };
            writeln!(
                handle,
                "{}  {} [default: {}]",
                name,
                def.kind.describe(),
                def.default
            )?;
            writeln!(handle, "    {}: {}", def.label, def.help)?;
        }

        Ok(())
    }

    /// Writes the built-in recipes with their descriptions.
    pub fn write_recipe_list(&self, recipes: &[Recipe]) -> Result<(), OutputError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();

        writeln!(handle, "{}", self.header("Recipes"))?;
        let width = recipes.iter().map(|r| r.name.len()).max().unwrap_or(0);
        for recipe in recipes {
            writeln!(
                handle,
                "{:<width$}  {}",
                recipe.name,
                recipe.description,
                width = width
            )?;
        }

        Ok(())
    }

    fn header(&self, title: &str) -> String {
        let header = format!("----------- {} -----------", title);
        if self.no_color {
            header
        } else {
            header.cyan().bold().to_string()
        }
    }
}

/// One line per contributing option: label, name and tokens.
fn explain_lines(contributions: &[Contribution<'_>]) -> Vec<String> {
    let width = contributions
        .iter()
        .map(|c| c.option.label.len())
        .max()
        .unwrap_or(0);

    contributions
        .iter()
        .map(|c| {
            format!(
                "{:<width$}  {}  ({})",
                c.option.label,
                c.tokens.join(" "),
                c.option.name,
                width = width
            )
        })
        .collect()
}
