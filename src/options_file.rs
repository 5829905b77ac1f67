//! YAML options files.
//!
//! An options file stores a configuration that would otherwise be typed as a
//! list of `--set` and `--input` flags:
//!
//! ```yaml
//! options:
//!   output_file: cities
//!   zoom_mode: auto-detect
//!   include_attributes: [NAME, POP_MAX]
//! inputs:
//!   - cities.geojson
//!   - path: roads.geojson
//!     layer: roads
//! ```
//!
//! Scalars are parsed like command-line text; sequences replace the entries
//! of list and multi-choice options.

use std::fs;
use std::path::Path;

use saphyr::{LoadableYamlNode, Yaml};
use thiserror::Error;

use crate::input::InputFile;
use crate::options::OptionError;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum OptionsFileError {
    #[error("Cannot read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(String),

    #[error("Empty YAML document")]
    Empty,

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

/// Value given for one option in the file.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    Scalar(String),
    Entries(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsFile {
    /// Settings in file order.
    pub settings: Vec<(String, Setting)>,
    pub inputs: Vec<InputFile>,
}

impl OptionsFile {
    /// Applies settings then inputs to a session, stopping at the first
    /// rejected value.
    pub fn apply(&self, session: &mut Session) -> Result<(), OptionError> {
        for (name, setting) in &self.settings {
            match setting {
                Setting::Scalar(text) => session.set_str(name, text)?,
                Setting::Entries(entries) => session.set_entries(name, entries.clone())?,
            }
        }
        for input in &self.inputs {
            session.push_input(input.clone());
        }
        Ok(())
    }
}

/// Reads and parses an options file.
pub fn load_options_file(path: &Path) -> Result<OptionsFile, OptionsFileError> {
    let content = fs::read_to_string(path)?;
    log::debug!("Loaded options file {}", path.display());
    parse_options_file(&content)
}

/// Parses options file content.
///
/// # Errors
///
/// Returns an error if the YAML is invalid, empty, or not shaped like an
/// options file.
pub fn parse_options_file(content: &str) -> Result<OptionsFile, OptionsFileError> {
    let docs = Yaml::load_from_str(content).map_err(|e| OptionsFileError::Yaml(e.to_string()))?;

    let Some(doc) = docs.first() else {
        return Err(OptionsFileError::Empty);
    };
    if doc.is_null() {
        return Err(OptionsFileError::Empty);
    }

    let root = doc.as_mapping().ok_or_else(|| {
        OptionsFileError::InvalidStructure("Root document must be a mapping".to_string())
    })?;

    let mut file = OptionsFile::default();
    for (key, value) in root {
        match key.as_str() {
            Some("options") => file.settings = parse_settings(value)?,
            Some("inputs") => file.inputs = parse_inputs(value)?,
            Some(other) => {
                return Err(OptionsFileError::InvalidStructure(format!(
                    "Unknown top-level key '{}' (expected 'options' or 'inputs')",
                    other
                )));
            }
            None => {
                return Err(OptionsFileError::InvalidStructure(
                    "Top-level keys must be strings".to_string(),
                ));
            }
        }
    }

    Ok(file)
}

fn parse_settings(yaml: &Yaml) -> Result<Vec<(String, Setting)>, OptionsFileError> {
    if yaml.is_null() {
        return Ok(Vec::new());
    }
    let mapping = yaml.as_mapping().ok_or_else(|| {
        OptionsFileError::InvalidStructure("'options' must be a mapping".to_string())
    })?;

    let mut settings = Vec::new();
    for (key, value) in mapping {
        let name = key.as_str().ok_or_else(|| {
            OptionsFileError::InvalidStructure("Option names must be strings".to_string())
        })?;

        let setting = if let Some(items) = value.as_sequence() {
            let entries = items
                .iter()
                .map(|item: &Yaml| {
                    scalar_text(item).ok_or_else(|| {
                        OptionsFileError::InvalidStructure(format!(
                            "Entries of '{}' must be scalars",
                            name
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Setting::Entries(entries)
        } else if let Some(text) = scalar_text(value) {
            Setting::Scalar(text)
        } else {
            return Err(OptionsFileError::InvalidStructure(format!(
                "Option '{}' needs a scalar or a list",
                name
            )));
        };

        settings.push((name.to_string(), setting));
    }

    Ok(settings)
}

fn parse_inputs(yaml: &Yaml) -> Result<Vec<InputFile>, OptionsFileError> {
    if yaml.is_null() {
        return Ok(Vec::new());
    }
    let items = yaml.as_sequence().ok_or_else(|| {
        OptionsFileError::InvalidStructure("'inputs' must be a list".to_string())
    })?;

    items.iter().map(|item: &Yaml| parse_input(item)).collect()
}

fn parse_input(yaml: &Yaml) -> Result<InputFile, OptionsFileError> {
    if let Some(path) = yaml.as_str() {
        return Ok(InputFile::new(path, ""));
    }

    let mapping = yaml.as_mapping().ok_or_else(|| {
        OptionsFileError::InvalidStructure(
            "Each input must be a path or a mapping with 'path' and 'layer'".to_string(),
        )
    })?;

    let mut input = InputFile::default();
    for (key, value) in mapping {
        let text = scalar_text(value).unwrap_or_default();
        match key.as_str() {
            Some("path") => input.path = text,
            Some("layer") => input.layer = text,
            _ => {
                return Err(OptionsFileError::InvalidStructure(
                    "Input keys must be 'path' or 'layer'".to_string(),
                ));
            }
        }
    }

    if input.path.trim().is_empty() {
        return Err(OptionsFileError::InvalidStructure(
            "Input is missing a 'path'".to_string(),
        ));
    }
    Ok(input)
}

/// Text of a scalar node as it would be typed on the command line.
fn scalar_text(yaml: &Yaml) -> Option<String> {
    if let Some(text) = yaml.as_str() {
        return Some(text.to_string());
    }
    if let Some(flag) = yaml.as_bool() {
        return Some(flag.to_string());
    }
    if let Some(number) = yaml.as_integer() {
        return Some(number.to_string());
    }
    yaml.as_floating_point().map(|number| number.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn session() -> Session {
        Session::tippecanoe().expect("built-in schema is valid")
    }

    #[test]
    fn parse_full_file() {
        let yaml = r#"
options:
  output_file: cities
  zoom_mode: auto-detect
  drop_rate: 1.5
  extend_zooms: true
  include_attributes: [NAME, POP_MAX]
inputs:
  - cities.geojson
  - path: roads.geojson
    layer: roads
"#;
        let file = parse_options_file(yaml).unwrap();

        assert_eq!(file.settings.len(), 5);
        assert_eq!(
            file.settings[0],
            ("output_file".to_string(), Setting::Scalar("cities".to_string()))
        );
        assert_eq!(
            file.settings[3],
            ("extend_zooms".to_string(), Setting::Scalar("true".to_string()))
        );
        assert_eq!(
            file.settings[4].1,
            Setting::Entries(vec!["NAME".to_string(), "POP_MAX".to_string()])
        );
        assert_eq!(
            file.inputs,
            [
                InputFile::new("cities.geojson", ""),
                InputFile::new("roads.geojson", "roads"),
            ]
        );
    }

    #[test]
    fn apply_to_session() {
        let yaml = r#"
options:
  output_file: cities
  zoom_mode: auto-detect
  max_zoom: 10
  drop_options: [drop-densest-as-needed]
inputs:
  - cities.geojson
"#;
        let mut session = session();
        parse_options_file(yaml).unwrap().apply(&mut session).unwrap();

        assert_eq!(
            session.display(),
            "tippecanoe -o cities.mbtiles -zg -as cities.geojson"
        );
    }

    #[test]
    fn apply_rejects_invalid_values() {
        let yaml = "options:\n  max_zoom: 40\n";
        let mut session = session();
        let err = parse_options_file(yaml)
            .unwrap()
            .apply(&mut session)
            .unwrap_err();
        assert!(matches!(err, OptionError::OutOfRange { .. }));
    }

    #[test]
    fn empty_document_rejected() {
        assert!(matches!(
            parse_options_file(""),
            Err(OptionsFileError::Empty)
        ));
    }

    #[test]
    fn root_must_be_mapping() {
        assert!(matches!(
            parse_options_file("- cities.geojson\n"),
            Err(OptionsFileError::InvalidStructure(_))
        ));
    }

    #[test]
    fn unknown_top_level_key_rejected() {
        let err = parse_options_file("settings:\n  max_zoom: 3\n").unwrap_err();
        assert!(err.to_string().contains("'settings'"));
    }

    #[test]
    fn nested_option_value_rejected() {
        let yaml = "options:\n  output_file:\n    name: cities\n";
        assert!(matches!(
            parse_options_file(yaml),
            Err(OptionsFileError::InvalidStructure(_))
        ));
    }

    #[test]
    fn input_without_path_rejected() {
        let yaml = "inputs:\n  - layer: roads\n";
        let err = parse_options_file(yaml).unwrap_err();
        assert!(err.to_string().contains("missing a 'path'"));
    }

    #[test]
    fn invalid_yaml_rejected() {
        assert!(matches!(
            parse_options_file("options: [unclosed"),
            Err(OptionsFileError::Yaml(_))
        ));
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "options:\n  name: Cities").unwrap();

        let loaded = load_options_file(file.path()).unwrap();
        assert_eq!(
            loaded.settings,
            [("name".to_string(), Setting::Scalar("Cities".to_string()))]
        );
    }

    #[test]
    fn load_missing_file_fails() {
        let err = load_options_file(Path::new("/nonexistent/options.yaml")).unwrap_err();
        assert!(matches!(err, OptionsFileError::Io(_)));
    }
}
