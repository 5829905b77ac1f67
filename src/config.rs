use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::error::TcgenError;
use crate::input::InputFile;
use crate::options::OptionError;
use crate::options_file::load_options_file;
use crate::recipes::{self, Recipe};
use crate::schema::OptionKind;
use crate::session::Session;

#[derive(Debug)]
pub struct Config {
    pub no_color: bool,
    pub verbose: bool,
    /// `--set` edits as (name, value), in command-line order.
    pub settings: Vec<(String, String)>,
    pub inputs: Vec<InputFile>,
    pub options_file: Option<PathBuf>,
    pub recipe: Option<&'static Recipe>,
    pub output_format: OutputFormat,
    pub output: Option<PathBuf>,
    pub explain: bool,
    pub list_options: bool,
    pub list_recipes: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, TcgenError> {
        let settings = cli
            .set
            .iter()
            .map(|spec| Self::parse_setting(spec))
            .collect::<Result<Vec<_>, _>>()?;

        let inputs = cli
            .inputs
            .iter()
            .map(|spec| Self::parse_input(spec))
            .collect::<Result<Vec<_>, _>>()?;

        let options_file = match cli.options_file {
            Some(path) => {
                let path = Self::resolve_path(&path)?;

                if !path.exists() {
                    return Err(TcgenError::Config(format!(
                        "Options file does not exist: {}",
                        path.display()
                    )));
                }

                if !path.is_file() {
                    return Err(TcgenError::Config(format!(
                        "Options file is not a file: {}",
                        path.display()
                    )));
                }

                Some(path)
            }
            None => None,
        };

        let recipe = match cli.recipe {
            Some(name) => Some(recipes::find(&name).ok_or_else(|| {
                TcgenError::Config(format!(
                    "Unknown recipe '{}' (available: {})",
                    name,
                    recipes::names()
                ))
            })?),
            None => None,
        };

        Ok(Self {
            no_color: cli.no_color,
            verbose: cli.verbose,
            settings,
            inputs,
            options_file,
            recipe,
            output_format: cli.output_format,
            output: cli.output,
            explain: cli.explain,
            list_options: cli.list_options,
            list_recipes: cli.list_recipes,
        })
    }

    /// Builds the session: recipe, then options file, then `--set`, then
    /// `--input`.
    pub fn session(&self) -> Result<Session, TcgenError> {
        let mut session = Session::tippecanoe()?;

        if let Some(recipe) = self.recipe {
            log::debug!("Applying recipe '{}'", recipe.name);
            recipe.apply(&mut session)?;
        }

        if let Some(path) = &self.options_file {
            load_options_file(path)?.apply(&mut session)?;
        }

        for (name, value) in &self.settings {
            apply_setting(&mut session, name, value)?;
        }

        for input in &self.inputs {
            session.push_input(input.clone());
        }

        Ok(session)
    }

    /// Resolves a path to an absolute path.
    /// - Absolute paths are returned as-is
    /// - Relative paths are resolved relative to current directory
    pub fn resolve_path(path: &Path) -> Result<PathBuf, TcgenError> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().map_err(|e| {
                TcgenError::Config(format!("Cannot determine current directory: {}", e))
            })?;
            Ok(current_dir.join(path))
        }
    }

    fn parse_setting(spec: &str) -> Result<(String, String), TcgenError> {
        match spec.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.to_string()))
            }
            _ => Err(TcgenError::Config(format!(
                "Invalid --set '{}': expected NAME=VALUE",
                spec
            ))),
        }
    }

    /// Splits `PATH[@LAYER]` at the last '@'. A suffix containing '.' or '/'
    /// belongs to the path, so `tiles@2x.geojson` has no layer.
    fn parse_input(spec: &str) -> Result<InputFile, TcgenError> {
        let (path, layer) = match spec.rsplit_once('@') {
            Some((path, layer)) if !layer.contains(['.', '/']) => (path, layer),
            _ => (spec, ""),
        };
        if path.trim().is_empty() {
            return Err(TcgenError::Config(format!(
                "Invalid --input '{}': missing path",
                spec
            )));
        }
        Ok(InputFile::new(path.trim(), layer.trim()))
    }
}

/// Applies one `--set`. List and multi-choice options grow by the given
/// entries instead of being replaced.
fn apply_setting(session: &mut Session, name: &str, value: &str) -> Result<(), OptionError> {
    let kind = session.schema().get(name).map(|def| def.kind.clone());

    match kind {
        Some(OptionKind::Lines) => session.append(name, value),
        Some(OptionKind::CommaList | OptionKind::MultiChoice(_)) => value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .try_for_each(|entry| session.append(name, entry)),
        _ => session.set_str(name, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli() -> Cli {
        Cli {
            no_color: false,
            verbose: false,
            set: Vec::new(),
            inputs: Vec::new(),
            options_file: None,
            recipe: None,
            output_format: OutputFormat::Plain,
            output: None,
            explain: false,
            list_options: false,
            list_recipes: false,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_cli_with_defaults() {
        let config = Config::from_cli(cli()).expect("Config creation should succeed");

        assert!(!config.no_color);
        assert!(!config.verbose);
        assert!(config.settings.is_empty());
        assert!(config.inputs.is_empty());
        assert!(config.options_file.is_none());
        assert!(config.recipe.is_none());
        assert_eq!(config.output_format, OutputFormat::Plain);

        let session = config.session().unwrap();
        assert_eq!(session.display(), "tippecanoe -o output.mbtiles -z14");
    }

    #[test]
    fn from_cli_parses_settings_and_inputs() {
        let mut cli = cli();
        cli.set = strings(&["zoom_mode=auto-detect", " name =a=b"]);
        cli.inputs = strings(&[
            "cities.geojson",
            "me@home/roads.geojson@roads",
            "x.csv@",
            "tiles@2x.geojson",
            "data@v1/a.csv",
        ]);

        let config = Config::from_cli(cli).unwrap();

        assert_eq!(
            config.settings,
            [
                ("zoom_mode".to_string(), "auto-detect".to_string()),
                ("name".to_string(), "a=b".to_string()),
            ]
        );
        assert_eq!(
            config.inputs,
            [
                InputFile::new("cities.geojson", ""),
                InputFile::new("me@home/roads.geojson", "roads"),
                InputFile::new("x.csv", ""),
                InputFile::new("tiles@2x.geojson", ""),
                InputFile::new("data@v1/a.csv", ""),
            ]
        );
    }

    #[test]
    fn from_cli_rejects_malformed_set() {
        for spec in ["zoom_mode", "=3"] {
            let mut cli = cli();
            cli.set = strings(&[spec]);

            let error_message = Config::from_cli(cli).unwrap_err().to_string();
            assert!(error_message.contains("expected NAME=VALUE"), "{}", spec);
        }
    }

    #[test]
    fn from_cli_rejects_input_without_path() {
        let mut cli = cli();
        cli.inputs = strings(&["@roads"]);

        let error_message = Config::from_cli(cli).unwrap_err().to_string();
        assert!(error_message.contains("missing path"));
    }

    #[test]
    fn from_cli_unknown_recipe_fails() {
        let mut cli = cli();
        cli.recipe = Some("rivers".to_string());

        let error_message = Config::from_cli(cli).unwrap_err().to_string();
        assert!(error_message.contains("Unknown recipe 'rivers'"));
        assert!(error_message.contains("railroads"));
    }

    #[test]
    fn from_cli_nonexistent_options_file_fails() {
        let mut cli = cli();
        cli.options_file = Some(PathBuf::from("/nonexistent/options.yaml"));

        let error_message = Config::from_cli(cli).unwrap_err().to_string();
        assert!(error_message.contains("does not exist"));
    }

    #[test]
    fn from_cli_directory_as_options_file_fails() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

        let mut cli = cli();
        cli.options_file = Some(temp_dir.path().to_path_buf());

        let error_message = Config::from_cli(cli).unwrap_err().to_string();
        assert!(error_message.contains("is not a file"));
    }

    #[test]
    fn session_applies_sources_in_precedence_order() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            "options:\n  output_file: from_file\n  drop_rate: 3\ninputs:\n  - file.geojson"
        )
        .unwrap();

        let mut cli = cli();
        cli.recipe = Some("railroads".to_string());
        cli.options_file = Some(file.path().to_path_buf());
        cli.set = strings(&["drop_rate=4"]);
        cli.inputs = strings(&["cli.geojson@cli"]);

        let session = Config::from_cli(cli).unwrap().session().unwrap();

        assert_eq!(
            session.display(),
            "tippecanoe -o from_file.mbtiles -zg -ae -as -r4.0 \
             ne_10m_railroads.geojson file.geojson -L cli:cli.geojson"
        );
    }

    #[test]
    fn session_appends_list_settings() {
        let mut cli = cli();
        cli.set = strings(&[
            "attribute_mode=include-only",
            "include_attributes=NAME",
            "include_attributes=POP_MAX",
            "drop_options=no-feature-limit,drop-densest-as-needed",
        ]);

        let session = Config::from_cli(cli).unwrap().session().unwrap();
        let display = session.display();

        assert!(display.contains("-as -pf"));
        assert!(display.contains("-y NAME -y POP_MAX"));
    }

    #[test]
    fn session_reports_invalid_setting() {
        let mut cli = cli();
        cli.set = strings(&["max_zoom=23"]);

        let error = Config::from_cli(cli).unwrap().session().unwrap_err();
        assert!(matches!(
            error,
            TcgenError::Option(OptionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn resolve_absolute_path_unchanged() {
        let absolute_path = PathBuf::from("/absolute/path/to/options.yaml");
        let result = Config::resolve_path(&absolute_path).expect("Resolution should succeed");
        assert_eq!(result, absolute_path);
    }

    #[test]
    fn resolve_relative_path_becomes_absolute() {
        let relative_path = PathBuf::from("relative/options.yaml");
        let result = Config::resolve_path(&relative_path).expect("Resolution should succeed");

        assert!(result.is_absolute());
        assert!(result.ends_with("relative/options.yaml"));
    }
}
