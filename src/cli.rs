use std::path::PathBuf;

use clap::Parser;

/// Tippecanoe Command Generator
///
/// Builds a tippecanoe command line from named options, input files, optional
/// YAML options files and built-in recipes. The command is printed, never run.
///
/// Later sources win: a recipe is applied first, then the options file, then
/// each --set, and finally each --input.
#[derive(Parser, Debug)]
#[command(name = "tcgen")]
#[command(version)]
#[command(about, long_about)]
pub struct Cli {
    /// Suppress colored output (useful for CI/CD pipelines)
    #[arg(short = 'n', long = "no-color")]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Set an option, e.g. -s zoom_mode=auto-detect; list options append one entry per use
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Add an input file, optionally with a layer name after the last '@'.
    /// A suffix containing '.' or '/' is part of the path (tiles@2x.geojson has no layer)
    #[arg(short = 'i', long = "input", value_name = "PATH[@LAYER]")]
    pub inputs: Vec<String>,

    /// YAML file with an 'options' mapping and an 'inputs' list
    #[arg(short = 'c', long = "options-file", value_name = "FILE")]
    pub options_file: Option<PathBuf>,

    /// Start from a built-in recipe (see --list-recipes)
    #[arg(short = 'r', long = "recipe", value_name = "NAME")]
    pub recipe: Option<String>,

    /// Output format: plain, json, script
    #[arg(short = 'f', long = "output-format", default_value = "plain")]
    pub output_format: OutputFormat,

    /// Write the command to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print which tokens each option contributes to stderr
    #[arg(long = "explain")]
    pub explain: bool,

    /// List all options with their kinds and defaults
    #[arg(long = "list-options")]
    pub list_options: bool,

    /// List the built-in recipes
    #[arg(long = "list-recipes")]
    pub list_recipes: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
    Script,
}
