//! One interactive editing session.
//!
//! A `Session` is what a form front end talks to: it owns the schema, the
//! live `OptionSet` and the input file list, applies single-field edits, and
//! hands back the compiled command. Nothing is persisted; dropping the session
//! discards the configuration.

use crate::compiler::{Command, Compiler, Contribution};
use crate::input::{InputError, InputFile, InputFiles};
use crate::lint::{self, Lint};
use crate::options::{OptionError, OptionSet};
use crate::schema::{Schema, SchemaError, Value};

#[derive(Debug)]
pub struct Session {
    schema: Schema,
    options: OptionSet,
    inputs: InputFiles,
}

impl Session {
    /// Starts a session with every option at its default and one blank input.
    pub fn new(schema: Schema) -> Self {
        let options = OptionSet::defaults(&schema);
        Self {
            schema,
            options,
            inputs: InputFiles::new(),
        }
    }

    /// Starts a session on the built-in Tippecanoe schema.
    pub fn tippecanoe() -> Result<Self, SchemaError> {
        Ok(Self::new(Schema::tippecanoe()?))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn inputs(&self) -> &[InputFile] {
        self.inputs.as_slice()
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<(), OptionError> {
        self.options.set(&self.schema, name, value)
    }

    pub fn set_str(&mut self, name: &str, text: &str) -> Result<(), OptionError> {
        self.options.set_str(&self.schema, name, text)
    }

    pub fn set_entries(&mut self, name: &str, entries: Vec<String>) -> Result<(), OptionError> {
        self.options.set_entries(&self.schema, name, entries)
    }

    pub fn append(&mut self, name: &str, entry: &str) -> Result<(), OptionError> {
        self.options.append(&self.schema, name, entry)
    }

    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.options.unset(name)
    }

    /// Appends a blank input entry and returns its position.
    pub fn add_input(&mut self) -> usize {
        self.inputs.add()
    }

    /// Adds a filled-in input, reusing the initial blank entry if untouched.
    pub fn push_input(&mut self, file: InputFile) -> usize {
        self.inputs.push(file)
    }

    pub fn remove_input(&mut self, index: usize) -> Result<InputFile, InputError> {
        self.inputs.remove(index)
    }

    pub fn set_input_path(&mut self, index: usize, path: &str) -> Result<(), InputError> {
        self.inputs.set_path(index, path)
    }

    pub fn set_input_layer(&mut self, index: usize, layer: &str) -> Result<(), InputError> {
        self.inputs.set_layer(index, layer)
    }

    /// Compiles the current state.
    pub fn command(&self) -> Command {
        Compiler::new(&self.schema).compile(&self.options, self.inputs.as_slice())
    }

    /// The compiled command as one display string.
    pub fn display(&self) -> String {
        self.command().display()
    }

    pub fn contributions(&self) -> Vec<Contribution<'_>> {
        Compiler::new(&self.schema).contributions(&self.options)
    }

    /// Advisory findings about the current state. Never blocks compilation.
    pub fn lints(&self) -> Vec<Lint> {
        lint::check(&self.schema, &self.options, self.inputs.as_slice())
    }
}
