//! Compiles an option set and input files into command-line tokens.
//!
//! Compilation is a pure function of the schema, the current `OptionSet`
//! and the input file list. Every option contributes zero or more tokens, in
//! schema order, followed by one token (or token pair) per input file. Nothing
//! here can fail: absent or mismatched values fall back to schema defaults and
//! blank entries are skipped.

pub mod quote;
pub mod sanitize;

use std::fmt;

use crate::input::InputFile;
use crate::options::OptionSet;
use crate::schema::{EmitWhen, FlagTemplate, OptionDef, Quoting, Schema, Value};
use sanitize::{entries, format_number, normalize_filename};

/// Flag introducing a custom layer name for one input file.
pub const LAYER_FLAG: &str = "-L";

/// A compiled command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    tokens: Vec<String>,
}

impl Command {
    /// All tokens, program name first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn program(&self) -> &str {
        self.tokens.first().map(|t| t.as_str()).unwrap_or_default()
    }

    /// Tokens after the program name.
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    /// The tokens joined with single spaces.
    pub fn display(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Tokens contributed by one option.
#[derive(Debug, Clone)]
pub struct Contribution<'s> {
    pub option: &'s OptionDef,
    pub tokens: Vec<String>,
}

/// Compiles commands for one schema.
pub struct Compiler<'s> {
    schema: &'s Schema,
}

impl<'s> Compiler<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Compiles the full command: program, option tokens, input files.
    pub fn compile(&self, options: &OptionSet, inputs: &[InputFile]) -> Command {
        let mut tokens = vec![self.schema.program().to_string()];
        tokens.extend(
            self.contributions(options)
                .into_iter()
                .flat_map(|contribution| contribution.tokens),
        );
        tokens.extend(input_tokens(inputs));

        Command { tokens }
    }

    /// Per-option token contributions in rendering order.
    ///
    /// Options that are disabled, suppressed, or render to nothing are left
    /// out.
    pub fn contributions(&self, options: &OptionSet) -> Vec<Contribution<'s>> {
        self.schema
            .options()
            .iter()
            .filter(|def| self.schema.is_enabled(def, options))
            .filter_map(|def| {
                let value = self.effective_value(def, options);
                if !Self::should_emit(def, value) {
                    return None;
                }
                let tokens = self.render(def, value, options);
                (!tokens.is_empty()).then_some(Contribution {
                    option: def,
                    tokens,
                })
            })
            .collect()
    }

    /// The value used for rendering. Structural options never render blank
    /// text; they use their default instead.
    fn effective_value<'a>(&'a self, def: &'a OptionDef, options: &'a OptionSet) -> &'a Value {
        let value = self.schema.resolve(def, options);
        if def.emit_when == EmitWhen::Always && value.is_blank() {
            &def.default
        } else {
            value
        }
    }

    fn should_emit(def: &OptionDef, value: &Value) -> bool {
        match def.emit_when {
            EmitWhen::Always => true,
            EmitWhen::NotDefault => *value != def.default,
            EmitWhen::NonEmpty => !value.is_blank(),
        }
    }

    fn render(&self, def: &OptionDef, value: &Value, options: &OptionSet) -> Vec<String> {
        match (&def.template, value) {
            (FlagTemplate::Silent, _) => Vec::new(),
            (FlagTemplate::Switch(flag), Value::Bool(true)) => vec![flag.to_string()],
            (FlagTemplate::Switch(_), _) => Vec::new(),
            (FlagTemplate::Attached(flag), value) => scalar_text(value)
                .map(|text| vec![format!("{}{}", flag, Quoting::IfNeeded.apply(&text))])
                .unwrap_or_default(),
            (FlagTemplate::Separate(flag, quoting), value) => scalar_text(value)
                .map(|text| vec![flag.to_string(), quoting.apply(&text)])
                .unwrap_or_default(),
            (FlagTemplate::PerChoice(table), Value::Choice(choice)) => table
                .iter()
                .find(|(c, _)| *c == choice.as_str())
                .map(|(_, tokens)| tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>())
                .unwrap_or_default(),
            (FlagTemplate::PerMember(table), Value::Set(members)) => table
                .iter()
                .filter(|(member, _)| members.iter().any(|m| m.as_str() == *member))
                .map(|(_, flag)| flag.to_string())
                .collect(),
            (FlagTemplate::EachAttached(flag), Value::List(list)) => entries(list)
                .map(|entry| format!("{}{}", flag, Quoting::IfNeeded.apply(entry)))
                .collect(),
            (FlagTemplate::EachSeparate(flag, quoting), Value::List(list)) => entries(list)
                .flat_map(|entry| [flag.to_string(), quoting.apply(entry)])
                .collect(),
            (
                FlagTemplate::TargetFile {
                    flag,
                    selector,
                    extensions,
                },
                Value::Text(name),
            ) => {
                let Some(Value::Choice(selected)) = self
                    .schema
                    .get(selector)
                    .map(|selector| self.schema.resolve(selector, options))
                else {
                    return Vec::new();
                };
                let recognized: Vec<&str> = extensions.iter().map(|(_, ext)| *ext).collect();
                extensions
                    .iter()
                    .find(|(choice, _)| *choice == selected.as_str())
                    .map(|(_, ext)| {
                        let filename = normalize_filename(name, ext, &recognized);
                        vec![flag.to_string(), Quoting::IfNeeded.apply(&filename)]
                    })
                    .unwrap_or_default()
            }
            _ => Vec::new(),
        }
    }
}

/// Compiles a command with the given schema.
pub fn compile(schema: &Schema, options: &OptionSet, inputs: &[InputFile]) -> Command {
    Compiler::new(schema).compile(options, inputs)
}

/// Renders input files in order: `path`, or `-L layer:path` when a layer
/// name is given. Entries with a blank path are skipped.
pub fn input_tokens(inputs: &[InputFile]) -> Vec<String> {
    let mut tokens = Vec::new();
    for input in inputs {
        let path = input.path.trim();
        let layer = input.layer.trim();

        if path.is_empty() {
            continue;
        }

        if layer.is_empty() {
            tokens.push(Quoting::IfNeeded.apply(path));
        } else {
            tokens.push(LAYER_FLAG.to_string());
            tokens.push(Quoting::IfNeeded.apply(&format!("{}:{}", layer, path)));
        }
    }
    tokens
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Int(i) => Some(i.to_string()),
        Value::Float(x) => Some(format_number(*x)),
        Value::Choice(c) => Some(c.clone()),
        Value::Text(t) => Some(t.trim().to_string()),
        Value::Bool(_) | Value::Set(_) | Value::List(_) => None,
    }
}
