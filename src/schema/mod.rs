//! Option schema for the command compiler.
//!
//! A schema is the closed set of options a command understands: their kinds,
//! defaults, the tokens they render to and the conditions under which they
//! contribute. Schemas are validated once when constructed, so that the
//! compiler can treat every name lookup as infallible. A schema that fails
//! validation is a programming error in the option table, never a user error.

pub mod template;
pub mod tippecanoe;
pub mod value;

pub use template::{Condition, EmitWhen, FlagTemplate, Quoting};
pub use value::{OptionKind, Value};

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::options::OptionSet;

/// Errors found while validating a schema.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Duplicate option: {0}")]
    DuplicateOption(String),

    #[error("'{owner}' references unknown option '{referenced}'")]
    UnknownReference { owner: String, referenced: String },

    #[error("'{owner}' references unknown choice '{choice}' of '{referenced}'")]
    UnknownChoice {
        owner: String,
        referenced: String,
        choice: String,
    },

    #[error("'{owner}' uses '{referenced}' in a way its kind does not support")]
    ReferenceKind { owner: String, referenced: String },

    #[error("Option '{0}' is enabled by a condition on itself")]
    SelfReference(String),

    #[error("Option '{0}' is declared out of section order")]
    SectionOrder(String),

    #[error("Invalid default for '{option}': {reason}")]
    InvalidDefault { option: String, reason: String },

    #[error("Flag template of '{option}' does not fit its kind: {reason}")]
    TemplateMismatch { option: String, reason: String },

    #[error("Exclusive group '{group}' does not map choice '{choice}' exactly once")]
    GroupCoverage { group: String, choice: String },

    #[error("Exclusive group '{group}' has {active} active members when '{choice}' is selected")]
    GroupActivity {
        group: String,
        choice: String,
        active: usize,
    },
}

/// Command-line section an option renders into.
///
/// Sections are rendered in declaration order; input files always follow the
/// last section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Output,
    Metadata,
    Zoom,
    Detail,
    Features,
    Attributes,
    Advanced,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Output => "Output",
            Section::Metadata => "Metadata",
            Section::Zoom => "Zoom",
            Section::Detail => "Detail",
            Section::Features => "Feature Handling",
            Section::Attributes => "Attributes",
            Section::Advanced => "Advanced",
        }
    }
}

/// Definition of a single option.
#[derive(Debug, Clone)]
pub struct OptionDef {
    pub name: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub section: Section,
    pub kind: OptionKind,
    pub default: Value,
    pub template: FlagTemplate,
    pub enabled_when: Condition,
    pub emit_when: EmitWhen,
}

impl OptionDef {
    /// Creates a silent option that is always enabled and renders only when
    /// changed from its default.
    pub fn new(name: &'static str, section: Section, kind: OptionKind, default: Value) -> Self {
        Self {
            name,
            label: name,
            help: "",
            section,
            kind,
            default,
            template: FlagTemplate::Silent,
            enabled_when: Condition::Always,
            emit_when: EmitWhen::NotDefault,
        }
    }

    /// Shorthand for a boolean option rendering a bare flag when set.
    pub fn switch(name: &'static str, section: Section, flag: &'static str) -> Self {
        Self::new(name, section, OptionKind::Bool, Value::Bool(false))
            .template(FlagTemplate::Switch(flag))
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    pub fn template(mut self, template: FlagTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn enabled_when(mut self, condition: Condition) -> Self {
        self.enabled_when = condition;
        self
    }

    pub fn emit_when(mut self, emit_when: EmitWhen) -> Self {
        self.emit_when = emit_when;
        self
    }

    /// Marks the option as structural: exempt from default suppression.
    pub fn structural(self) -> Self {
        self.emit_when(EmitWhen::Always)
    }
}

/// A set of options of which exactly one is active for every choice of the
/// selector.
///
/// A member of `None` means the selector's own tokens are the active member
/// for that choice (e.g. an auto-detect flag).
#[derive(Debug, Clone)]
pub struct ExclusiveGroup {
    pub name: &'static str,
    pub selector: &'static str,
    pub members: &'static [(&'static str, Option<&'static str>)],
}

/// A validated option schema.
#[derive(Debug, Clone)]
pub struct Schema {
    program: &'static str,
    options: Vec<OptionDef>,
    groups: Vec<ExclusiveGroup>,
    index: HashMap<&'static str, usize>,
}

impl Schema {
    /// Builds and validates a schema.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if a condition, template or group references an
    /// unknown option or choice, if a default does not fit its kind, if
    /// options are declared out of section order, or if an exclusive group
    /// does not have exactly one active member for each selector choice.
    pub fn new(
        program: &'static str,
        options: Vec<OptionDef>,
        groups: Vec<ExclusiveGroup>,
    ) -> Result<Self, SchemaError> {
        let mut index = HashMap::new();
        for (position, def) in options.iter().enumerate() {
            if index.insert(def.name, position).is_some() {
                return Err(SchemaError::DuplicateOption(def.name.to_string()));
            }
        }

        let schema = Self {
            program,
            options,
            groups,
            index,
        };
        schema.validate()?;

        log::debug!(
            "Schema for '{}' validated: {} options, {} exclusive groups",
            schema.program,
            schema.options.len(),
            schema.groups.len()
        );

        Ok(schema)
    }

    /// The built-in Tippecanoe schema.
    pub fn tippecanoe() -> Result<Self, SchemaError> {
        tippecanoe::schema()
    }

    pub fn program(&self) -> &'static str {
        self.program
    }

    /// Option definitions in rendering order.
    pub fn options(&self) -> &[OptionDef] {
        &self.options
    }

    pub fn groups(&self) -> &[ExclusiveGroup] {
        &self.groups
    }

    pub fn get(&self, name: &str) -> Option<&OptionDef> {
        self.index.get(name).map(|&position| &self.options[position])
    }

    /// Returns the value the compiler sees for `def`.
    ///
    /// Absent values and values of the wrong variant fall back to the default.
    pub fn resolve<'a>(&'a self, def: &'a OptionDef, options: &'a OptionSet) -> &'a Value {
        match options.get(def.name) {
            Some(value) if def.kind.accepts(value) => value,
            _ => &def.default,
        }
    }

    /// Evaluates the option's `enabled_when` condition.
    pub fn is_enabled(&self, def: &OptionDef, options: &OptionSet) -> bool {
        self.holds(&def.enabled_when, options)
    }

    /// Evaluates a condition against the current option values.
    pub fn holds(&self, condition: &Condition, options: &OptionSet) -> bool {
        let value = |name: &str| self.get(name).map(|def| self.resolve(def, options));

        match *condition {
            Condition::Always => true,
            Condition::Is(name, choice) => {
                matches!(value(name), Some(Value::Choice(c)) if c == choice)
            }
            Condition::IsNot(name, choice) => {
                matches!(value(name), Some(Value::Choice(c)) if c != choice)
            }
            Condition::Flag(name, expected) => {
                matches!(value(name), Some(Value::Bool(b)) if *b == expected)
            }
        }
    }

    fn validate(&self) -> Result<(), SchemaError> {
        let mut previous = None;
        for def in &self.options {
            if previous.is_some_and(|section| def.section < section) {
                return Err(SchemaError::SectionOrder(def.name.to_string()));
            }
            previous = Some(def.section);

            def.kind
                .check(def.name, &def.default)
                .map_err(|e| SchemaError::InvalidDefault {
                    option: def.name.to_string(),
                    reason: e.to_string(),
                })?;

            self.validate_condition(def)?;
            self.validate_template(def)?;
        }

        for group in &self.groups {
            self.validate_group(group)?;
        }

        Ok(())
    }

    fn validate_condition(&self, def: &OptionDef) -> Result<(), SchemaError> {
        let Some(referenced) = def.enabled_when.referenced() else {
            return Ok(());
        };

        if referenced == def.name {
            return Err(SchemaError::SelfReference(def.name.to_string()));
        }

        let target = self.lookup(def.name, referenced)?;
        match (def.enabled_when, &target.kind) {
            (Condition::Is(_, choice) | Condition::IsNot(_, choice), OptionKind::Choice(choices)) => {
                self.expect_choice(def.name, target, choices, choice)
            }
            (Condition::Flag(_, _), OptionKind::Bool) => Ok(()),
            _ => Err(SchemaError::ReferenceKind {
                owner: def.name.to_string(),
                referenced: referenced.to_string(),
            }),
        }
    }

    fn validate_template(&self, def: &OptionDef) -> Result<(), SchemaError> {
        let mismatch = |reason: &str| SchemaError::TemplateMismatch {
            option: def.name.to_string(),
            reason: reason.to_string(),
        };

        match (&def.template, &def.kind) {
            (FlagTemplate::Silent, _) => Ok(()),
            (FlagTemplate::Switch(_), OptionKind::Bool) => Ok(()),
            (FlagTemplate::Switch(_), _) => Err(mismatch("switches need a bool")),
            (
                FlagTemplate::Attached(_) | FlagTemplate::Separate(_, _),
                OptionKind::Integer { .. }
                | OptionKind::Float { .. }
                | OptionKind::Choice(_)
                | OptionKind::Text,
            ) => Ok(()),
            (FlagTemplate::Attached(_) | FlagTemplate::Separate(_, _), _) => {
                Err(mismatch("value flags need a scalar"))
            }
            (FlagTemplate::PerChoice(table), OptionKind::Choice(choices)) => table
                .iter()
                .try_for_each(|(choice, _)| self.expect_choice(def.name, def, choices, choice)),
            (FlagTemplate::PerChoice(_), _) => Err(mismatch("choice tokens need a single choice")),
            (FlagTemplate::PerMember(table), OptionKind::MultiChoice(choices)) => table
                .iter()
                .try_for_each(|(member, _)| self.expect_choice(def.name, def, choices, member)),
            (FlagTemplate::PerMember(_), _) => Err(mismatch("member flags need a multi choice")),
            (FlagTemplate::EachAttached(_) | FlagTemplate::EachSeparate(_, _), kind)
                if kind.is_list() =>
            {
                Ok(())
            }
            (FlagTemplate::EachAttached(_) | FlagTemplate::EachSeparate(_, _), _) => {
                Err(mismatch("per-entry flags need a list"))
            }
            (
                FlagTemplate::TargetFile {
                    selector,
                    extensions,
                    ..
                },
                OptionKind::Text,
            ) => {
                let target = self.lookup(def.name, selector)?;
                let OptionKind::Choice(choices) = &target.kind else {
                    return Err(SchemaError::ReferenceKind {
                        owner: def.name.to_string(),
                        referenced: selector.to_string(),
                    });
                };
                extensions
                    .iter()
                    .try_for_each(|(choice, _)| self.expect_choice(def.name, target, choices, choice))
            }
            (FlagTemplate::TargetFile { .. }, _) => Err(mismatch("target files need text")),
        }
    }

    fn validate_group(&self, group: &ExclusiveGroup) -> Result<(), SchemaError> {
        let selector = self.lookup(group.name, group.selector)?;
        let OptionKind::Choice(choices) = &selector.kind else {
            return Err(SchemaError::ReferenceKind {
                owner: group.name.to_string(),
                referenced: group.selector.to_string(),
            });
        };

        for (choice, member) in group.members {
            self.expect_choice(group.name, selector, choices, choice)?;
            if let Some(member) = member {
                self.lookup(group.name, member)?;
            }
        }

        let members: HashSet<&str> = group.members.iter().filter_map(|(_, m)| *m).collect();

        for choice in *choices {
            let mapped: Vec<_> = group
                .members
                .iter()
                .filter(|(c, _)| c == choice)
                .map(|(_, member)| *member)
                .collect();
            let [expected] = mapped.as_slice() else {
                return Err(SchemaError::GroupCoverage {
                    group: group.name.to_string(),
                    choice: choice.to_string(),
                });
            };

            let mut trial = OptionSet::defaults(self);
            trial.insert_unchecked(selector.name, Value::choice(choice));

            let active: Vec<&str> = members
                .iter()
                .copied()
                .filter(|name| {
                    self.get(name)
                        .is_some_and(|def| self.is_enabled(def, &trial))
                })
                .collect();

            let selector_renders = match &selector.template {
                FlagTemplate::PerChoice(table) => table
                    .iter()
                    .any(|(c, tokens)| c == choice && !tokens.is_empty()),
                _ => false,
            };

            let consistent = match expected {
                Some(member) => active == [*member] && !selector_renders,
                None => active.is_empty() && selector_renders,
            };

            if !consistent {
                return Err(SchemaError::GroupActivity {
                    group: group.name.to_string(),
                    choice: choice.to_string(),
                    active: active.len() + usize::from(selector_renders),
                });
            }
        }

        Ok(())
    }

    fn lookup(&self, owner: &str, referenced: &str) -> Result<&OptionDef, SchemaError> {
        self.get(referenced)
            .ok_or_else(|| SchemaError::UnknownReference {
                owner: owner.to_string(),
                referenced: referenced.to_string(),
            })
    }

    fn expect_choice(
        &self,
        owner: &str,
        target: &OptionDef,
        choices: &[&str],
        choice: &str,
    ) -> Result<(), SchemaError> {
        if choices.contains(&choice) {
            Ok(())
        } else {
            Err(SchemaError::UnknownChoice {
                owner: owner.to_string(),
                referenced: target.name.to_string(),
                choice: choice.to_string(),
            })
        }
    }
}
