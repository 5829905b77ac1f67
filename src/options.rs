//! The live option values of one session.
//!
//! An `OptionSet` starts with every schema option at its default and is then
//! edited one field at a time. All kind, bound and choice checks happen here,
//! at the input-collection boundary, so the compiler never has to reject a
//! value.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::schema::{OptionKind, Schema, Value};

/// Errors raised when a caller supplies an invalid option value.
#[derive(Debug, Error, PartialEq)]
pub enum OptionError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Option '{option}' expects {expected}")]
    KindMismatch { option: String, expected: String },

    #[error("Value {value} for '{option}' is out of range (expected {expected})")]
    OutOfRange {
        option: String,
        value: String,
        expected: String,
    },

    #[error("Unknown choice '{choice}' for '{option}' (expected one of: {expected})")]
    UnknownChoice {
        option: String,
        choice: String,
        expected: String,
    },

    #[error("Cannot parse '{text}' for '{option}' as {expected}")]
    Unparsable {
        option: String,
        text: String,
        expected: String,
    },
}

/// Current value of every option, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    values: BTreeMap<&'static str, Value>,
}

impl OptionSet {
    /// Creates a set holding the default of every option in `schema`.
    pub fn defaults(schema: &Schema) -> Self {
        let values = schema
            .options()
            .iter()
            .map(|def| (def.name, def.default.clone()))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Sets an option after checking the value against its kind.
    ///
    /// # Errors
    ///
    /// Returns an `OptionError` if the option is unknown, the value has the
    /// wrong kind, or it is outside the option's bounds or choices. The set is
    /// left unchanged on error.
    pub fn set(&mut self, schema: &Schema, name: &str, value: Value) -> Result<(), OptionError> {
        let def = schema
            .get(name)
            .ok_or_else(|| OptionError::UnknownOption(name.to_string()))?;
        def.kind.check(def.name, &value)?;

        log::debug!("Set {} = {}", def.name, value);
        self.values.insert(def.name, value);
        Ok(())
    }

    /// Parses `text` according to the option's kind and sets it.
    pub fn set_str(&mut self, schema: &Schema, name: &str, text: &str) -> Result<(), OptionError> {
        let def = schema
            .get(name)
            .ok_or_else(|| OptionError::UnknownOption(name.to_string()))?;
        let value = def.kind.parse(def.name, text)?;
        self.set(schema, name, value)
    }

    /// Replaces the entries of a list or multi-choice option.
    pub fn set_entries(
        &mut self,
        schema: &Schema,
        name: &str,
        entries: Vec<String>,
    ) -> Result<(), OptionError> {
        let def = schema
            .get(name)
            .ok_or_else(|| OptionError::UnknownOption(name.to_string()))?;

        let value = match def.kind {
            OptionKind::Lines | OptionKind::CommaList => Value::List(entries),
            OptionKind::MultiChoice(_) => Value::Set(entries),
            _ => {
                return Err(OptionError::KindMismatch {
                    option: def.name.to_string(),
                    expected: def.kind.describe(),
                });
            }
        };
        self.set(schema, name, value)
    }

    /// Appends one entry to a list option, or one member to a multi-choice
    /// option.
    pub fn append(&mut self, schema: &Schema, name: &str, entry: &str) -> Result<(), OptionError> {
        let def = schema
            .get(name)
            .ok_or_else(|| OptionError::UnknownOption(name.to_string()))?;

        let mut entries = match schema.resolve(def, self) {
            Value::List(entries) | Value::Set(entries) => entries.clone(),
            _ => {
                return Err(OptionError::KindMismatch {
                    option: def.name.to_string(),
                    expected: def.kind.describe(),
                });
            }
        };

        if matches!(def.kind, OptionKind::MultiChoice(_)) {
            let member = entry.trim().to_string();
            if !entries.contains(&member) {
                entries.push(member);
            }
        } else {
            entries.push(entry.to_string());
        }

        self.set_entries(schema, name, entries)
    }

    /// Removes an option's value. The compiler then uses the schema default.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Stores a value without any schema checks.
    pub(crate) fn insert_unchecked(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}
