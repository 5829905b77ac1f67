//! Option kinds and the values they hold.
//!
//! Every option in a schema declares an [`OptionKind`]. Values arriving from
//! the input-collection layer (CLI flags, options files, a form) are parsed
//! and checked against that kind before they ever reach an `OptionSet`.

use std::fmt;

use crate::compiler::sanitize::{format_number, split_entries};
use crate::options::OptionError;

/// The type of a single option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
    /// A checkbox.
    Bool,
    /// A whole number within inclusive bounds.
    Integer { min: i64, max: i64 },
    /// A decimal number within inclusive bounds.
    Float { min: f64, max: f64 },
    /// Exactly one of a fixed list of choices.
    Choice(&'static [&'static str]),
    /// Any subset of a fixed list of choices.
    MultiChoice(&'static [&'static str]),
    /// Free single-line text.
    Text,
    /// Multi-line text, one entry per line.
    Lines,
    /// Single-line text, one entry per comma-separated item.
    CommaList,
}

/// A value held by an option.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Choice(String),
    Set(Vec<String>),
    Text(String),
    List(Vec<String>),
}

impl Value {
    pub fn choice(choice: &str) -> Self {
        Value::Choice(choice.to_string())
    }

    pub fn text(text: &str) -> Self {
        Value::Text(text.to_string())
    }

    pub fn list(entries: &[&str]) -> Self {
        Value::List(entries.iter().map(|e| e.to_string()).collect())
    }

    pub fn set(members: &[&str]) -> Self {
        Value::Set(members.iter().map(|m| m.to_string()).collect())
    }

    /// Returns true if the value carries nothing worth rendering.
    ///
    /// Text is blank when it is empty after trimming, lists when every entry
    /// is, and sets when they have no members. Scalars are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Text(text) => text.trim().is_empty(),
            Value::List(entries) => entries.iter().all(|e| e.trim().is_empty()),
            Value::Set(members) => members.is_empty(),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Choice(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", format_number(*x)),
            Value::Choice(c) => write!(f, "{}", c),
            Value::Text(t) if t.is_empty() => write!(f, "\"\""),
            Value::Text(t) => write!(f, "{}", t),
            Value::Set(items) | Value::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl OptionKind {
    /// Short human-readable description of the accepted values.
    pub fn describe(&self) -> String {
        match self {
            OptionKind::Bool => "bool".to_string(),
            OptionKind::Integer { min, max } if *max == i64::MAX => {
                format!("integer >= {}", min)
            }
            OptionKind::Integer { min, max } => format!("integer {}..{}", min, max),
            OptionKind::Float { min, max } if max.is_infinite() => {
                format!("number >= {}", format_number(*min))
            }
            OptionKind::Float { min, max } => {
                format!("number {}..{}", format_number(*min), format_number(*max))
            }
            OptionKind::Choice(choices) => format!("one of {}", choices.join("|")),
            OptionKind::MultiChoice(choices) => format!("any of {}", choices.join(",")),
            OptionKind::Text => "text".to_string(),
            OptionKind::Lines => "lines".to_string(),
            OptionKind::CommaList => "comma-separated list".to_string(),
        }
    }

    /// Returns true if `value` is the variant this kind stores.
    ///
    /// Bounds and choice membership are not considered; see [`Self::check`].
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (OptionKind::Bool, Value::Bool(_))
                | (OptionKind::Integer { .. }, Value::Int(_))
                | (OptionKind::Float { .. }, Value::Float(_))
                | (OptionKind::Choice(_), Value::Choice(_))
                | (OptionKind::MultiChoice(_), Value::Set(_))
                | (OptionKind::Text, Value::Text(_))
                | (OptionKind::Lines | OptionKind::CommaList, Value::List(_))
        )
    }

    /// Returns true for the kinds whose value is an ordered list of entries.
    pub fn is_list(&self) -> bool {
        matches!(self, OptionKind::Lines | OptionKind::CommaList)
    }

    /// Checks variant, bounds and choice membership of `value`.
    pub fn check(&self, option: &str, value: &Value) -> Result<(), OptionError> {
        if !self.accepts(value) {
            return Err(OptionError::KindMismatch {
                option: option.to_string(),
                expected: self.describe(),
            });
        }

        match (self, value) {
            (OptionKind::Integer { min, max }, Value::Int(v)) if !(*min..=*max).contains(v) => {
                Err(OptionError::OutOfRange {
                    option: option.to_string(),
                    value: v.to_string(),
                    expected: self.describe(),
                })
            }
            (OptionKind::Float { min, max }, Value::Float(v))
                if !v.is_finite() || !(*min..=*max).contains(v) =>
            {
                Err(OptionError::OutOfRange {
                    option: option.to_string(),
                    value: format_number(*v),
                    expected: self.describe(),
                })
            }
            (OptionKind::Choice(choices), Value::Choice(choice)) => {
                check_choice(option, choices, choice)
            }
            (OptionKind::MultiChoice(choices), Value::Set(members)) => members
                .iter()
                .try_for_each(|member| check_choice(option, choices, member)),
            _ => Ok(()),
        }
    }

    /// Parses user-entered text into a checked value of this kind.
    pub fn parse(&self, option: &str, text: &str) -> Result<Value, OptionError> {
        let unparsable = || OptionError::Unparsable {
            option: option.to_string(),
            text: text.to_string(),
            expected: self.describe(),
        };

        let value = match self {
            OptionKind::Bool => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Value::Bool(true),
                "false" | "no" | "off" | "0" => Value::Bool(false),
                _ => return Err(unparsable()),
            },
            OptionKind::Integer { .. } => {
                Value::Int(text.trim().parse().map_err(|_| unparsable())?)
            }
            OptionKind::Float { .. } => {
                Value::Float(text.trim().parse().map_err(|_| unparsable())?)
            }
            OptionKind::Choice(_) => Value::Choice(text.trim().to_string()),
            OptionKind::MultiChoice(_) => Value::Set(
                split_entries(text, ',')
                    .into_iter()
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect(),
            ),
            OptionKind::Text => Value::Text(text.to_string()),
            OptionKind::Lines => Value::List(split_entries(text, '\n')),
            OptionKind::CommaList => Value::List(split_entries(text, ',')),
        };

        self.check(option, &value)?;
        Ok(value)
    }
}

fn check_choice(option: &str, choices: &[&str], choice: &str) -> Result<(), OptionError> {
    if choices.contains(&choice) {
        Ok(())
    } else {
        Err(OptionError::UnknownChoice {
            option: option.to_string(),
            choice: choice.to_string(),
            expected: choices.join(", "),
        })
    }
}
