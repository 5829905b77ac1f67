//! Advisory checks on a session's options.
//!
//! Lints flag values that will compile but that tippecanoe is likely to
//! reject or misread. They are reported as warnings and never change the
//! generated command.

use std::fmt;

use regex::Regex;

use crate::compiler::sanitize::entries;
use crate::input::InputFile;
use crate::options::OptionSet;
use crate::schema::{Schema, Value};

/// Operations tippecanoe accepts for `--accumulate-attribute`.
const ACCUMULATE_OPERATIONS: &str = "sum|product|mean|max|min|concat|comma|count";

/// Types tippecanoe accepts for `--attribute-type`.
const ATTRIBUTE_TYPES: &str = "string|float|int|bool";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lint {
    /// Option the finding is about, or `None` for input files.
    pub option: Option<&'static str>,
    pub message: String,
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.option {
            Some(option) => write!(f, "{}: {}", option, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Runs all lints. Disabled options are not inspected.
pub fn check(schema: &Schema, options: &OptionSet, inputs: &[InputFile]) -> Vec<Lint> {
    let mut lints = Vec::new();

    let active = |name: &str| {
        schema
            .get(name)
            .filter(|def| schema.is_enabled(def, options))
            .map(|def| schema.resolve(def, options))
    };

    let pair_pattern = |values: &str| {
        Regex::new(&format!(r"^[^:\s]+:({})$", values)).expect("valid regex")
    };

    if let Some(Value::List(list)) = active("attribute_types") {
        let pattern = pair_pattern(ATTRIBUTE_TYPES);
        for entry in entries(list).filter(|entry| !pattern.is_match(entry)) {
            lints.push(Lint {
                option: Some("attribute_types"),
                message: format!("'{}' is not attr:type with type {}", entry, ATTRIBUTE_TYPES),
            });
        }
    }

    if let Some(Value::List(list)) = active("accumulate_attributes") {
        let pattern = pair_pattern(ACCUMULATE_OPERATIONS);
        for entry in entries(list).filter(|entry| !pattern.is_match(entry)) {
            lints.push(Lint {
                option: Some("accumulate_attributes"),
                message: format!(
                    "'{}' is not attr:operation with operation {}",
                    entry, ACCUMULATE_OPERATIONS
                ),
            });
        }
    }

    if let Some(Value::List(list)) = active("set_attributes") {
        for entry in entries(list).filter(|entry| !entry.contains(':')) {
            lints.push(Lint {
                option: Some("set_attributes"),
                message: format!("'{}' is missing the ':' between attribute and value", entry),
            });
        }
    }

    if let Some(Value::Text(filter)) = active("feature_filter") {
        let filter = filter.trim();
        if !filter.is_empty() {
            if let Err(e) = serde_json::from_str::<serde_json::Value>(filter) {
                lints.push(Lint {
                    option: Some("feature_filter"),
                    message: format!("filter is not valid JSON: {}", e),
                });
            }
        }
    }

    let manual_low_detail = matches!(active("low_detail"), Some(Value::Int(detail)) if *detail != 12);
    if matches!(active("grid_low_zooms"), Some(Value::Bool(true))) && !manual_low_detail {
        lints.push(Lint {
            option: Some("grid_low_zooms"),
            message: "grid low zooms usually needs a lower tile resolution, e.g. low_detail=8"
                .to_string(),
        });
    }

    if inputs.iter().all(|input| input.path.trim().is_empty()) {
        lints.push(Lint {
            option: None,
            message: "no input files; tippecanoe will read GeoJSON from standard input"
                .to_string(),
        });
    }

    for input in inputs {
        if input.path.trim().is_empty() && !input.layer.trim().is_empty() {
            lints.push(Lint {
                option: None,
                message: format!("layer '{}' has no input file and is skipped", input.layer.trim()),
            });
        }
    }

    lints
}
