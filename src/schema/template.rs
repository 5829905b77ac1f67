//! How options turn into tokens, and when they are allowed to.

use crate::compiler::quote::{quote, quote_if_needed};

/// Shell-safety treatment for a value token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// Emit the value as-is. Only for values that cannot contain shell syntax
    /// (numbers, fixed choices).
    Never,
    /// Quote only when the value contains characters outside the shell-safe set.
    IfNeeded,
    /// Always wrap the value in single quotes.
    Always,
}

impl Quoting {
    pub fn apply(self, word: &str) -> String {
        match self {
            Quoting::Never => word.to_string(),
            Quoting::IfNeeded => quote_if_needed(word),
            Quoting::Always => quote(word),
        }
    }
}

/// The token shape an option renders to.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagTemplate {
    /// Contributes no tokens of its own; only steers other options.
    Silent,
    /// A bare flag, emitted when the boolean is true.
    Switch(&'static str),
    /// Flag and value glued into one token, e.g. `-z14`.
    Attached(&'static str),
    /// Flag and value as a token pair, e.g. `-b 5`.
    Separate(&'static str, Quoting),
    /// Fixed tokens for each choice of a single-choice option.
    PerChoice(&'static [(&'static str, &'static [&'static str])]),
    /// One flag per selected member of a multi-choice option, in table order.
    PerMember(&'static [(&'static str, &'static str)]),
    /// One attached token per non-blank list entry, e.g. `-Epop:sum`.
    EachAttached(&'static str),
    /// One token pair per non-blank list entry, e.g. `-y pop`.
    EachSeparate(&'static str, Quoting),
    /// An output filename whose extension follows the choice of `selector`.
    TargetFile {
        flag: &'static str,
        selector: &'static str,
        extensions: &'static [(&'static str, &'static str)],
    },
}

/// Predicate deciding whether an option is active at all.
///
/// An option whose condition does not hold is inert: it contributes nothing
/// regardless of its own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// The single-choice option has the given choice selected.
    Is(&'static str, &'static str),
    /// The single-choice option has any other choice selected.
    IsNot(&'static str, &'static str),
    /// The boolean option has the given value.
    Flag(&'static str, bool),
}

impl Condition {
    /// Name of the option this condition reads, if any.
    pub fn referenced(&self) -> Option<&'static str> {
        match *self {
            Condition::Always => None,
            Condition::Is(name, _) | Condition::IsNot(name, _) | Condition::Flag(name, _) => {
                Some(name)
            }
        }
    }
}

/// Predicate over an option's own value deciding whether it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitWhen {
    /// Structural: always renders while enabled, even at its default.
    Always,
    /// Renders only when the value differs from the default.
    NotDefault,
    /// Renders only when the value is not blank.
    NonEmpty,
}
