//! POSIX shell quoting for value tokens.
//!
//! All quoting in the generated command goes through this module so that
//! every value is escaped the same way.

/// Returns true if `word` survives a POSIX shell unchanged without quotes.
///
/// A `~` at the start of the word or after `=` or `:` is subject to tilde
/// expansion, so such words are not safe.
pub fn is_shell_safe(word: &str) -> bool {
    !word.is_empty()
        && word.chars().all(|c| {
            matches!(c,
                'a'..='z' | 'A'..='Z' | '0'..='9'
                | '_' | '-' | '.' | '/' | ':' | '+' | '%' | '@' | '=' | ',' | '~')
        })
        && !word.starts_with('=')
        && !word.starts_with('~')
        && !word.contains("=~")
        && !word.contains(":~")
}

/// Wraps `word` in single quotes, escaping embedded single quotes.
pub fn quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', "'\"'\"'"))
}

/// Quotes `word` only if it is not shell-safe as-is.
pub fn quote_if_needed(word: &str) -> String {
    if is_shell_safe(word) {
        word.to_string()
    } else {
        quote(word)
    }
}
