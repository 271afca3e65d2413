//! Turns raw hole text into a parameter identifier.

use crate::config::ParserConfig;

/// Normalizes the raw name of a hole.
///
/// - An absent name, or one made only of ASCII digits, becomes `arg{n}`. For a
///   digit name `n` is its numeric value; for an absent name it is `position`,
///   the ordinal of the hole in its value.
/// - An upper-case ASCII first character is lower-cased (`Name` -> `name`).
/// - A name that is a keyword of the target language gets the configured
///   escape prefix (`class` -> `@class`). Keywords the prefix cannot make
///   legal get a trailing `_` instead (`self` -> `self_`).
pub fn normalize_name(raw: Option<&str>, position: usize, config: &ParserConfig) -> String {
    let name = match raw {
        None | Some("") => format!("arg{}", position),
        Some(raw) if is_index(raw) => positional_name(raw),
        Some(raw) => lower_first(raw),
    };

    if config.is_suffixed_keyword(&name) {
        format!("{}_", name)
    } else if config.is_keyword(&name) {
        format!("{}{}", config.keyword_escape, name)
    } else {
        name
    }
}

fn is_index(raw: &str) -> bool {
    raw.bytes().all(|b| b.is_ascii_digit())
}

fn positional_name(digits: &str) -> String {
    // Leading zeros collapse ("007" -> arg7); values past u64 keep their digits.
    match digits.parse::<u64>() {
        Ok(index) => format!("arg{}", index),
        Err(_) => format!("arg{}", digits),
    }
}

fn lower_first(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let mut out = String::with_capacity(raw.len());
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
            out
        }
        _ => raw.to_string(),
    }
}
