//! Result types produced by parsing resource lines.
//! All of them are plain values; a new parse always builds fresh instances.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A `{name}` or `{name:type}` placeholder inside a resource value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Hole {
    /// Byte offset of the opening brace within the trimmed value.
    pub index: usize,

    /// Byte length from the opening brace to the closing brace, inclusive.
    pub length: usize,

    /// Normalized parameter name.
    pub name: String,

    /// Raw type annotation, not yet resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub r#type: Option<String>,
}

impl Hole {
    pub fn end(&self) -> usize {
        self.index + self.length
    }
}

impl Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.r#type {
            Some(ty) => write!(f, "{{{}:{}}}@{}", self.name, ty, self.index),
            None => write!(f, "{{{}}}@{}", self.name, self.index),
        }
    }
}

/// A formal parameter derived from one or more holes sharing a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub resolved_type: String,
}

/// The parsed representation of one `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceItem {
    /// Trimmed key without internal whitespace.
    pub key: String,

    /// Holes in left-to-right order. Names may repeat.
    #[serde(default)]
    pub holes: Vec<Hole>,

    /// Byte length of the trimmed value.
    pub format_length: usize,
}

impl ResourceItem {
    pub fn new(key: impl Into<String>, holes: Vec<Hole>, format_length: usize) -> Self {
        Self {
            key: key.into(),
            holes,
            format_length,
        }
    }

    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }
}

impl Display for ResourceItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ResourceItem {{ key: {}, holes: [{}], format_length: {} }}",
            self.key,
            self.holes
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            self.format_length
        )
    }
}

/// What became of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line has no `=` and is not a key/value pair.
    NoMatch,
    /// The line was parsed successfully.
    Parsed(ResourceItem),
    /// The line is malformed. Diagnostics have been reported.
    Failed,
}

impl LineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LineOutcome::Parsed(_))
    }

    pub fn item(&self) -> Option<&ResourceItem> {
        match self {
            LineOutcome::Parsed(item) => Some(item),
            _ => None,
        }
    }

    pub fn into_item(self) -> Option<ResourceItem> {
        match self {
            LineOutcome::Parsed(item) => Some(item),
            _ => None,
        }
    }
}

/// All items parsed from one resource text, in file order with unique keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ResourceDocument {
    pub path: String,
    #[serde(default)]
    pub items: Vec<ResourceItem>,
}

impl ResourceDocument {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            items: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ResourceItem> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
