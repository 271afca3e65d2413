//! Lookup tables injected into the parser.
//!
//! The keyword set and the type-alias table describe the language the
//! downstream emitter targets. Two presets ship with the crate:
//! [`ParserConfig::csharp`] (the default) and [`ParserConfig::rust`].
//! Configurations are stored as JSON; deserializing one always normalizes
//! and validates it, whichever serde entry point is used.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::Error;

const SYSTEM_NAMESPACE: &str = "global::System";

lazy_static! {
    static ref CSHARP: ParserConfig = {
        let keywords = [
            "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char",
            "checked", "class", "const", "continue", "decimal", "default", "delegate", "do",
            "double", "else", "enum", "event", "explicit", "extern", "false", "finally",
            "fixed", "float", "for", "foreach", "goto", "if", "implicit", "in", "int",
            "interface", "internal", "is", "lock", "long", "namespace", "new", "null",
            "object", "operator", "out", "override", "params", "private", "protected",
            "public", "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof",
            "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
            "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using",
            "virtual", "void", "volatile", "while",
        ];

        let mut config = ParserConfig::empty("@", format!("{}.ReadOnlySpan<char>", SYSTEM_NAMESPACE));
        for keyword in keywords {
            config = config.with_keyword(keyword);
        }

        // Primitive keywords resolve to themselves.
        for primitive in [
            "object", "string", "bool", "byte", "sbyte", "short", "ushort", "int", "uint",
            "long", "ulong", "float", "double", "decimal", "char",
        ] {
            config = config.with_type_alias(primitive, primitive);
        }

        for system_type in [
            "Guid", "Uri", "DateTime", "DateTimeOffset", "DateOnly", "TimeOnly", "TimeSpan",
            "ReadOnlySpan<char>",
        ] {
            config = config.with_type_alias(
                system_type,
                format!("{}.{}", SYSTEM_NAMESPACE, system_type),
            );
        }
        config
    };

    static ref RUST: ParserConfig = {
        let keywords = [
            "as", "async", "await", "break", "const", "continue", "dyn", "else",
            "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop",
            "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct",
            "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become",
            "box", "do", "final", "gen", "macro", "override", "priv", "try", "typeof",
            "unsized", "virtual", "yield",
        ];

        let mut config = ParserConfig::empty("r#", "&str");
        for keyword in keywords {
            config = config.with_keyword(keyword);
        }
        // `r#crate`, `r#self`, `r#super` and `r#Self` are not legal.
        for keyword in ["crate", "self", "super", "Self"] {
            config = config.with_suffixed_keyword(keyword);
        }

        for (alias, target) in [
            ("string", "String"),
            ("str", "&str"),
            ("bool", "bool"),
            ("char", "char"),
            ("byte", "u8"),
            ("sbyte", "i8"),
            ("short", "i16"),
            ("ushort", "u16"),
            ("int", "i32"),
            ("uint", "u32"),
            ("long", "i64"),
            ("ulong", "u64"),
            ("float", "f32"),
            ("double", "f64"),
        ] {
            config = config.with_type_alias(alias, target);
        }
        config
    };
}

/// Keyword set and type-alias table for one target language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawParserConfig")]
pub struct ParserConfig {
    /// Reserved words of the target language.
    pub keywords: BTreeSet<String>,

    /// Prefix applied to a parameter name that collides with a keyword.
    pub keyword_escape: String,

    /// Reserved words the escape prefix cannot make legal. A colliding name
    /// gets a trailing `_` instead (`self` -> `self_`).
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub suffixed_keywords: BTreeSet<String>,

    /// Short type names mapped to canonical target type names. Keys are stored
    /// lower-cased and matched case-insensitively.
    pub type_aliases: BTreeMap<String, String>,

    /// Type given to holes without an annotation.
    pub default_type: String,
}

/// Wire shape of [`ParserConfig`] before normalization.
#[derive(Deserialize)]
struct RawParserConfig {
    #[serde(default)]
    keywords: BTreeSet<String>,
    keyword_escape: String,
    #[serde(default)]
    suffixed_keywords: BTreeSet<String>,
    #[serde(default)]
    type_aliases: BTreeMap<String, String>,
    default_type: String,
}

impl TryFrom<RawParserConfig> for ParserConfig {
    type Error = Error;

    fn try_from(raw: RawParserConfig) -> Result<Self, Self::Error> {
        let mut config = ParserConfig::empty(raw.keyword_escape, raw.default_type);
        config.keywords = raw.keywords;
        config.suffixed_keywords = raw.suffixed_keywords;
        // Aliases written by hand may use any casing.
        for (alias, target) in raw.type_aliases {
            config = config.with_type_alias(alias, target);
        }
        config.validate()?;
        Ok(config)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::csharp()
    }
}

impl ParserConfig {
    /// A configuration with no keywords and no aliases.
    pub fn empty(keyword_escape: impl Into<String>, default_type: impl Into<String>) -> Self {
        Self {
            keywords: BTreeSet::new(),
            keyword_escape: keyword_escape.into(),
            suffixed_keywords: BTreeSet::new(),
            type_aliases: BTreeMap::new(),
            default_type: default_type.into(),
        }
    }

    /// Tables for emitters that produce C# accessors.
    pub fn csharp() -> Self {
        CSHARP.clone()
    }

    /// Tables for emitters that produce Rust accessors.
    pub fn rust() -> Self {
        RUST.clone()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.insert(keyword.into());
        self
    }

    pub fn with_suffixed_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.suffixed_keywords.insert(keyword.into());
        self
    }

    pub fn with_keyword_escape(mut self, keyword_escape: impl Into<String>) -> Self {
        self.keyword_escape = keyword_escape.into();
        self
    }

    pub fn with_type_alias(mut self, alias: impl AsRef<str>, target: impl Into<String>) -> Self {
        self.type_aliases
            .insert(alias.as_ref().to_lowercase(), target.into());
        self
    }

    pub fn with_default_type(mut self, default_type: impl Into<String>) -> Self {
        self.default_type = default_type.into();
        self
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        self.keywords.contains(name)
    }

    pub fn is_suffixed_keyword(&self, name: &str) -> bool {
        self.suffixed_keywords.contains(name)
    }

    pub fn lookup_alias(&self, annotation: &str) -> Option<&str> {
        self.type_aliases
            .get(&annotation.to_lowercase())
            .map(String::as_str)
    }

    /// Checks the invariants every configuration must hold.
    pub fn validate(&self) -> Result<(), Error> {
        if self.keyword_escape.is_empty() {
            return Err(Error::invalid_config("keyword escape must not be empty"));
        }
        if self.default_type.trim().is_empty() {
            return Err(Error::invalid_config("default type must not be empty"));
        }
        if let Some(alias) = self.type_aliases.keys().find(|k| k.trim().is_empty()) {
            return Err(Error::invalid_config(format!(
                "type alias key '{}' must not be blank",
                alias
            )));
        }
        Ok(())
    }

    /// Reads a JSON configuration from any reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Json)
    }

    /// Reads a JSON configuration file.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path).map_err(Error::Io)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Writes this configuration as pretty-printed JSON.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self).map_err(Error::Json)
    }

    /// Writes this configuration to a JSON file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(Error::Io)
    }
}

impl FromStr for ParserConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(Error::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csharp_tables() {
        let config = ParserConfig::csharp();
        assert!(config.is_keyword("class"));
        assert!(config.is_keyword("string"));
        assert!(!config.is_keyword("name"));
        assert_eq!(config.keyword_escape, "@");
        assert_eq!(config.default_type, "global::System.ReadOnlySpan<char>");
        assert_eq!(config.lookup_alias("int"), Some("int"));
        assert_eq!(config.lookup_alias("Guid"), Some("global::System.Guid"));
        assert_eq!(config.lookup_alias("Unknown"), None);
    }

    #[test]
    fn test_alias_lookup_ignores_case() {
        let config = ParserConfig::csharp();
        assert_eq!(config.lookup_alias("guid"), Some("global::System.Guid"));
        assert_eq!(config.lookup_alias("STRING"), Some("string"));
    }

    #[test]
    fn test_default_is_csharp() {
        assert_eq!(ParserConfig::default(), ParserConfig::csharp());
    }

    #[test]
    fn test_rust_tables() {
        let config = ParserConfig::rust();
        assert!(config.is_keyword("fn"));
        assert!(!config.is_keyword("crate"));
        assert!(config.is_suffixed_keyword("crate"));
        assert!(config.is_suffixed_keyword("self"));
        assert!(!ParserConfig::csharp().is_suffixed_keyword("self"));
        assert_eq!(config.keyword_escape, "r#");
        assert_eq!(config.default_type, "&str");
        assert_eq!(config.lookup_alias("int"), Some("i32"));
    }

    #[test]
    fn test_builder() {
        let config = ParserConfig::empty("_", "Text")
            .with_keyword("let")
            .with_type_alias("Num", "Number")
            .with_default_type("Str")
            .with_keyword_escape("$");
        assert!(config.is_keyword("let"));
        assert_eq!(config.lookup_alias("num"), Some("Number"));
        assert_eq!(config.default_type, "Str");
        assert_eq!(config.keyword_escape, "$");
    }

    #[test]
    fn test_from_str_lowercases_aliases() {
        let json = r#"{
            "keywords": ["fun"],
            "keyword_escape": "`",
            "type_aliases": { "Int": "kotlin.Int" },
            "default_type": "CharSequence"
        }"#;
        let config = ParserConfig::from_str(json).unwrap();
        assert!(config.is_keyword("fun"));
        assert_eq!(config.lookup_alias("INT"), Some("kotlin.Int"));
    }

    #[test]
    fn test_from_str_rejects_empty_default_type() {
        let json = r#"{ "keyword_escape": "@", "default_type": "  " }"#;
        let err = ParserConfig::from_str(json).unwrap_err();
        assert!(err.to_string().contains("default type must not be empty"));
    }

    #[test]
    fn test_plain_serde_normalizes_aliases() {
        let json = r#"{
            "keyword_escape": "r#",
            "type_aliases": { "Int": "i32" },
            "default_type": "&str"
        }"#;
        let config: ParserConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.lookup_alias("Int"), Some("i32"));
        assert_eq!(config.lookup_alias("int"), Some("i32"));
    }

    #[test]
    fn test_plain_serde_validates() {
        let json = r#"{ "keyword_escape": "", "default_type": "&str" }"#;
        let err = serde_json::from_str::<ParserConfig>(json).unwrap_err();
        assert!(err.to_string().contains("keyword escape must not be empty"));
    }

    #[test]
    fn test_embedded_config_is_normalized() {
        #[derive(Deserialize)]
        struct Project {
            config: ParserConfig,
        }
        let json = r#"{ "config": {
            "keyword_escape": "@",
            "type_aliases": { "MONEY": "decimal" },
            "default_type": "string"
        } }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.config.lookup_alias("money"), Some("decimal"));
    }

    #[test]
    fn test_from_str_rejects_malformed_json() {
        let err = ParserConfig::from_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restext.json");
        let config = ParserConfig::rust().with_type_alias("Money", "rust_decimal::Decimal");
        assert!(serde_json::to_string_pretty(&config).unwrap().contains("suffixed_keywords"));
        config.write_to(&path).unwrap();
        let loaded = ParserConfig::read_from(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
