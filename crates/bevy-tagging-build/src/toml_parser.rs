//! TOML parser for the tag registry file (`tags.toml`).

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

use crate::codegen::const_name;

/// Default prefix for generated constant names.
pub const DEFAULT_PREFIX: &str = "TAG_";

/// Default name of the generated module.
pub const DEFAULT_MODULE: &str = "tags";

/// Parsed tag registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagsConfig {
    /// Module name for the generated constants
    pub module_name: String,
    /// Prefix prepended to every constant name
    pub prefix: String,
    /// Registered tags, in file order, without repeats
    names: Vec<String>,
}

/// Raw TOML structure.
#[derive(Debug, Deserialize)]
struct RawTagsConfig {
    /// Optional module name (defaults to "tags")
    module_name: Option<String>,
    /// Optional constant prefix (defaults to "TAG_")
    prefix: Option<String>,
    /// Tag definitions
    tags: RawTags,
}

#[derive(Debug, Deserialize)]
struct RawTags {
    /// Tag strings, exactly as used at runtime
    names: Vec<String>,
}

impl TagsConfig {
    /// Parse from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TagsConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TagsConfigError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_str(&content)
    }

    /// Parse from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, TagsConfigError> {
        let raw: RawTagsConfig = toml::from_str(content)?;

        let module_name = raw.module_name.unwrap_or_else(|| DEFAULT_MODULE.to_string());
        if !is_identifier(&module_name) {
            return Err(TagsConfigError::Validation(format!(
                "Invalid module_name '{}': must be a Rust identifier",
                module_name
            )));
        }

        let prefix = raw.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        if prefix.chars().any(|c| !c.is_ascii_alphanumeric() && c != '_') {
            return Err(TagsConfigError::Validation(format!(
                "Invalid prefix '{}': only ASCII letters, digits and '_' allowed",
                prefix
            )));
        }

        let names = Self::validate_names(&raw.tags.names, &prefix)?;

        Ok(Self {
            module_name,
            prefix,
            names,
        })
    }

    /// Build directly from a tag list, with default module name and prefix.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, TagsConfigError> {
        let names: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
        Ok(Self {
            module_name: DEFAULT_MODULE.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            names: Self::validate_names(&names, DEFAULT_PREFIX)?,
        })
    }

    /// Registered tags in file order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Tag count.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Drop repeats and reject names that cannot become distinct constants.
    fn validate_names(names: &[String], prefix: &str) -> Result<Vec<String>, TagsConfigError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut consts: HashMap<String, &str> = HashMap::new();
        let mut out = Vec::with_capacity(names.len());

        for name in names {
            if name.is_empty() {
                return Err(TagsConfigError::Validation("Empty tag not allowed".into()));
            }
            if !seen.insert(name) {
                continue;
            }

            let ident = const_name(prefix, name);
            if let Some(existing) = consts.insert(ident.clone(), name) {
                return Err(TagsConfigError::Validation(format!(
                    "Tags '{}' and '{}' both map to constant {}",
                    existing, name, ident
                )));
            }
            out.push(name.clone());
        }

        Ok(out)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Errors during config parsing.
#[derive(Debug, Error)]
pub enum TagsConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_config() {
        let toml = r#"
[tags]
names = ["Player", "Main Camera", "Enemy"]
"#;
        let config = TagsConfig::from_str(toml).unwrap();

        assert_eq!(config.module_name, "tags");
        assert_eq!(config.prefix, "TAG_");
        assert_eq!(config.names(), ["Player", "Main Camera", "Enemy"]);
    }

    #[test]
    fn parse_with_module_and_prefix() {
        let toml = r#"
module_name = "game_tags"
prefix = "T_"

[tags]
names = ["A"]
"#;
        let config = TagsConfig::from_str(toml).unwrap();
        assert_eq!(config.module_name, "game_tags");
        assert_eq!(config.prefix, "T_");
    }

    #[test]
    fn repeated_names_collapse() {
        let toml = r#"
[tags]
names = ["A", "B", "A"]
"#;
        let config = TagsConfig::from_str(toml).unwrap();
        assert_eq!(config.names(), ["A", "B"]);
    }

    #[test]
    fn rejects_empty_name() {
        let toml = r#"
[tags]
names = [""]
"#;
        assert!(TagsConfig::from_str(toml).is_err());
    }

    #[test]
    fn rejects_colliding_constants() {
        let toml = r#"
[tags]
names = ["Main Camera", "Main-Camera"]
"#;
        let err = TagsConfig::from_str(toml).unwrap_err();
        assert!(err.to_string().contains("TAG_Main_Camera"));
    }

    #[test]
    fn case_variants_are_distinct_tags() {
        let toml = r#"
[tags]
names = ["Player", "player"]
"#;
        let config = TagsConfig::from_str(toml).unwrap();
        assert_eq!(config.names(), ["Player", "player"]);
    }

    #[test]
    fn rejects_invalid_module_name() {
        for module in ["", "1tags", "my-tags"] {
            let toml = format!(
                r#"
module_name = "{}"

[tags]
names = ["A"]
"#,
                module
            );
            assert!(
                TagsConfig::from_str(&toml).is_err(),
                "Should reject: {}",
                module
            );
        }
    }

    #[test]
    fn missing_tags_table_is_parse_error() {
        let err = TagsConfig::from_str("prefix = \"X_\"").unwrap_err();
        assert!(matches!(err, TagsConfigError::Parse(_)));
    }
}
