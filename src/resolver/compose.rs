//! Compose manifest parsing
//!
//! Deserializes the subset of a compose document the resolver cares about:
//! per-service `env_file` references and inline `environment` entries. Both
//! keys are duck-typed in real-world documents (scalar vs list, mapping vs
//! list), so they land as [`serde_yaml::Value`] and are normalized here, at
//! the ingestion boundary, into uniform entries.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;

/// A compose document, reduced to the keys the resolver reads.
///
/// Services are kept in a `BTreeMap` so iteration order is the sorted service
/// name order, independent of document order.
#[derive(Debug, Deserialize)]
pub(crate) struct ComposeFile {
    #[serde(default)]
    pub services: BTreeMap<String, ComposeService>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ComposeService {
    #[serde(default)]
    pub environment: Option<Value>,
    #[serde(default)]
    pub env_file: Option<Value>,
}

/// One inline `environment` entry, already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InlineEntry {
    pub key: String,
    /// Empty for bare `NAME` pass-through references and null values
    pub value: String,
}

impl ComposeFile {
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// Normalize an `env_file` value: a single path or a list of paths.
pub(crate) fn env_file_paths(value: &Value) -> Vec<String> {
    match value {
        Value::String(path) => vec![path.clone()],
        Value::Sequence(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Normalize an inline `environment` value: a name→value mapping or a list
/// of `NAME=VALUE` / bare `NAME` strings.
pub(crate) fn inline_entries(value: &Value) -> Vec<InlineEntry> {
    let mut entries = Vec::new();

    match value {
        Value::Mapping(map) => {
            for (key, val) in map {
                let Some(key) = key.as_str() else { continue };
                entries.push(InlineEntry {
                    key: key.to_string(),
                    value: scalar_to_string(val),
                });
            }
        }
        Value::Sequence(items) => {
            for item in items {
                let Some(s) = item.as_str() else { continue };
                let (key, value) = match s.split_once('=') {
                    Some((key, value)) => (key, value),
                    None => (s, ""),
                };
                entries.push(InlineEntry {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
        _ => {}
    }

    entries
}

/// Textual form of a scalar environment value. Compose documents routinely
/// leave ports and flags unquoted, so numbers and booleans are coerced; null
/// means a pass-through reference and yields the empty string.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: &str) -> InlineEntry {
        InlineEntry {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn parses_mapping_environment() {
        let compose = ComposeFile::parse(
            "services:\n  api:\n    environment:\n      NODE_ENV: production\n      PORT: 3000\n      DEBUG: true\n      OPTIONAL:\n",
        )
        .unwrap();
        let env = compose.services["api"].environment.as_ref().unwrap();
        assert_eq!(
            inline_entries(env),
            vec![
                entry("NODE_ENV", "production"),
                entry("PORT", "3000"),
                entry("DEBUG", "true"),
                entry("OPTIONAL", ""),
            ]
        );
    }

    #[test]
    fn parses_list_environment() {
        let compose = ComposeFile::parse(
            "services:\n  api:\n    environment:\n      - NODE_ENV=production\n      - BARE_REFERENCE\n      - WITH_EQUALS=a=b\n",
        )
        .unwrap();
        let env = compose.services["api"].environment.as_ref().unwrap();
        assert_eq!(
            inline_entries(env),
            vec![
                entry("NODE_ENV", "production"),
                entry("BARE_REFERENCE", ""),
                entry("WITH_EQUALS", "a=b"),
            ]
        );
    }

    #[test]
    fn env_file_single_and_list() {
        let compose = ComposeFile::parse(
            "services:\n  one:\n    env_file: .env.web\n  two:\n    env_file:\n      - a.env\n      - b.env\n",
        )
        .unwrap();
        let one = compose.services["one"].env_file.as_ref().unwrap();
        assert_eq!(env_file_paths(one), vec![".env.web".to_string()]);
        let two = compose.services["two"].env_file.as_ref().unwrap();
        assert_eq!(
            env_file_paths(two),
            vec!["a.env".to_string(), "b.env".to_string()]
        );
    }

    #[test]
    fn services_iterate_in_sorted_order() {
        let compose =
            ComposeFile::parse("services:\n  zebra: {}\n  api: {}\n  db: {}\n").unwrap();
        let names: Vec<&str> = compose.services.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["api", "db", "zebra"]);
    }

    #[test]
    fn missing_services_key_is_empty() {
        let compose = ComposeFile::parse("version: '3'\n").unwrap();
        assert!(compose.services.is_empty());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(ComposeFile::parse("services: [not, a, mapping]").is_err());
    }
}
