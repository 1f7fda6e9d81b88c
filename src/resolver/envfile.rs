//! Plain env-file parsing
//!
//! Line-oriented `KEY=VALUE` parsing shared by the `.env` family and compose
//! `env_file` references. The parser knows nothing about precedence; it only
//! emits raw entries with their line numbers.

/// One accepted line from an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnvEntry {
    pub key: String,
    pub value: String,
    /// 1-indexed line number in the source file
    pub line: u32,
}

/// Parse env-file content into entries.
///
/// Blank lines and whole-line `#` comments are skipped. A `#` appearing
/// after content is literal data, not a comment. A leading `export ` token
/// is stripped. Lines without `=` and lines whose key trims to empty are
/// silently skipped. Values keep `${VAR}` references as opaque literal text.
pub(crate) fn parse_env_content(content: &str) -> Vec<EnvEntry> {
    let mut entries = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        // str::lines strips the \n and a trailing \r, but values can still
        // carry interior \r from mixed line endings; trimming handles both.
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line).trim();

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        entries.push(EnvEntry {
            key: key.to_string(),
            value: unquote(value.trim()).to_string(),
            line: idx as u32 + 1,
        });
    }

    entries
}

/// Strip exactly one matching outer pair of `"…"` or `'…'`.
///
/// The pair must be unambiguous: if the interior contains the wrapping quote
/// character there is no single outer pair and the value is returned
/// unchanged (so `'it'"s'` stays as-is). No recursion, no escape-sequence
/// interpretation.
pub(crate) fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let quote = bytes[0];
        if (quote == b'"' || quote == b'\'') && bytes[bytes.len() - 1] == quote {
            let interior = &s[1..s.len() - 1];
            if !interior.as_bytes().contains(&quote) {
                return interior;
            }
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: &str, line: u32) -> EnvEntry {
        EnvEntry {
            key: key.to_string(),
            value: value.to_string(),
            line,
        }
    }

    #[test]
    fn basic_lines() {
        let entries = parse_env_content("# Comment\nDATABASE_URL=postgres://localhost/db\nAPI_KEY=secret123\n");
        assert_eq!(
            entries,
            vec![
                entry("DATABASE_URL", "postgres://localhost/db", 2),
                entry("API_KEY", "secret123", 3),
            ]
        );
    }

    #[test]
    fn skips_blank_comment_and_malformed_lines() {
        let entries = parse_env_content("\n   \n# full comment\n  # indented comment\nNOEQUALS\n=novalue\nOK=1\n");
        assert_eq!(entries, vec![entry("OK", "1", 7)]);
    }

    #[test]
    fn export_prefix_is_stripped() {
        let entries = parse_env_content("export EXPORTED_VAR=value1\nNORMAL_VAR=value2\n");
        assert_eq!(entries[0], entry("EXPORTED_VAR", "value1", 1));
        assert_eq!(entries[1], entry("NORMAL_VAR", "value2", 2));
    }

    #[test]
    fn splits_on_first_equals_only() {
        let entries = parse_env_content("EQUALS_IN_VALUE=key=value=more\n");
        assert_eq!(entries, vec![entry("EQUALS_IN_VALUE", "key=value=more", 1)]);
    }

    #[test]
    fn hash_after_content_is_literal() {
        let entries = parse_env_content("KEY=value # not a comment\nHASH=\"value#with#hashes\"\n");
        assert_eq!(entries[0].value, "value # not a comment");
        assert_eq!(entries[1].value, "value#with#hashes");
    }

    #[test]
    fn crlf_does_not_leak() {
        let entries = parse_env_content("VAR1=value1\r\nVAR2=value2\r\n");
        assert_eq!(
            entries,
            vec![entry("VAR1", "value1", 1), entry("VAR2", "value2", 2)]
        );
    }

    #[test]
    fn whitespace_trimming() {
        let entries = parse_env_content("  LEADING=value\nTRAILING=value   \nSPACES=hello world\nBLANKVAL=   \n");
        assert_eq!(entries[0], entry("LEADING", "value", 1));
        assert_eq!(entries[1], entry("TRAILING", "value", 2));
        assert_eq!(entries[2], entry("SPACES", "hello world", 3));
        assert_eq!(entries[3], entry("BLANKVAL", "", 4));
    }

    #[test]
    fn references_stay_literal() {
        let entries = parse_env_content("BASE_URL=http://localhost\nAPI_URL=${BASE_URL}/api\n");
        assert_eq!(entries[1].value, "${BASE_URL}/api");
    }

    #[test]
    fn unquote_matching_pairs() {
        assert_eq!(unquote("\"value with spaces\""), "value with spaces");
        assert_eq!(unquote("'another value'"), "another value");
        assert_eq!(unquote("\"x\""), "x");
        assert_eq!(unquote("'x'"), "x");
    }

    #[test]
    fn unquote_is_idempotent_on_unquoted_input() {
        for s in ["simple", "", "a", "\"", "'", "has \"inner\" quotes"] {
            assert_eq!(unquote(s), s);
        }
    }

    #[test]
    fn unquote_leaves_mismatched_pairs() {
        assert_eq!(unquote("'it'\"s'"), "'it'\"s'");
        assert_eq!(unquote("\"half"), "\"half");
        assert_eq!(unquote("half'"), "half'");
    }

    #[test]
    fn unquote_requires_unambiguous_pair() {
        assert_eq!(unquote("''"), "");
        assert_eq!(unquote("'has \"inner\" quotes'"), "has \"inner\" quotes");
        // interior contains the wrapping quote: no single outer pair
        assert_eq!(unquote("\"\"nested\"\""), "\"\"nested\"\"");
    }
}
