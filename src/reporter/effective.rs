//! Effective env-file writer

use std::fmt::Write;

use crate::resolver::Resolution;

/// Serialize the final values as `NAME=value` lines, one per variable, in
/// name order. Values containing whitespace or `#` are double-quoted so the
/// output survives a round-trip through an env-file parser.
pub fn format_effective(resolution: &Resolution) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Effective environment for {}", resolution.path);
    for variable in &resolution.variables {
        let value = &variable.final_value;
        let needs_quoting = value.contains(char::is_whitespace) || value.contains('#');
        if needs_quoting && !value.contains('"') {
            let _ = writeln!(out, "{}=\"{}\"", variable.name, value);
        } else {
            let _ = writeln!(out, "{}={}", variable.name, value);
        }
    }

    out
}
