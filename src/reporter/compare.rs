//! Human-readable comparison report

use std::fmt::Write;

use crate::resolver::CompareResult;

/// Render a comparison between two environments. `first` and `second` are
/// the labels (typically paths) of the compared sides.
pub fn format_compare(first: &str, second: &str, result: &CompareResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Environment Comparison: {first} vs {second}\n");

    if !result.only_in_first.is_empty() {
        let _ = writeln!(out, "## Only in {first} ({})", result.only_in_first.len());
        for name in &result.only_in_first {
            let _ = writeln!(out, "  - {name}");
        }
        out.push('\n');
    }

    if !result.only_in_second.is_empty() {
        let _ = writeln!(out, "## Only in {second} ({})", result.only_in_second.len());
        for name in &result.only_in_second {
            let _ = writeln!(out, "  - {name}");
        }
        out.push('\n');
    }

    if !result.different.is_empty() {
        let _ = writeln!(out, "## Different Values ({})", result.different.len());
        for diff in &result.different {
            let _ = writeln!(out, "  - {}:", diff.name);
            let _ = writeln!(out, "      {first}: {}", diff.first_value);
            let _ = writeln!(out, "      {second}: {}", diff.second_value);
        }
        out.push('\n');
    }

    out.push_str("## Summary\n");
    let _ = writeln!(
        out,
        "  - {} variable(s) only in {first}",
        result.only_in_first.len()
    );
    let _ = writeln!(
        out,
        "  - {} variable(s) only in {second}",
        result.only_in_second.len()
    );
    let _ = writeln!(
        out,
        "  - {} variable(s) with different values",
        result.different.len()
    );
    let _ = writeln!(out, "  - {} variable(s) with same values", result.same.len());

    out
}
