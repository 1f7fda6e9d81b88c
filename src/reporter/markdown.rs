//! Markdown report

use std::fmt::Write;

use crate::resolver::{Resolution, Variable};

/// Render a resolution as a markdown document with a summary table and a
/// variables table, overridden variables listed first.
pub fn format_markdown(resolution: &Resolution) -> String {
    let mut out = String::new();

    out.push_str("# Environment Resolution Report\n\n");
    let _ = writeln!(out, "**Path:** `{}`\n", resolution.path);

    out.push_str("## Summary\n\n");
    out.push_str("| Metric | Value |\n");
    out.push_str("|--------|-------|\n");
    let _ = writeln!(out, "| Env files scanned | {} |", resolution.env_files.len());
    let _ = writeln!(
        out,
        "| Compose files scanned | {} |",
        resolution.compose_files.len()
    );
    let _ = writeln!(out, "| Variables resolved | {} |", resolution.variables.len());

    let overrides = resolution
        .variables
        .iter()
        .filter(|variable| variable.overridden)
        .count();
    let _ = writeln!(out, "| Variables with overrides | {overrides} |");
    out.push('\n');

    if !resolution.warnings.is_empty() {
        out.push_str("## Warnings\n\n");
        for warning in &resolution.warnings {
            let _ = writeln!(out, "- {warning}");
        }
        out.push('\n');
    }

    out.push_str("## Resolved Variables\n\n");
    out.push_str("| Variable | Final Value | Source | Overridden |\n");
    out.push_str("|----------|-------------|--------|------------|\n");

    let mut variables: Vec<&Variable> = resolution.variables.iter().collect();
    variables.sort_by(|a, b| {
        b.overridden
            .cmp(&a.overridden)
            .then_with(|| a.name.cmp(&b.name))
    });

    for variable in variables {
        let mut value = variable.final_value.clone();
        if value.chars().count() > 30 {
            value = variable.final_value.chars().take(27).collect::<String>() + "...";
        }

        let mut source = variable.final_from.layer.to_string();
        if let Some(service) = &variable.final_from.service {
            source = format!("{source} ({service})");
        }

        let overridden = if variable.overridden { "Yes" } else { "" };
        let _ = writeln!(
            out,
            "| `{}` | `{}` | {} | {} |",
            variable.name, value, source, overridden
        );
    }

    out
}
