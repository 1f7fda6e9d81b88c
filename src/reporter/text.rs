//! Colored human-readable report

use std::fmt::Write;

use colored::Colorize;

use crate::resolver::{Resolution, Variable};

/// Render a resolution as a colored text report. Overridden variables come
/// first, with their full override chain; cleanly resolved ones follow.
pub fn format_text(resolution: &Resolution) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Environment Resolution Report".cyan());
    let _ = writeln!(out, "{}", "=============================".cyan());
    out.push('\n');

    let _ = writeln!(out, "Scanned path: {}", resolution.path);
    let _ = writeln!(out, "Env files: {}", resolution.env_files.len());
    let _ = writeln!(out, "Compose files: {}", resolution.compose_files.len());
    let _ = writeln!(out, "Variables resolved: {}", resolution.variables.len());
    out.push('\n');

    if !resolution.warnings.is_empty() {
        let _ = writeln!(out, "{}", "Warnings".yellow());
        for warning in &resolution.warnings {
            let _ = writeln!(out, "  • {warning}");
        }
        out.push('\n');
    }

    let (overridden, clean): (Vec<&Variable>, Vec<&Variable>) = resolution
        .variables
        .iter()
        .partition(|variable| variable.overridden);

    if !overridden.is_empty() {
        let _ = writeln!(out, "{}", "Variables with Overrides".yellow());
        let _ = writeln!(out, "------------------------");
        for variable in &overridden {
            format_variable(&mut out, variable, true);
        }
        out.push('\n');
    }

    if !clean.is_empty() {
        let _ = writeln!(out, "{}", "Cleanly Resolved Variables".green());
        let _ = writeln!(out, "--------------------------");
        for variable in &clean {
            format_variable(&mut out, variable, false);
        }
    }

    out
}

fn format_variable(out: &mut String, variable: &Variable, show_chain: bool) {
    let _ = writeln!(out, "{}", variable.name.white());

    if variable.final_value.is_empty() {
        let _ = writeln!(out, "  final: {}", "(empty)".bright_black());
    } else {
        let _ = writeln!(out, "  final: {}", variable.final_value);
    }

    let src = &variable.final_from;
    if let Some(service) = &src.service {
        let _ = writeln!(out, "  from: {} (service: {service})", src.layer);
    } else {
        let _ = writeln!(out, "  from: {}", location(&src.file, src.line));
    }

    if show_chain && variable.chain.len() > 1 {
        let _ = writeln!(out, "{}", "  chain:".bright_black());
        for (i, source) in variable.chain.iter().enumerate().rev() {
            let marker = if i == variable.chain.len() - 1 {
                "→ "
            } else {
                "  "
            };
            let loc = if source.file.is_empty() {
                source.layer.to_string()
            } else {
                location(&source.file, source.line)
            };
            let value = if source.value.is_empty() {
                "(empty)"
            } else {
                source.value.as_str()
            };
            let _ = writeln!(out, "    {marker}{loc} = {value}");
        }
    }

    out.push('\n');
}

fn location(file: &str, line: Option<u32>) -> String {
    match line {
        Some(line) => format!("{file}:{line}"),
        None => file.to_string(),
    }
}
