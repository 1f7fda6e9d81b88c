//! JSON report
//!
//! Uses dedicated view structs rather than serializing the resolver types
//! directly, so the wire shape stays stable even if the internal model grows
//! fields. The override chain is only included for overridden variables.

use serde::Serialize;

use crate::resolver::{Resolution, Source};

#[derive(Serialize)]
struct JsonSource<'a> {
    layer: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service: Option<&'a str>,
    value: &'a str,
}

#[derive(Serialize)]
struct JsonVariable<'a> {
    name: &'a str,
    final_value: &'a str,
    final_from: JsonSource<'a>,
    overridden: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    chain: Vec<JsonSource<'a>>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    path: &'a str,
    env_files: &'a [String],
    compose_files: &'a [String],
    variables: Vec<JsonVariable<'a>>,
    #[serde(skip_serializing_if = "no_warnings")]
    warnings: &'a [String],
}

fn no_warnings(warnings: &&[String]) -> bool {
    warnings.is_empty()
}

fn json_source(source: &Source) -> JsonSource<'_> {
    JsonSource {
        layer: source.layer.to_string(),
        file: &source.file,
        line: source.line,
        service: source.service.as_deref(),
        value: &source.value,
    }
}

/// Render a resolution as pretty-printed JSON.
pub fn format_json(resolution: &Resolution) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        path: &resolution.path,
        env_files: &resolution.env_files,
        compose_files: &resolution.compose_files,
        variables: resolution
            .variables
            .iter()
            .map(|variable| JsonVariable {
                name: &variable.name,
                final_value: &variable.final_value,
                final_from: json_source(&variable.final_from),
                overridden: variable.overridden,
                chain: if variable.overridden {
                    variable.chain.iter().map(json_source).collect()
                } else {
                    Vec::new()
                },
            })
            .collect(),
        warnings: &resolution.warnings,
    };

    serde_json::to_string_pretty(&report)
}
