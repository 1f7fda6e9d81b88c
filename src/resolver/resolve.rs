//! Directory scanning and precedence resolution
//!
//! `resolve` walks a base directory in a fixed, deterministic order, feeds
//! every discovered artifact through the ingestors, then finalizes the
//! aggregated observations into a [`Resolution`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::compose::{env_file_paths, inline_entries, ComposeFile};
use super::envfile::parse_env_content;
use super::layer::Layer;
use super::source::{Options, ResolveError, Resolution, Source, Variable};

/// Fixed-name env files, in ascending precedence order.
const ENV_PATTERNS: [(&str, Layer); 3] = [
    (".env.example", Layer::EnvExample),
    (".env", Layer::Env),
    (".env.local", Layer::EnvLocal),
];

/// Compose manifest filename candidates, in scan order.
const COMPOSE_PATTERNS: [&str; 4] = [
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

/// Scan `base_path` and resolve all environment variables with default options.
pub fn resolve(base_path: &Path) -> Result<Resolution, ResolveError> {
    resolve_with_options(base_path, &Options::default())
}

/// Scan `base_path` and resolve all environment variables.
///
/// Artifact-level problems degrade to warnings on the returned [`Resolution`];
/// an empty or nonexistent directory is a successful empty result. The only
/// failure is the strict-mode policy check, and even then the partial
/// resolution travels inside the error.
pub fn resolve_with_options(base_path: &Path, opts: &Options) -> Result<Resolution, ResolveError> {
    let mut builder = Builder::new(base_path.display().to_string());

    // Fixed-name env files first, in precedence order.
    for (pattern, layer) in ENV_PATTERNS {
        let path = base_path.join(pattern);
        if path.is_file() {
            builder.ingest_env_file(&path, layer, None);
        }
    }

    // Other .env.* variants, pinned to alphabetical order so same-layer
    // tie-breaks do not depend on directory listing order.
    for name in other_variant_names(base_path) {
        builder.ingest_env_file(&base_path.join(&name), Layer::EnvOther, None);
    }

    // Compose manifests, file references before inline entries per manifest.
    for pattern in COMPOSE_PATTERNS {
        let path = base_path.join(pattern);
        if path.is_file() {
            builder.ingest_compose_file(&path);
        }
    }

    let mut resolution = builder.finalize();

    if opts.include_os_env {
        merge_os_environ(&mut resolution);
    }

    if let Some(service) = opts.service.as_deref() {
        filter_to_service(&mut resolution, service);
    }

    if opts.strict {
        resolution.undefined = undefined_names(&resolution);
        if !resolution.undefined.is_empty() {
            let names = resolution.undefined.clone();
            return Err(ResolveError::UndefinedVariables {
                resolution: Box::new(resolution),
                names,
            });
        }
    }

    Ok(resolution)
}

/// `.env.*` files other than the fixed-name ones, sorted by name.
fn other_variant_names(base_path: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(base_path) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| {
            let name = entry.ok()?.file_name().into_string().ok()?;
            let fixed = ENV_PATTERNS.iter().any(|(pattern, _)| *pattern == name);
            (name.starts_with(".env.") && !fixed).then_some(name)
        })
        .collect();
    names.sort();
    names
}

/// Aggregation state for one resolve call. Collects observations per name,
/// then finalizes into an immutable-from-the-outside [`Resolution`].
struct Builder {
    resolution: Resolution,
    /// Observation chains in arrival order, keyed by variable name
    chains: HashMap<String, Vec<Source>>,
    /// Names in first-appearance order, so finalize is deterministic
    order: Vec<String>,
}

impl Builder {
    fn new(path: String) -> Self {
        Builder {
            resolution: Resolution::new(path),
            chains: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn add_source(&mut self, name: &str, source: Source) {
        let chain = self.chains.entry(name.to_string()).or_insert_with(|| {
            self.order.push(name.to_string());
            Vec::new()
        });
        chain.push(source);
    }

    fn warn(&mut self, message: String) {
        self.resolution.warnings.push(message);
    }

    /// Parse one plain env file, tagging every entry with `layer` and
    /// `service`. Tracked in `env_files` only for top-level discoveries;
    /// compose-referenced files are attributed to their manifest.
    fn ingest_env_file(&mut self, path: &Path, layer: Layer, service: Option<&str>) {
        let display = path.display().to_string();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                self.warn(format!("error parsing {display}: {err}"));
                return;
            }
        };

        if service.is_none() {
            self.resolution.env_files.push(display.clone());
        }

        for entry in parse_env_content(&content) {
            self.add_source(
                &entry.key,
                Source {
                    layer,
                    file: display.clone(),
                    line: Some(entry.line),
                    service: service.map(str::to_string),
                    value: entry.value,
                    inline: false,
                },
            );
        }
    }

    fn ingest_compose_file(&mut self, path: &Path) {
        let display = path.display().to_string();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                self.warn(format!("error parsing {display}: {err}"));
                return;
            }
        };

        let compose = match ComposeFile::parse(&content) {
            Ok(compose) => compose,
            Err(err) => {
                self.warn(format!("error parsing {display}: {err}"));
                return;
            }
        };

        self.resolution.compose_files.push(display.clone());

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        for (service, config) in &compose.services {
            // env_file references before inline entries, so same-name
            // observations keep a deterministic arrival order.
            if let Some(env_file) = &config.env_file {
                for reference in env_file_paths(env_file) {
                    let ref_path = base_dir.join(&reference);
                    if ref_path.is_file() {
                        self.ingest_env_file(&ref_path, Layer::ComposeEnvFile, Some(service));
                    }
                }
            }

            if let Some(environment) = &config.environment {
                for entry in inline_entries(environment) {
                    self.add_source(
                        &entry.key,
                        Source {
                            layer: Layer::ComposeInline,
                            file: display.clone(),
                            line: None,
                            service: Some(service.clone()),
                            value: entry.value,
                            inline: true,
                        },
                    );
                }
            }
        }
    }

    /// Sort each chain, decide winners, detect conflicts, and emit the
    /// variable list sorted by name.
    fn finalize(mut self) -> Resolution {
        let mut variables = Vec::with_capacity(self.order.len());

        for name in &self.order {
            let mut chain = self.chains.remove(name).unwrap_or_default();
            debug_assert!(!chain.is_empty(), "variables are created on first source");

            // Stable sort: same-layer observations keep arrival order.
            chain.sort_by_key(|source| source.layer.precedence());

            let final_from = chain.last().cloned().expect("chain is non-empty");
            let final_value = final_from.value.clone();

            // Distinct non-empty values, in chain order. Empty values never
            // count toward conflicts.
            let mut distinct: Vec<&str> = Vec::new();
            for source in &chain {
                if !source.value.is_empty() && !distinct.contains(&source.value.as_str()) {
                    distinct.push(&source.value);
                }
            }

            let overridden = distinct.len() > 1;
            let conflicts = if overridden {
                distinct
                    .iter()
                    .filter(|value| **value != final_value)
                    .map(|value| value.to_string())
                    .collect()
            } else {
                Vec::new()
            };

            variables.push(Variable {
                name: name.clone(),
                final_value,
                final_from,
                chain,
                overridden,
                conflicts,
            });
        }

        variables.sort_by(|a, b| a.name.cmp(&b.name));
        self.resolution.set_variables(variables);
        self.resolution
    }
}

/// Merge the OS environment as the highest-precedence layer.
///
/// Only names already tracked from file or manifest sources are merged;
/// everything else in the process environment is irrelevant to the project
/// and ignored. The ambient observation is appended without re-sorting since
/// its layer is defined to be maximal.
fn merge_os_environ(resolution: &mut Resolution) {
    for (name, value) in std::env::vars() {
        let Some(variable) = resolution.get_mut(&name) else {
            continue;
        };

        let source = Source {
            layer: Layer::OsEnviron,
            file: "environment".to_string(),
            line: None,
            service: None,
            value,
            inline: false,
        };

        variable.final_value = source.value.clone();
        variable.final_from = source.clone();
        variable.overridden = true;
        variable.chain.push(source);
    }
}

/// Keep only variables visible to `service`: those with at least one
/// observation scoped to it, or unscoped (file-level) observations.
fn filter_to_service(resolution: &mut Resolution, service: &str) {
    let variables = std::mem::take(&mut resolution.variables);
    let kept: Vec<Variable> = variables
        .into_iter()
        .filter(|variable| {
            variable
                .chain
                .iter()
                .any(|source| source.service.as_deref().map_or(true, |s| s == service))
        })
        .collect();
    resolution.set_variables(kept);
}

/// Names whose final value is empty and which never carried a non-empty
/// value anywhere in their chain. Distinguishes "defined as empty string"
/// (not undefined) from "referenced but never assigned".
fn undefined_names(resolution: &Resolution) -> Vec<String> {
    resolution
        .variables
        .iter()
        .filter(|variable| {
            variable.final_value.is_empty()
                && variable.chain.iter().all(|source| source.value.is_empty())
        })
        .map(|variable| variable.name.clone())
        .collect()
}
