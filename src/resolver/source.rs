//! Resolution data model
//!
//! [`Source`] is one observation of a variable in one place; [`Variable`]
//! aggregates every observation sharing a name; [`Resolution`] is the
//! complete result for one scanned directory.

use std::collections::HashMap;

use serde::Serialize;

use super::layer::Layer;

/// Where a variable value came from: one occurrence in one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// Owning precedence layer
    pub layer: Layer,

    /// Originating file path, or the synthetic token `environment` for the
    /// OS environment
    pub file: String,

    /// 1-indexed line number; `None` for structured and ambient sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Compose service the observation is scoped to; `None` means unscoped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Literal value with surrounding quotes stripped; may be empty
    pub value: String,

    /// True for compose inline `environment` entries
    pub inline: bool,
}

/// A resolved environment variable: all observations for one name plus the
/// computed outcome.
#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    /// Variable name (case-sensitive)
    pub name: String,

    /// Value of the highest-precedence observation
    pub final_value: String,

    /// The observation that won
    pub final_from: Source,

    /// All observations, sorted ascending by layer precedence; same-layer
    /// observations keep discovery order
    pub chain: Vec<Source>,

    /// True iff at least two observations carry different non-empty values
    pub overridden: bool,

    /// Distinct non-empty values other than the final one, in chain order
    pub conflicts: Vec<String>,
}

/// The complete resolution result for one scanned directory.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// The scanned base directory
    pub path: String,

    /// All resolved variables, sorted by name
    pub variables: Vec<Variable>,

    /// Plain env files that were discovered and parsed
    pub env_files: Vec<String>,

    /// Compose manifests that were discovered and parsed
    pub compose_files: Vec<String>,

    /// Non-fatal per-artifact problems encountered during the scan
    pub warnings: Vec<String>,

    /// Names referenced somewhere but never assigned a non-empty value;
    /// populated in strict mode only
    pub undefined: Vec<String>,

    /// Authoritative name index into `variables`
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl Resolution {
    pub(crate) fn new(path: String) -> Self {
        Resolution {
            path,
            variables: Vec::new(),
            env_files: Vec::new(),
            compose_files: Vec::new(),
            warnings: Vec::new(),
            undefined: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Look up a variable by exact name.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.by_name.get(name).map(|&i| &self.variables[i])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        let idx = *self.by_name.get(name)?;
        Some(&mut self.variables[idx])
    }

    /// Install `variables` (already sorted by name) and rebuild the index.
    pub(crate) fn set_variables(&mut self, variables: Vec<Variable>) {
        self.by_name = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name.clone(), i))
            .collect();
        self.variables = variables;
    }
}

/// Options controlling a resolve call.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Merge the OS environment as a highest-precedence layer
    pub include_os_env: bool,

    /// Keep only variables visible to this compose service
    pub service: Option<String>,

    /// Fail the resolve call if undefined variables remain
    pub strict: bool,
}

/// Errors a resolve call can return.
///
/// Per-artifact problems never surface here; they degrade to warnings on the
/// [`Resolution`]. The only fatal condition is the strict-mode policy check.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("strict mode: {} undefined variable(s): {}", .names.len(), .names.join(", "))]
    UndefinedVariables {
        /// The partially-built resolution, still usable for diagnostics
        resolution: Box<Resolution>,
        /// The undefined names, sorted
        names: Vec<String>,
    },
}

impl ResolveError {
    /// The resolution that was built before the failure, for diagnostic output.
    pub fn partial_resolution(&self) -> &Resolution {
        match self {
            ResolveError::UndefinedVariables { resolution, .. } => resolution,
        }
    }
}
