//! Source layers and their precedence ordering

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// The layer a variable observation came from.
///
/// Layers form a strict total order; a value from a higher-precedence layer
/// overrides any value from a lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// `.env.example` template file
    EnvExample,
    /// `.env` base file
    Env,
    /// `.env.local` override file
    EnvLocal,
    /// Any other `.env.*` variant file
    EnvOther,
    /// An env file referenced from a compose `env_file` key
    ComposeEnvFile,
    /// An inline entry in a compose `environment` block
    ComposeInline,
    /// The resolving process's own environment
    OsEnviron,
}

impl Layer {
    /// Precedence ordinal; higher wins.
    ///
    /// Kept as an explicit table so the ordering survives reordering of the
    /// enum variants.
    pub fn precedence(self) -> u8 {
        match self {
            Layer::EnvExample => 0,
            Layer::Env => 1,
            Layer::EnvLocal => 2,
            Layer::EnvOther => 3,
            Layer::ComposeEnvFile => 4,
            Layer::ComposeInline => 5,
            Layer::OsEnviron => 6,
        }
    }

    /// Human-facing label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Layer::EnvExample => ".env.example",
            Layer::Env => ".env",
            Layer::EnvLocal => ".env.local",
            Layer::EnvOther => ".env.*",
            Layer::ComposeEnvFile => "compose env_file",
            Layer::ComposeInline => "compose inline",
            Layer::OsEnviron => "OS environment",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl PartialOrd for Layer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Layer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }
}

impl Serialize for Layer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
