//! Environment variable resolution with precedence tracking
//!
//! The resolver scans a directory for layered configuration sources, turns
//! every variable occurrence into a [`Source`] observation, and aggregates
//! observations per name into a [`Variable`] whose final value is decided by
//! a fixed layer precedence:
//!
//! 1. `.env.example` templates (lowest)
//! 2. `.env` base files
//! 3. `.env.local` overrides
//! 4. Other `.env.*` variants
//! 5. Compose `env_file` references
//! 6. Compose inline `environment` entries
//! 7. OS environment (highest, opt-in)

mod compare;
mod compose;
mod envfile;
mod layer;
mod resolve;
mod source;

pub use compare::{compare, CompareResult, DiffVar};
pub use layer::Layer;
pub use resolve::{resolve, resolve_with_options};
pub use source::{Options, ResolveError, Resolution, Source, Variable};
