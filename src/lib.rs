//! envlens - Environment Resolution Inspector
//!
//! This crate explains what environment variables actually resolve to and
//! why. It traces precedence across `.env` files, `.env.local` overrides,
//! `.env.example` templates, compose `env_file` references, compose inline
//! `environment` blocks, and (optionally) the OS environment.
//!
//! Use it to understand silent misconfigurations before they cause problems.

pub mod reporter;
pub mod resolver;

pub use resolver::{
    compare, resolve, resolve_with_options, CompareResult, DiffVar, Layer, Options, ResolveError,
    Resolution, Source, Variable,
};
