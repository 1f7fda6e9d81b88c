//! Output formatting for resolution results
//!
//! Every formatter is a read-only consumer of the resolver's data
//! structures; nothing here feeds back into resolution.

mod compare;
mod effective;
mod json;
mod markdown;
mod text;

pub use compare::format_compare;
pub use effective::format_effective;
pub use json::format_json;
pub use markdown::format_markdown;
pub use text::format_text;
