//! Entity documents: where they come from and how they are parsed.

pub mod parse;
pub mod source;

pub use parse::{ParsedEntities, parse_entities};
pub use source::{ResolvedSource, SourceKind, resolve_source};
