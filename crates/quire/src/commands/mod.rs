//! CLI command implementations.

pub(crate) mod index;
pub(crate) mod serve;

pub(crate) use index::IndexArgs;
pub(crate) use serve::ServeArgs;
