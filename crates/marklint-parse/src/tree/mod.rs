//! Tree construction: from the flat token sequence to a hierarchy.

/// The one-pass stack-based tree builder.
pub mod builder;
/// Void-element, implicit-closing, and known-element tables.
pub mod tables;
