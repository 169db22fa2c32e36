//! Common utilities for the marklint analysis core.
//!
//! This crate provides shared infrastructure used by the parser components:
//! - **Warning System** - deduplicated, colored terminal output for
//!   tolerated-but-suspect constructs encountered while parsing

pub mod warning;
