//! Markup tokenizer: an ordered chain of specialized recognizers.
//!
//! Each recognizer implements the same contract — look at the cursor, and
//! either consume exactly one token or report no match so the next one is
//! tried. The chain always terminates in the catch-all text recognizer,
//! so lexing never fails and always makes progress.

/// Chain construction and the lexer main loop.
pub mod chain;
/// Fixed-delimiter recognizers (comments, directives, expressions, CDATA).
pub mod delimited;
/// Element tag recognizer and attribute sub-parser.
pub mod element;
/// Catch-all text recognizer.
pub mod text;

pub use chain::TokenizerChain;
