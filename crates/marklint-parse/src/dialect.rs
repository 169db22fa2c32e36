//! Per-parse-session dialect selection.
//!
//! The dialect hint is the only configuration a parse session takes. It
//! selects which recognizers are active in the tokenizer chain and whether
//! the Vue template-narrowing pass runs. There is no global tokenizer
//! state: two files with different dialects can be parsed in parallel.

use core::str::FromStr;

use strum_macros::Display;
use thiserror::Error;

/// The template syntax a file is declared to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Dialect {
    /// Plain HTML.
    Html,
    /// HTML with JSP-style embedded directives (`<%@ %>`), expressions
    /// (`<% %>`), and template comments (`<%-- --%>`).
    Jsp,
    /// HTML with PHP-style processing directives (`<? ?>`).
    Php,
    /// A Vue single-file component; analysis is narrowed to the first
    /// top-level `<template>` block.
    Vue,
    /// Every recognizer active. Used when the host tool has no better
    /// hint than "it is markup".
    Generic,
}

impl Dialect {
    /// Guess a dialect from a file extension (without the dot),
    /// case-insensitive. Returns `None` for extensions this analyzer does
    /// not claim.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" | "xhtml" | "cshtml" => Some(Self::Html),
            "jsp" | "jspf" | "jspx" | "tag" => Some(Self::Jsp),
            "php" | "php3" | "php4" | "php5" | "phtml" => Some(Self::Php),
            "vue" => Some(Self::Vue),
            _ => None,
        }
    }
}

/// Error returned when a dialect name cannot be recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown markup dialect '{0}'")]
pub struct DialectError(String);

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "jsp" => Ok(Self::Jsp),
            "php" => Ok(Self::Php),
            "vue" => Ok(Self::Vue),
            "generic" => Ok(Self::Generic),
            _ => Err(DialectError(s.to_string())),
        }
    }
}
