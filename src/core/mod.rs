/// Core module for comment analysis
///
/// This module contains the comment extraction engine, the pattern table it
/// scans with, the metadata analyzer, and the typed error kinds.

pub mod analyzer;
pub mod errors;
pub mod parser;
pub mod patterns;
