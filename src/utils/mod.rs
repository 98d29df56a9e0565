/// Utility modules for the comment analyzer
///
/// This module contains logging handles, validation utilities, text helpers,
/// and output formatting.

pub mod helpers;
pub mod logging;
pub mod output_formatter;
pub mod validators;
