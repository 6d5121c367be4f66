//! Small shared helpers.
//!
//! This module provides:
//! - CSS selector parsing with a match-nothing fallback
//! - Static regex compilation
//! - Rounding for persisted measurements

mod selector;

pub use selector::{compile_regex_unsafe, parse_selector_unsafe, parse_selector_with_fallback};

/// Rounds to two decimal places (load times, averages).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
