//! Node value representation
//!
//! This module defines the [`Value`] enum stored in every tree node. A value is
//! either a finite number or an arbitrary string, mirroring what users type into
//! the visualizer's input box.
//!
//! # Coercion
//!
//! Strings that look like numbers are coerced with [`Value::normalize`], so
//! `"10"` and `10` are the same value once they reach the tree.
//!
//! # Ordering
//!
//! [`compare_values`] is the single comparison rule used by the BST algorithms
//! and by every equality check in search/delete: numeric comparison when both
//! sides are numeric, byte-wise string comparison otherwise.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A node value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Parse user input into a value, coercing numeric-looking text
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match parse_finite(trimmed) {
            Some(n) => Value::Number(n),
            None => Value::Text(trimmed.to_string()),
        }
    }

    /// Coerce numeric-looking text to a number; non-finite numbers become text
    pub fn normalize(self) -> Self {
        match self {
            Value::Text(s) => Value::parse(&s),
            Value::Number(n) if !n.is_finite() => Value::Text(n.to_string()),
            other => other,
        }
    }

    /// Get the numeric reading of this value, if it has one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Number(_) => None,
            Value::Text(s) => parse_finite(s.trim()),
        }
    }

    /// Check if this value carries no usable content
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Text(s) if s.trim().is_empty())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::parse(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral numbers print without the trailing ".0"
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    // Adding 0.0 folds -0 into 0
    s.parse::<f64>().ok().filter(|n| n.is_finite()).map(|n| n + 0.0)
}

/// Compare two values: numerically if both are numeric, lexicographically otherwise
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.as_number(), b.as_number()) {
        // Finite on both sides; partial_cmp treats -0 and 0 as equal
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// Equality under [`compare_values`]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    compare_values(a, b) == Ordering::Equal
}
