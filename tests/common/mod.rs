//! Shared helpers for the integration suite.

use binsteps_types::{Binary, OperationResult};

pub fn bin(s: &str) -> Binary {
    Binary::new(s).unwrap_or_else(|e| panic!("invalid test numeral {s:?}: {e}"))
}

pub fn value_of(result: &OperationResult) -> String {
    result
        .outcome
        .value()
        .unwrap_or_else(|| panic!("operation unexpectedly failed: {result:?}"))
        .as_str()
        .to_string()
}

pub fn magnitude(bits: &str) -> u128 {
    u128::from_str_radix(bits, 2).unwrap()
}

/// The shortest binary rendering of `n` ("0" for zero).
pub fn to_bits(n: u128) -> String {
    format!("{n:b}")
}
