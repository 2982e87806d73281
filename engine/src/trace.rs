//! Trace composition helpers shared by the three operations.

use binsteps_types::Step;

/// Splice an inner operation's steps into `parent`, prepending `prefix` to
/// every title so the reader can tell nested detail from top-level phases.
pub(crate) fn splice(parent: &mut Vec<Step>, inner: Vec<Step>, prefix: &str) {
    parent.extend(inner.iter().map(|step| step.prefixed(prefix)));
}

/// Left-pad `bits` with zeros to `width`. Returns an owned copy; the input
/// is never mutated in place.
pub(crate) fn pad_zeros(bits: &str, width: usize) -> String {
    if bits.len() >= width {
        return bits.to_string();
    }
    let mut padded = "0".repeat(width - bits.len());
    padded.push_str(bits);
    padded
}

/// Bitwise NOT of a binary string.
pub(crate) fn ones_complement(bits: &str) -> String {
    bits.chars()
        .map(|bit| if bit == '0' { '1' } else { '0' })
        .collect()
}
