//! Complement-based binary subtraction.
//!
//! Both methods reduce subtraction to one or more calls into the addition
//! walk and splice the inner traces under relabeled titles. They treat the
//! operands as unsigned magnitudes and require `a >= b`; a violated
//! precondition is reported as data, not a panic.

use std::cmp::Ordering;

use binsteps_types::{Binary, EngineError, OperationResult, Step, SubtractMethod};

use crate::add::add_bits;
use crate::trace::{ones_complement, pad_zeros, splice};

/// Subtract `b` from `a` using the chosen complement method.
#[must_use]
pub fn subtract(a: &Binary, b: &Binary, method: SubtractMethod) -> OperationResult {
    if a.cmp_magnitude(b) == Ordering::Less {
        tracing::debug!(a = %a, b = %b, "subtraction precondition violated");
        return OperationResult::failed(
            EngineError::UnsupportedNegativeResult,
            Step::narrative(
                "Error",
                "The second number cannot be larger than the first for this \
                 implementation (the result would be negative).",
            ),
        );
    }

    match method {
        SubtractMethod::TwosComplement => twos_complement(a, b),
        SubtractMethod::OnesComplement => ones_complement_method(a, b),
    }
}

fn twos_complement(a: &Binary, b: &Binary) -> OperationResult {
    let width = a.len().max(b.len());
    let n1 = pad_zeros(a.as_str(), width);
    let n2 = pad_zeros(b.as_str(), width);

    let mut steps = vec![Step::with_calculation(
        "1. Preparation",
        format!(
            "We will use the two's-complement method to subtract {n2} from {n1}. \
             First, both numbers are padded to the same length."
        ),
        format!("Number 1: {n1}\nNumber 2: {n2}"),
    )];

    let ones = ones_complement(&n2);
    steps.push(Step::with_calculation(
        "2. One's complement",
        format!("Invert every bit of the second number ({n2}) to obtain its one's complement."),
        format!("The one's complement of {n2} is {ones}"),
    ));

    let (twos, increment_steps) = add_bits(&ones, "1");
    steps.push(Step::with_calculation(
        "3. Two's complement",
        "Add 1 to the one's complement to obtain the two's complement. This \
         represents the negative of the original number. The increment is \
         detailed below.",
        format!("{ones} + 1 = {twos}"),
    ));
    splice(&mut steps, increment_steps, "Step 3 (increment detail) - ");

    steps.push(Step::narrative(
        "4. Add the original number and the two's complement",
        format!(
            "The subtraction now becomes an addition. We add the first number \
             ({n1}) and the two's complement of the second. The operation is \
             detailed step by step below."
        ),
    ));
    let (raw_sum, addition_steps) = add_bits(&n1, &pad_zeros(&twos, n1.len()));
    splice(&mut steps, addition_steps, "Step 4 (addition detail) - ");

    let mut diff = raw_sum.clone();
    if raw_sum.len() > width {
        diff = raw_sum[1..].to_string();
        steps.push(Step::with_calculation(
            "5. Discard the final carry",
            "In two's-complement subtraction, when the final addition produces a \
             carry beyond the original width, that carry is discarded to obtain \
             the correct result. Unlike the one's-complement method, it is not \
             added back in.",
            format!("Result of the addition: {raw_sum}\nDiscard the leading '1' -> {diff}"),
        ));
    }

    if diff.is_empty() {
        diff.push('0');
    }
    let value = Binary::new(diff).expect("difference is a non-empty bit string");
    OperationResult::new(value, steps)
}

fn ones_complement_method(a: &Binary, b: &Binary) -> OperationResult {
    // Equal magnitudes (including equal-after-padding inputs such as "0101"
    // and "101") short-circuit to zero; the complement machinery below relies
    // on a strictly greater minuend to generate its end-around carry.
    if a.cmp_magnitude(b) == Ordering::Equal {
        let zeros = "0".repeat(a.len().max(1));
        let value = Binary::new(zeros.clone()).expect("zero run is a valid numeral");
        return OperationResult::new(
            value,
            vec![Step::with_calculation(
                "Subtracting a number from itself",
                "Subtracting a number from itself always yields zero.",
                format!("{a} - {b} = {zeros}"),
            )],
        );
    }

    let width = a.len().max(b.len());
    let n1 = pad_zeros(a.as_str(), width);
    let n2 = pad_zeros(b.as_str(), width);

    let mut steps = vec![Step::with_calculation(
        "1. Preparation",
        format!(
            "We will use the one's-complement method to subtract {n2} from {n1}. \
             First, both numbers are padded to the same length."
        ),
        format!("Number 1 (minuend): {n1}\nNumber 2 (subtrahend): {n2}"),
    )];

    let ones = ones_complement(&n2);
    steps.push(Step::with_calculation(
        "2. One's complement of the subtrahend",
        format!("Invert every bit of the second number ({n2}) to obtain its one's complement."),
        format!("The one's complement of {n2} is {ones}"),
    ));

    steps.push(Step::narrative(
        "3. Add the minuend and the one's complement",
        format!(
            "The subtraction now becomes an addition. We add the first number \
             ({n1}) and the one's complement of the second. The operation is \
             detailed below."
        ),
    ));
    let (intermediate, addition_steps) = add_bits(&n1, &ones);
    splice(&mut steps, addition_steps, "Step 3 (addition detail) - ");

    if intermediate.len() > width {
        let without_carry = intermediate[1..].to_string();
        steps.push(Step::with_calculation(
            "4. End-around carry",
            "The addition produced a carry (the extra '1' on the left). In the \
             one's-complement method this carry must be added back into the \
             intermediate result to obtain the final answer.",
            format!(
                "Result of the addition: {intermediate}\nIntermediate result without the carry: {without_carry}\nCarry to add back: 1"
            ),
        ));

        steps.push(Step::narrative(
            "5. Add the carry",
            "Add the end-around carry to the intermediate result to reach the \
             final answer.",
        ));
        let (final_sum, carry_steps) = add_bits(&without_carry, "1");
        splice(&mut steps, carry_steps, "Step 5 (final addition detail) - ");

        let value =
            Binary::new(pad_zeros(&final_sum, width)).expect("difference is a non-empty bit string");
        return OperationResult::new(value, steps);
    }

    // A strictly greater minuend always carries out of the padded width, so
    // reaching this branch means the guards above were bypassed.
    tracing::warn!(a = %a, b = %b, "one's-complement subtraction produced no end-around carry");
    OperationResult::failed(
        EngineError::InternalInconsistency,
        Step::narrative(
            "Unexpected error",
            "No final carry was produced, which indicates an unsupported \
             negative result.",
        ),
    )
}
