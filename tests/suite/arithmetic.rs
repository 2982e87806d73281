//! End-to-end properties of the arithmetic engine.
//!
//! The unit tests inside the engine crate cover trace shape per operation;
//! this suite checks numeric correctness across a dense input space and the
//! cross-operation agreements the engine promises.

use binsteps_engine::{add, multiply, subtract};
use binsteps_types::{EngineError, Outcome, SubtractMethod, flatten_steps};

use crate::common::{bin, magnitude, to_bits, value_of};

/// Every pair of values up to six bits wide, in their shortest rendering.
fn small_pairs() -> impl Iterator<Item = (String, String)> {
    (0u128..64).flat_map(|a| (0u128..64).map(move |b| (to_bits(a), to_bits(b))))
}

#[test]
fn addition_matches_integer_arithmetic_exhaustively() {
    for (a, b) in small_pairs() {
        let result = add(&bin(&a), &bin(&b));
        assert_eq!(
            magnitude(&value_of(&result)),
            magnitude(&a) + magnitude(&b),
            "add({a}, {b})"
        );
    }
}

#[test]
fn addition_length_grows_by_at_most_one() {
    for (a, b) in small_pairs() {
        let width = a.len().max(b.len());
        let sum = value_of(&add(&bin(&a), &bin(&b)));
        assert!(
            sum.len() == width || sum.len() == width + 1,
            "add({a}, {b}) = {sum}"
        );
    }
}

#[test]
fn addition_is_commutative_in_value() {
    for (a, b) in small_pairs() {
        assert_eq!(
            value_of(&add(&bin(&a), &bin(&b))),
            value_of(&add(&bin(&b), &bin(&a))),
            "add({a}, {b})"
        );
    }
}

#[test]
fn subtraction_methods_agree_exhaustively() {
    for (a, b) in small_pairs() {
        if magnitude(&a) < magnitude(&b) {
            continue;
        }
        let expected = magnitude(&a) - magnitude(&b);
        let twos = subtract(&bin(&a), &bin(&b), SubtractMethod::TwosComplement);
        let ones = subtract(&bin(&a), &bin(&b), SubtractMethod::OnesComplement);
        assert_eq!(magnitude(&value_of(&twos)), expected, "twos {a} - {b}");
        assert_eq!(magnitude(&value_of(&ones)), expected, "ones {a} - {b}");
    }
}

#[test]
fn subtraction_rejects_negative_results_exhaustively() {
    for (a, b) in small_pairs() {
        if magnitude(&a) >= magnitude(&b) {
            continue;
        }
        for method in [SubtractMethod::TwosComplement, SubtractMethod::OnesComplement] {
            let result = subtract(&bin(&a), &bin(&b), method);
            assert_eq!(
                result.outcome,
                Outcome::Failed(EngineError::UnsupportedNegativeResult),
                "{method:?} {a} - {b}"
            );
            assert_eq!(result.steps.len(), 1, "{method:?} {a} - {b}");
        }
    }
}

#[test]
fn equal_magnitude_boundary_never_hits_the_inconsistency_branch() {
    // Equal magnitudes in unequal renderings used to be the gap between the
    // identity short-circuit (string equality) and the precondition check
    // (numeric comparison); the short-circuit now compares magnitudes, so no
    // combination of paddings can reach the no-carry fallback.
    let renderings = [
        ("101", "101"),
        ("0101", "101"),
        ("101", "00101"),
        ("0", "000"),
        ("0000", "0"),
    ];
    for (a, b) in renderings {
        let result = subtract(&bin(a), &bin(b), SubtractMethod::OnesComplement);
        let value = value_of(&result);
        assert!(value.bytes().all(|byte| byte == b'0'), "{a} - {b} = {value}");
        assert_eq!(value.len(), a.len().max(1), "{a} - {b}");
        assert_eq!(result.steps.len(), 1, "{a} - {b}");
    }
}

#[test]
fn self_subtraction_is_all_zeros() {
    for n in 0u128..64 {
        let a = to_bits(n);
        let result = subtract(&bin(&a), &bin(&a), SubtractMethod::OnesComplement);
        let value = value_of(&result);
        assert_eq!(value, "0".repeat(a.len()), "{a} - {a}");
    }
}

#[test]
fn multiplication_matches_integer_arithmetic_exhaustively() {
    for (a, b) in small_pairs() {
        let result = multiply(&bin(&a), &bin(&b));
        assert_eq!(
            magnitude(&value_of(&result)),
            magnitude(&a) * magnitude(&b),
            "multiply({a}, {b})"
        );
    }
}

#[test]
fn operations_are_pure() {
    // Identical inputs must produce identical values and identical traces,
    // in both content and order.
    let a = bin("110101");
    let b = bin("01110");
    for _ in 0..3 {
        assert_eq!(add(&a, &b), add(&a, &b));
        assert_eq!(
            subtract(&a, &b, SubtractMethod::OnesComplement),
            subtract(&a, &b, SubtractMethod::OnesComplement)
        );
        assert_eq!(multiply(&a, &b), multiply(&a, &b));
    }
}

#[test]
fn documented_scenarios() {
    assert_eq!(value_of(&add(&bin("1010"), &bin("0110"))), "10000");
    assert_eq!(value_of(&add(&bin("111"), &bin("1"))), "1000");
    assert_eq!(
        value_of(&subtract(
            &bin("1010"),
            &bin("0011"),
            SubtractMethod::TwosComplement
        )),
        "0111"
    );
    assert_eq!(
        value_of(&subtract(
            &bin("101"),
            &bin("101"),
            SubtractMethod::OnesComplement
        )),
        "000"
    );
    assert_eq!(value_of(&multiply(&bin("110"), &bin("101"))), "11110");

    let negative = subtract(&bin("10"), &bin("11"), SubtractMethod::TwosComplement);
    assert_eq!(
        negative.outcome,
        Outcome::Failed(EngineError::UnsupportedNegativeResult)
    );
}

#[test]
fn traces_nest_inner_additions_in_order() {
    let result = subtract(&bin("1010"), &bin("0011"), SubtractMethod::TwosComplement);
    let titles: Vec<&str> = result.steps.iter().map(|s| s.title.as_str()).collect();

    // Phases appear in derivation order, with spliced detail directly after
    // its narrative parent.
    let prep = titles.iter().position(|t| *t == "1. Preparation").unwrap();
    let twos = titles
        .iter()
        .position(|t| *t == "3. Two's complement")
        .unwrap();
    let increment_detail = titles
        .iter()
        .position(|t| t.starts_with("Step 3 (increment detail) - "))
        .unwrap();
    let addition = titles
        .iter()
        .position(|t| *t == "4. Add the original number and the two's complement")
        .unwrap();
    let addition_detail = titles
        .iter()
        .position(|t| t.starts_with("Step 4 (addition detail) - "))
        .unwrap();

    assert!(prep < twos);
    assert!(twos < increment_detail);
    assert!(increment_detail < addition);
    assert!(addition < addition_detail);
}

#[test]
fn flattened_trace_carries_every_step() {
    let result = multiply(&bin("110"), &bin("101"));
    let text = flatten_steps(&result.steps);
    for step in &result.steps {
        assert!(text.contains(&step.title), "missing title {:?}", step.title);
        assert!(
            text.contains(&step.description),
            "missing description for {:?}",
            step.title
        );
    }
}
