//! Column-by-column binary addition.

use binsteps_types::{Binary, OperationResult, Step};

use crate::trace::pad_zeros;

/// Add two binary numerals, tracing every column.
///
/// The trace contains one alignment step, one step per column (least
/// significant first), and, when the final column carries out, one overflow
/// step. That overflow is the only way the result grows past the common
/// padded width, so the sum never carries a superfluous leading zero and
/// never silently drops its true leading carry.
#[must_use]
pub fn add(a: &Binary, b: &Binary) -> OperationResult {
    let (sum, steps) = add_bits(a.as_str(), b.as_str());
    let value = Binary::new(sum).expect("column walk always yields at least one bit");
    OperationResult::new(value, steps)
}

/// String-level addition shared with subtraction and multiplication, which
/// feed it intermediate values (complements, partial products) that are
/// well-formed by construction.
pub(crate) fn add_bits(a: &str, b: &str) -> (String, Vec<Step>) {
    let width = a.len().max(b.len());
    let n1 = pad_zeros(a, width);
    let n2 = pad_zeros(b, width);

    let mut steps = vec![Step::with_calculation(
        "1. Alignment",
        "Align the numbers so that bits in the same position line up. \
         The shorter number is left-padded with zeros to match lengths.",
        format!("  {n1}\n+ {n2}"),
    )];

    let x = n1.as_bytes();
    let y = n2.as_bytes();
    let mut sum = String::with_capacity(width + 1);
    let mut carry = 0u8;

    for i in (0..width).rev() {
        let bit1 = x[i] - b'0';
        let bit2 = y[i] - b'0';
        let column_sum = bit1 + bit2 + carry;
        let result_bit = column_sum % 2;
        let next_carry = column_sum / 2;

        sum.insert(0, char::from(b'0' + result_bit));

        // Column index counts from the least-significant bit.
        let column = width - 1 - i;
        let padding = " ".repeat(width - sum.len());
        let pointer = format!("{}^", " ".repeat(i));

        let mut calculation = format!(
            "  {n1}\n+ {n2}\n{}\n  {padding}{sum}\n  {pointer}\n\n",
            "-".repeat(width + 2)
        );
        calculation.push_str("Breakdown of the marked column (^):\n");
        calculation.push_str(&format!(
            "  {bit1} (from {n1})\n+ {bit2} (from {n2})\n+ {carry} (carry from the previous column)\n{}\n= {column_sum}\n\n",
            "-".repeat(25)
        ));
        calculation.push_str(&format!(
            "From the sum {column_sum}, the result bit is {result_bit} and the new carry into the next column is {next_carry}."
        ));

        steps.push(Step::with_calculation(
            format!("2.{}: Adding column {column}", column + 1),
            format!(
                "Add the bits in column {column} (counting from the right) plus the carry from the previous column."
            ),
            calculation,
        ));

        carry = next_carry;
    }

    if carry > 0 {
        sum.insert(0, '1');
        steps.push(Step::with_calculation(
            "Final step: leftover carry",
            "The last addition produced a carry. Since there are no columns left, \
             this carry becomes the most significant bit of the final result.",
            format!(
                "Intermediate result: {}\nFinal carry: 1\nFinal result: {sum}",
                &sum[1..]
            ),
        ));
    }

    (sum, steps)
}
