//! Partial-product binary multiplication.

use binsteps_types::{Binary, OperationResult, Step};

use crate::add::add_bits;
use crate::trace::splice;

/// Multiply two binary numerals by generating one partial product per bit of
/// `b` and folding the nonzero rows through the addition walk.
#[must_use]
pub fn multiply(a: &Binary, b: &Binary) -> OperationResult {
    let n1 = a.as_str();
    let n2 = b.as_str();

    let mut steps = Vec::new();
    let mut partial_products: Vec<String> = Vec::new();

    let row_width = n1.len() + n2.len() - 1;
    let mut table = format!(
        "   {n1}\nx  {n2}\n{}\n",
        "-".repeat(n1.len().max(n2.len()) + 3)
    );

    for (shift, bit) in n2.chars().rev().enumerate() {
        let product = if bit == '1' {
            format!("{n1}{}", "0".repeat(shift))
        } else {
            "0".repeat(n1.len() + shift)
        };
        table.push_str(&format!(
            "   {product:>row_width$}  (-> {n1} * {bit}, shifted {shift} times)\n"
        ));
        partial_products.push(product);
    }

    steps.push(Step::with_calculation(
        "1. Partial products",
        "Multiply the first number by each bit of the second (right to left). \
         If the bit is 1, copy the first number; if it is 0, the row is all \
         zeros. Each new row is shifted one place to the left.",
        table,
    ));

    steps.push(Step::narrative(
        "2. Sum of the partial products",
        "Next, add together all the partial products computed above to obtain \
         the final result.",
    ));

    // Zero rows contribute nothing to the fold; skipping them keeps the trace
    // focused on additions that change the accumulator.
    let nonzero: Vec<&str> = partial_products
        .iter()
        .map(String::as_str)
        .filter(|product| product.bytes().any(|byte| byte == b'1'))
        .collect();

    let mut product = String::from("0");
    for (index, row) in nonzero.iter().copied().enumerate() {
        if index == 0 {
            product = row.to_string();
            steps.push(Step::narrative(
                "2.1: Start with the first partial product",
                format!("The initial running total is the first nonzero partial product: {row}."),
            ));
            continue;
        }

        steps.push(Step::narrative(
            format!("2.{}: Adding the next partial product", index + 1),
            format!("Add the running total ({product}) and the next partial product ({row})."),
        ));
        let (next, addition_steps) = add_bits(&product, row);
        splice(&mut steps, addition_steps, "... addition detail: ");
        product = next;
    }

    steps.push(Step::with_calculation(
        "Final result of the multiplication",
        "After adding all the partial products, we obtain the final result.",
        format!("Result: {product}"),
    ));

    let value = Binary::new(product).expect("product is a non-empty bit string");
    OperationResult::new(value, steps)
}
