//! Step-traced binary arithmetic.
//!
//! # Architecture
//!
//! Three pure entry points, all returning an
//! [`OperationResult`](binsteps_types::OperationResult) (final value plus an
//! ordered pedagogical step trace):
//!
//! - [`add`] - column-by-column addition with carry propagation
//! - [`subtract`] - complement-based subtraction, built on top of [`add`]
//! - [`multiply`] - partial-product multiplication, built on top of [`add`]
//!
//! Subtraction and multiplication never duplicate the addition walk: they
//! call [`add`] internally and splice its trace into their own under a
//! relabeling prefix. There is no shared mutable trace
//! buffer and no cross-call state; every invocation allocates a fresh trace,
//! so identical inputs always produce identical output.
//!
//! # Error Handling
//!
//! Precondition violations are returned as data, never panics: the outcome
//! is [`Outcome::Failed`](binsteps_types::Outcome) and the trace holds a
//! single explanatory step. See `binsteps_types::EngineError` for the two
//! conditions.

mod add;
mod multiply;
mod subtract;
mod trace;

pub use add::add;
pub use multiply::multiply;
pub use subtract::subtract;

pub use binsteps_types as types;
