//! # Expression tree
//!
//! The target of the builder: a tree of nested function applications that a
//! functional query engine evaluates against a tabular result.
//!
//! - **[expressions]** - expression nodes (variables, properties, functions, lambdas, collections)
//! - **[literal]** - typed constants
//! - **[multiplicity]** - result multiplicity carried for the evaluator
//! - **wire** - the `_type`-tagged JSON protocol
//!
//! ## Shape of a compiled pipeline
//!
//! ```text
//! sort(
//!   groupBy(
//!     filter($data, {x|greaterThan($x.getInteger('qty'), 10)}),
//!     ['trader'],
//!     [agg('qty', {x|$x.getInteger('qty')}, {agg|sum($agg)})]
//!   ),
//!   [asc('trader')]
//! )
//! ```
pub mod expressions;
pub mod literal;
pub mod multiplicity;
pub(crate) mod wire;

pub use expressions::{AppliedFunction, AppliedProperty, Collection, Expression, Lambda, Variable};
pub use literal::{Literal, LiteralKind};
pub use multiplicity::Multiplicity;
