//! Field-path expressions and their resolution into field chains.

mod expression;
mod resolver;

pub use expression::{Parameter, PathExpression, PathNode};
pub use resolver::{resolve, FieldChain};
