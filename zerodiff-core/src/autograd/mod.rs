// zerodiff-core/src/autograd/mod.rs

//! Graph construction and backward-pass machinery.
//!
//! [`function`] holds the [`Op`] rule trait, the applied [`FunctionNode`] and
//! the [`apply`] protocol that wires forward results into the graph.
//! [`grad_check`] holds the finite-difference utilities used to validate
//! backward rules. The traversal itself lives on
//! [`Variable::backward`](crate::Variable::backward).

pub mod function;
pub mod grad_check;

pub use function::{apply, apply_binary, apply_unary, FunctionNode, Op};
pub use grad_check::{check_grad, numerical_diff, GradCheckError, DEFAULT_EPSILON};
