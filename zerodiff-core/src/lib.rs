//! # zerodiff-core
//!
//! A minimal define-by-run reverse-mode automatic differentiation engine.
//!
//! Forward computation builds the graph as a side effect: applying an
//! operation to [`Variable`]s wires a creator link onto each output. Calling
//! [`Variable::backward`] walks those links in reverse, invoking each applied
//! operation's derivative rule and accumulating gradients onto every
//! reachable input.
//!
//! ```
//! use zerodiff_core::ops::{exp, square};
//! use zerodiff_core::variable::scalar;
//!
//! # fn main() -> Result<(), zerodiff_core::ZeroDiffError> {
//! let x = scalar(0.5);
//! let y = square(&exp(&square(&x)?)?)?;
//! y.backward()?;
//! let gx = x.grad().unwrap();
//! assert!((gx.iter().next().unwrap() - 3.297442541400256).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

pub mod autograd;
pub mod ops;
pub mod variable;
pub mod variable_data;

pub mod utils;

// Re-export the handle type so it is accessible directly as
// `zerodiff_core::Variable`.
pub use variable::Variable;

pub mod error;
pub use error::ZeroDiffError;
