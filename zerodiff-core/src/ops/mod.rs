//! # Operation plugins (`ops`)
//!
//! Concrete operation kinds live here, grouped by category. Each op file
//! defines a rule struct implementing [`Op`](crate::autograd::Op) plus a
//! plain fallible entry-point function over `&Variable`, so call sites never
//! construct nodes by hand.

pub mod arithmetic;
pub mod math_elem;

pub use arithmetic::add;
pub use math_elem::{exp, square};
