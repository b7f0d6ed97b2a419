//! Element-wise math functions (square, exp).

pub mod exp;
pub mod square;

pub use exp::exp;
pub use square::square;
