//! Element-wise arithmetic operations.

pub mod add;

pub use add::add;
