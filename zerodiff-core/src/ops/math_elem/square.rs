// zerodiff-core/src/ops/math_elem/square.rs

use ndarray::ArrayD;

use crate::autograd::{apply_unary, Op};
use crate::error::ZeroDiffError;
use crate::variable::Variable;

/// Rule pair for element-wise squaring.
#[derive(Debug)]
struct Square;

impl Op for Square {
    fn name(&self) -> &'static str {
        "square"
    }

    fn forward(&self, xs: &[ArrayD<f64>]) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
        Ok(vec![xs[0].mapv(|v| v * v)])
    }

    /// d(x^2)/dx = 2x, so gx = 2 * x * gy.
    fn backward(
        &self,
        xs: &[ArrayD<f64>],
        gys: &[ArrayD<f64>],
    ) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
        Ok(vec![(&xs[0] * &gys[0]) * 2.0])
    }
}

/// Computes the element-wise square of a variable, tracked in the graph.
pub fn square(x: &Variable) -> Result<Variable, ZeroDiffError> {
    apply_unary(Box::new(Square), x)
}

#[cfg(test)]
#[path = "square_test.rs"]
mod tests;
