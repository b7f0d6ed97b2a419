// zerodiff-core/src/ops/math_elem/exp.rs

use ndarray::ArrayD;

use crate::autograd::{apply_unary, Op};
use crate::error::ZeroDiffError;
use crate::variable::Variable;

/// Rule pair for the element-wise exponential.
#[derive(Debug)]
struct Exp;

impl Op for Exp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn forward(&self, xs: &[ArrayD<f64>]) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
        Ok(vec![xs[0].mapv(f64::exp)])
    }

    /// d(e^x)/dx = e^x, so gx = e^x * gy.
    fn backward(
        &self,
        xs: &[ArrayD<f64>],
        gys: &[ArrayD<f64>],
    ) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
        Ok(vec![xs[0].mapv(f64::exp) * &gys[0]])
    }
}

/// Computes the element-wise exponential of a variable, tracked in the graph.
pub fn exp(x: &Variable) -> Result<Variable, ZeroDiffError> {
    apply_unary(Box::new(Exp), x)
}

#[cfg(test)]
#[path = "exp_test.rs"]
mod tests;
