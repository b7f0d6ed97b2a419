// zerodiff-core/src/ops/arithmetic/add.rs

use ndarray::{ArrayD, IxDyn};

use crate::autograd::{apply_binary, Op};
use crate::error::ZeroDiffError;
use crate::variable::broadcast_utils::{broadcast_shapes, reduce_gradient_to_shape};
use crate::variable::Variable;

/// Rule pair for element-wise addition with NumPy-style broadcasting.
#[derive(Debug)]
struct Add;

impl Op for Add {
    fn name(&self) -> &'static str {
        "add"
    }

    fn forward(&self, xs: &[ArrayD<f64>]) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
        let result_shape = broadcast_shapes(xs[0].shape(), xs[1].shape())?;
        let broadcast_err = || {
            ZeroDiffError::BroadcastError {
                shape1: xs[0].shape().to_vec(),
                shape2: xs[1].shape().to_vec(),
            }
        };
        let a = xs[0]
            .broadcast(IxDyn(&result_shape))
            .ok_or_else(broadcast_err)?;
        let b = xs[1]
            .broadcast(IxDyn(&result_shape))
            .ok_or_else(broadcast_err)?;
        Ok(vec![&a + &b])
    }

    /// The derivative of addition is 1 with respect to each operand: the
    /// output gradient passes through unchanged, summed back over any axes
    /// that operand was broadcast along.
    fn backward(
        &self,
        xs: &[ArrayD<f64>],
        gys: &[ArrayD<f64>],
    ) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
        let gx0 = reduce_gradient_to_shape(&gys[0], xs[0].shape());
        let gx1 = reduce_gradient_to_shape(&gys[0], xs[1].shape());
        Ok(vec![gx0, gx1])
    }
}

/// Adds two variables element-wise, tracked in the graph.
pub fn add(x0: &Variable, x1: &Variable) -> Result<Variable, ZeroDiffError> {
    apply_binary(Box::new(Add), x0, x1)
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
