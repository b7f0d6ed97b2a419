// zerodiff-core/src/autograd/grad_check.rs

use ndarray::ArrayD;
use thiserror::Error;

use crate::error::ZeroDiffError;
use crate::variable::Variable;

/// Step size used by [`numerical_diff`] when no explicit epsilon is wanted.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed at element {element_index}: analytical grad {analytical_grad} != numerical grad {numerical_grad}. Difference: {difference}")]
    GradientMismatch {
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(ZeroDiffError),

    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(ZeroDiffError),

    #[error("Input has no gradient after the backward pass")]
    MissingAnalyticalGrad,

    #[error("Analytical and numerical gradient shapes differ: {analytical:?} vs {numerical:?}")]
    GradientShapeMismatch {
        analytical: Vec<usize>,
        numerical: Vec<usize>,
    },

    #[error("Numerical gradient is NaN or infinite at element {element_index}: {value}")]
    NumericalGradNaNOrInfinite { element_index: usize, value: f64 },

    #[error("Analytical gradient is NaN or infinite at element {element_index}: {value}")]
    AnalyticalGradNaNOrInfinite { element_index: usize, value: f64 },

    #[error("Engine error during gradient check: {0}")]
    EngineError(#[from] ZeroDiffError),
}

/// Estimates the gradient of a unary function by centered finite differences.
///
/// Computes `(f(x + eps).data - f(x - eps).data) / (2 * eps)`. The shifted
/// inputs are fresh graph roots, so the estimate involves no graph machinery
/// beyond invoking `f` twice; repeated calls with the same arguments return
/// bit-identical results.
///
/// Centered rather than forward difference: its truncation error is
/// `O(eps^2)` instead of `O(eps)`.
pub fn numerical_diff<F>(f: F, x: &Variable, eps: f64) -> Result<ArrayD<f64>, ZeroDiffError>
where
    F: Fn(&Variable) -> Result<Variable, ZeroDiffError>,
{
    let x0 = Variable::new(&x.data() - eps);
    let x1 = Variable::new(&x.data() + eps);
    let y0 = f(&x0)?;
    let y1 = f(&x1)?;
    Ok((&y1.data() - &y0.data()) / (2.0 * eps))
}

/// Checks a unary function's analytical gradient against the centered
/// finite-difference estimate.
///
/// Runs `f(x)` forward, backpropagates from the output, and compares `x`'s
/// accumulated gradient elementwise against [`numerical_diff`]. A pair of
/// values passes when their absolute difference is within `tolerance`, or
/// within `tolerance` relative to the analytical magnitude.
///
/// Any gradient already accumulated on `x` is cleared first.
pub fn check_grad<F>(f: F, x: &Variable, eps: f64, tolerance: f64) -> Result<(), GradCheckError>
where
    F: Fn(&Variable) -> Result<Variable, ZeroDiffError>,
{
    x.clear_grad();

    let y = f(x).map_err(GradCheckError::ForwardPassError)?;
    y.backward().map_err(GradCheckError::BackwardPassError)?;

    let analytical = x.grad().ok_or(GradCheckError::MissingAnalyticalGrad)?;
    let numerical = numerical_diff(&f, x, eps).map_err(GradCheckError::ForwardPassError)?;

    if analytical.shape() != numerical.shape() {
        return Err(GradCheckError::GradientShapeMismatch {
            analytical: analytical.shape().to_vec(),
            numerical: numerical.shape().to_vec(),
        });
    }

    for (element_index, (&a, &n)) in analytical.iter().zip(numerical.iter()).enumerate() {
        if !a.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                element_index,
                value: a,
            });
        }
        if !n.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                element_index,
                value: n,
            });
        }
        let difference = (a - n).abs();
        if difference > tolerance && difference / (a.abs() + eps) > tolerance {
            return Err(GradCheckError::GradientMismatch {
                element_index,
                analytical_grad: a,
                numerical_grad: n,
                difference,
            });
        }
    }

    Ok(())
}
