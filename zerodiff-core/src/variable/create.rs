// zerodiff-core/src/variable/create.rs
//
// Creation helpers for leaf variables. These mirror the usual numpy-style
// constructors: zeros, ones, full, *_like, plus random creation.

use ndarray::{arr0, ArrayD, IxDyn};

use crate::error::ZeroDiffError;
use crate::variable::Variable;

/// Promotes a host scalar to a zero-dimensional array variable.
///
/// This is the promotion path for "scalar in, array stored": the engine never
/// wraps bare floats, only arrays.
pub fn scalar(value: f64) -> Variable {
    Variable::new(arr0(value).into_dyn())
}

/// Creates a variable from a flat `Vec<f64>` and a shape.
///
/// # Errors
/// Returns [`ZeroDiffError::ShapeMismatch`] if the data length does not match
/// the number of elements implied by `shape`.
pub fn from_vec(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Variable, ZeroDiffError> {
    let numel: usize = shape.iter().product();
    if data_vec.len() != numel {
        return Err(ZeroDiffError::ShapeMismatch {
            expected: vec![numel],
            actual: vec![data_vec.len()],
            operation: "from_vec".to_string(),
        });
    }
    let array = ArrayD::from_shape_vec(IxDyn(&shape), data_vec)
        .map_err(|e| ZeroDiffError::InternalError(format!("from_vec: {e}")))?;
    Ok(Variable::new(array))
}

/// Creates a variable filled with zeros.
pub fn zeros(shape: &[usize]) -> Variable {
    Variable::new(ArrayD::zeros(IxDyn(shape)))
}

/// Creates a variable filled with ones.
pub fn ones(shape: &[usize]) -> Variable {
    Variable::new(ArrayD::ones(IxDyn(shape)))
}

/// Creates a variable filled with `value`.
pub fn full(shape: &[usize], value: f64) -> Variable {
    Variable::new(ArrayD::from_elem(IxDyn(shape), value))
}

/// Creates a zero-filled variable with the same shape as `v`.
pub fn zeros_like(v: &Variable) -> Variable {
    zeros(&v.shape())
}

/// Creates a one-filled variable with the same shape as `v`.
pub fn ones_like(v: &Variable) -> Variable {
    ones(&v.shape())
}

/// Creates a `value`-filled variable with the same shape as `v`.
pub fn full_like(v: &Variable, value: f64) -> Variable {
    full(&v.shape(), value)
}

/// Creates a variable with elements sampled uniformly from `[0, 1)`.
pub fn rand(shape: &[usize]) -> Variable {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let numel: usize = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|_| rng.gen::<f64>()).collect();
    let array = ArrayD::from_shape_vec(IxDyn(shape), data)
        .expect("rand: element count matches shape by construction");
    Variable::new(array)
}

/// Creates a variable with elements sampled from the standard normal
/// distribution.
pub fn randn(shape: &[usize]) -> Variable {
    use rand_distr::{Distribution, StandardNormal};
    let mut rng = rand::thread_rng();
    let normal = StandardNormal;
    let numel: usize = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|_| normal.sample(&mut rng)).collect();
    let array = ArrayD::from_shape_vec(IxDyn(shape), data)
        .expect("randn: element count matches shape by construction");
    Variable::new(array)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
