// zerodiff-core/src/variable/broadcast_utils.rs
//
// NumPy-style broadcasting helpers shared by multi-input operations and their
// backward rules.

use ndarray::{ArrayD, Axis};

use crate::error::ZeroDiffError;

/// Computes the broadcast shape of two shapes under NumPy rules.
///
/// Shapes are aligned at the trailing dimensions; each pair of dimensions must
/// be equal or one of them must be 1.
///
/// # Errors
/// Returns [`ZeroDiffError::BroadcastError`] when the shapes are incompatible.
pub fn broadcast_shapes(shape1: &[usize], shape2: &[usize]) -> Result<Vec<usize>, ZeroDiffError> {
    let rank = shape1.len().max(shape2.len());
    let mut result = vec![0; rank];
    for i in 0..rank {
        // Index from the trailing end; missing leading dims count as 1.
        let d1 = if i < shape1.len() { shape1[shape1.len() - 1 - i] } else { 1 };
        let d2 = if i < shape2.len() { shape2[shape2.len() - 1 - i] } else { 1 };
        result[rank - 1 - i] = if d1 == d2 || d2 == 1 {
            d1
        } else if d1 == 1 {
            d2
        } else {
            return Err(ZeroDiffError::BroadcastError {
                shape1: shape1.to_vec(),
                shape2: shape2.to_vec(),
            });
        };
    }
    Ok(result)
}

/// Reduces a gradient computed at a broadcast shape back to an input's shape
/// by summing over the broadcast dimensions.
///
/// The gradient of a broadcast is the sum of the upstream gradient over every
/// axis the input was expanded along: leading axes the input did not have, and
/// axes where the input's dimension was 1.
pub fn reduce_gradient_to_shape(grad: &ArrayD<f64>, target_shape: &[usize]) -> ArrayD<f64> {
    let mut reduced = grad.clone();

    // Sum away the leading axes added by rank promotion.
    while reduced.ndim() > target_shape.len() {
        reduced = reduced.sum_axis(Axis(0));
    }

    // Sum (keeping the axis) where the input dimension was stretched from 1.
    for (axis, (&target_dim, &grad_dim)) in target_shape
        .iter()
        .zip(reduced.shape().to_vec().iter())
        .enumerate()
    {
        if target_dim == 1 && grad_dim != 1 {
            reduced = reduced.sum_axis(Axis(axis)).insert_axis(Axis(axis));
        }
    }

    reduced
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    #[test]
    fn test_broadcast_shapes_equal() {
        assert_eq!(broadcast_shapes(&[2, 3], &[2, 3]).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_broadcast_shapes_scalar() {
        assert_eq!(broadcast_shapes(&[], &[2, 3]).unwrap(), vec![2, 3]);
        assert_eq!(broadcast_shapes(&[2, 3], &[]).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_broadcast_shapes_stretch() {
        assert_eq!(broadcast_shapes(&[2, 1], &[1, 3]).unwrap(), vec![2, 3]);
        assert_eq!(broadcast_shapes(&[3], &[2, 3]).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_broadcast_shapes_incompatible() {
        let err = broadcast_shapes(&[2, 2], &[2, 3]).unwrap_err();
        match err {
            ZeroDiffError::BroadcastError { shape1, shape2 } => {
                assert_eq!(shape1, vec![2, 2]);
                assert_eq!(shape2, vec![2, 3]);
            }
            other => panic!("expected BroadcastError, got {other:?}"),
        }
    }

    #[test]
    fn test_reduce_gradient_rank_promotion() {
        // Input shape [3] broadcast to [2, 3]; gradient sums over axis 0.
        let grad = ArrayD::from_shape_vec(IxDyn(&[2, 3]), vec![1.0; 6]).unwrap();
        let reduced = reduce_gradient_to_shape(&grad, &[3]);
        assert_eq!(reduced.shape(), &[3]);
        assert!(reduced.iter().all(|&v| v == 2.0));
    }

    #[test]
    fn test_reduce_gradient_stretched_axis() {
        // Input shape [2, 1] broadcast to [2, 3]; gradient sums axis 1, keeps it.
        let grad = ArrayD::from_shape_vec(IxDyn(&[2, 3]), vec![1.0; 6]).unwrap();
        let reduced = reduce_gradient_to_shape(&grad, &[2, 1]);
        assert_eq!(reduced.shape(), &[2, 1]);
        assert!(reduced.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_reduce_gradient_noop_on_matching_shape() {
        let grad = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let reduced = reduce_gradient_to_shape(&grad, &[2, 2]);
        assert_eq!(reduced, grad);
    }
}
