use ndarray::ArrayD;

use crate::variable::Variable;

/// Extracts the single value of a zero-dimensional (or one-element) array.
/// Panics on an empty array.
pub fn scalar_value(array: &ArrayD<f64>) -> f64 {
    *array.iter().next().expect("scalar_value on empty array")
}

/// Checks that a variable's value is approximately equal to the expected
/// shape and flat data. Panics on mismatch.
pub fn check_variable_near(
    actual: &Variable,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");

    let actual_data = actual.data();
    assert_eq!(
        actual_data.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual_data.iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Checks a variable's accumulated gradient the same way.
pub fn check_grad_near(
    actual: &Variable,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    let grad = actual
        .grad()
        .expect("variable has no gradient in check_grad_near");
    assert_eq!(grad.shape(), expected_shape, "Gradient shape mismatch");
    for (i, (a, e)) in grad.iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if diff > tolerance {
            panic!(
                "Gradient mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}
