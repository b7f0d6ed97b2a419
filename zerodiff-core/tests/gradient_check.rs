use approx::assert_abs_diff_eq;

use zerodiff_core::autograd::{check_grad, numerical_diff, DEFAULT_EPSILON};
use zerodiff_core::ops::{exp, square};
use zerodiff_core::utils::testing::scalar_value;
use zerodiff_core::variable::rand;

mod common;
use common::scalar_leaf;

#[test]
fn test_numerical_diff_matches_backward_square() {
    let x = scalar_leaf(2.0);
    let y = square(&x).unwrap();
    y.backward().unwrap();

    let estimate = numerical_diff(|v| square(v), &x, DEFAULT_EPSILON).unwrap();
    assert_abs_diff_eq!(scalar_value(&x.grad().unwrap()), scalar_value(&estimate), epsilon = 1e-6);
}

#[test]
fn test_gradient_check_random_square() {
    // Random input in [0, 1): analytic and numerical gradients must agree
    // within tolerance.
    let x = rand(&[1]);
    check_grad(|v| square(v), &x, DEFAULT_EPSILON, 1e-5).unwrap();
}

#[test]
fn test_gradient_check_random_composite() {
    let x = rand(&[1]);
    check_grad(
        |v| square(&exp(&square(v)?)?),
        &x,
        DEFAULT_EPSILON,
        1e-4,
    )
    .unwrap();
}

#[test]
fn test_numerical_diff_idempotent() {
    let x = rand(&[3]);
    let first = numerical_diff(|v| exp(v), &x, DEFAULT_EPSILON).unwrap();
    let second = numerical_diff(|v| exp(v), &x, DEFAULT_EPSILON).unwrap();
    assert_eq!(first, second);
}
