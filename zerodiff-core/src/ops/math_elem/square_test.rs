// zerodiff-core/src/ops/math_elem/square_test.rs

use ndarray::arr0;

use super::square;
use crate::autograd::{check_grad, DEFAULT_EPSILON};
use crate::variable::{from_vec, rand, scalar};

#[test]
fn test_square_forward() {
    let x = scalar(2.0);
    let y = square(&x).unwrap();
    assert_eq!(y.data(), arr0(4.0).into_dyn());
}

#[test]
fn test_square_forward_elementwise() {
    let x = from_vec(vec![1.0, -2.0, 3.0], vec![3]).unwrap();
    let y = square(&x).unwrap();
    assert_eq!(y.data(), from_vec(vec![1.0, 4.0, 9.0], vec![3]).unwrap().data());
}

#[test]
fn test_square_backward() {
    let x = scalar(3.0);
    let y = square(&x).unwrap();
    y.backward().unwrap();
    assert_eq!(x.grad().unwrap(), arr0(6.0).into_dyn());
}

#[test]
fn test_square_gradient_check() {
    let x = rand(&[1]);
    check_grad(|v| square(v), &x, DEFAULT_EPSILON, 1e-5).unwrap();
}

#[test]
fn test_square_creator_wiring() {
    let x = scalar(2.0);
    let y = square(&x).unwrap();
    let creator = y.creator().unwrap();
    assert_eq!(creator.name(), "square");
    assert!(creator.inputs()[0].same_node(&x));
    assert!(x.creator().is_none());
}
