use ndarray::arr0;
use zerodiff_core::Variable;

// Helper to create a scalar leaf variable for testing.
// Added allow(dead_code) because usage across different test crates isn't
// detected easily.
#[allow(dead_code)]
pub fn scalar_leaf(value: f64) -> Variable {
    Variable::new(arr0(value).into_dyn())
}

#[allow(dead_code)]
pub fn vec_leaf(data: Vec<f64>, shape: Vec<usize>) -> Variable {
    zerodiff_core::variable::from_vec(data, shape).expect("Test variable creation failed")
}
