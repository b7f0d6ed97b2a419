// zerodiff-core/src/variable_data.rs

use std::fmt::Debug;
use std::sync::Arc;

use ndarray::ArrayD;

use crate::autograd::FunctionNode;

/// Internal storage and autograd metadata for a [`Variable`](crate::Variable).
///
/// This struct holds the realized array value, the accumulated gradient and the
/// creator link into the computation graph. It is wrapped in
/// `Arc<RwLock<VariableData>>` by the `Variable` handle to allow shared
/// ownership and interior mutability.
#[derive(Debug)]
pub struct VariableData {
    /// The realized array value. Always present: construction requires an
    /// array, so host-language scalars can never reach this field.
    pub(crate) data: ArrayD<f64>,
    /// The accumulated gradient, populated during the backward pass.
    /// Same shape as `data` once present.
    pub(crate) grad: Option<ArrayD<f64>>,
    /// The applied operation node that produced this variable, or `None` for
    /// graph roots (user-supplied inputs).
    ///
    /// This is a strong link: the creator chain is what keeps the graph alive
    /// for the backward pass. The reverse direction (node -> outputs) is weak,
    /// so no reference cycle forms.
    pub(crate) creator: Option<Arc<FunctionNode>>,
}

impl VariableData {
    pub fn new(data: ArrayD<f64>) -> Self {
        VariableData {
            data,
            grad: None,
            creator: None,
        }
    }

    /// Number of elements in the wrapped array.
    pub fn numel(&self) -> usize {
        self.data.len()
    }
}
