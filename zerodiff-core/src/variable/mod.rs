// zerodiff-core/src/variable/mod.rs

use std::sync::{Arc, RwLock};

use ndarray::ArrayD;

use crate::variable_data::VariableData;

mod autograd_methods;
pub mod broadcast_utils;
pub mod create;

// Re-export creation functions so callers can use `variable::ones(..)` etc.
pub use create::{from_vec, full, full_like, ones, ones_like, rand, randn, scalar, zeros, zeros_like};

/// A value node in the computation graph: one array plus its accumulated
/// gradient and a back-reference to the operation that produced it.
///
/// `Variable` uses `Arc<RwLock<VariableData>>` internally to allow for:
/// 1. **Shared ownership:** the same node is referenced by user code and by
///    the operation nodes that consume it, without copying the array.
/// 2. **Interior mutability:** `grad` and `creator` are written through
///    immutable handles during graph construction and the backward pass.
///
/// Cloning a `Variable` clones the handle, not the array.
#[derive(Debug, Clone)]
pub struct Variable {
    pub(crate) data: Arc<RwLock<VariableData>>,
}

impl Variable {
    /// Wraps an array value as a graph root.
    ///
    /// Taking `ArrayD<f64>` makes the "arrays only" contract a compile-time
    /// guarantee; scalars must be promoted first (see [`create::scalar`]).
    pub fn new(data: ArrayD<f64>) -> Self {
        Variable {
            data: Arc::new(RwLock::new(VariableData::new(data))),
        }
    }

    /// Returns a clone of the wrapped array value.
    pub fn data(&self) -> ArrayD<f64> {
        self.read_data().data.clone()
    }

    /// Returns a clone of the variable's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().data.shape().to_vec()
    }

    /// Returns the number of elements in the variable.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns the variable's data as a flat `Vec<f64>` in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.read_data().data.iter().copied().collect()
    }

    /// Acquires a read lock on the variable's interior.
    ///
    /// The lock is released when the guard goes out of scope.
    /// Panics if the RwLock is poisoned.
    pub(crate) fn read_data(&self) -> std::sync::RwLockReadGuard<'_, VariableData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the variable's interior.
    pub(crate) fn write_data(&self) -> std::sync::RwLockWriteGuard<'_, VariableData> {
        self.data.write().expect("RwLock poisoned")
    }

    /// Stable identity of this node, independent of handle clones.
    pub(crate) fn node_id(&self) -> *const RwLock<VariableData> {
        Arc::as_ptr(&self.data)
    }

    /// Returns `true` if both handles point at the same node.
    pub fn same_node(&self, other: &Variable) -> bool {
        self.node_id() == other.node_id()
    }
}
