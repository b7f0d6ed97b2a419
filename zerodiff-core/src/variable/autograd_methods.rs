// zerodiff-core/src/variable/autograd_methods.rs
//
// Gradient accessors and the backward traversal engine.

use std::collections::HashSet;
use std::sync::Arc;

use log::trace;
use ndarray::ArrayD;

use crate::autograd::FunctionNode;
use crate::error::ZeroDiffError;
use crate::variable::Variable;

impl Variable {
    /// Returns a clone of the accumulated gradient, if one exists.
    pub fn grad(&self) -> Option<ArrayD<f64>> {
        self.read_data().grad.clone()
    }

    /// Sets the gradient explicitly, e.g. to seed the backward pass with
    /// something other than ones.
    ///
    /// # Errors
    /// Returns [`ZeroDiffError::ShapeMismatch`] if `grad` does not have the
    /// same shape as the variable's data.
    pub fn set_grad(&self, grad: ArrayD<f64>) -> Result<(), ZeroDiffError> {
        let mut guard = self.write_data();
        if grad.shape() != guard.data.shape() {
            return Err(ZeroDiffError::ShapeMismatch {
                expected: guard.data.shape().to_vec(),
                actual: grad.shape().to_vec(),
                operation: "set_grad".to_string(),
            });
        }
        guard.grad = Some(grad);
        Ok(())
    }

    /// Clears the accumulated gradient, so the variable can be reused in a
    /// fresh backward pass.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Accumulates `grad_to_add` into the variable's gradient: sums with an
    /// existing gradient, installs it otherwise.
    ///
    /// Summation rather than overwrite is what makes a variable consumed by
    /// several operations (or twice by one operation) receive the total of
    /// all its contributions.
    pub fn acc_grad(&self, grad_to_add: ArrayD<f64>) -> Result<(), ZeroDiffError> {
        let mut guard = self.write_data();
        if grad_to_add.shape() != guard.data.shape() {
            return Err(ZeroDiffError::GradientAccumulationShapeMismatch {
                expected: guard.data.shape().to_vec(),
                actual: grad_to_add.shape().to_vec(),
            });
        }
        guard.grad = Some(match guard.grad.take() {
            Some(existing) => existing + grad_to_add,
            None => grad_to_add,
        });
        Ok(())
    }

    /// Returns a clone of the creator link, if this variable was produced by
    /// an operation.
    pub fn creator(&self) -> Option<Arc<FunctionNode>> {
        self.read_data().creator.clone()
    }

    /// Records the operation node that produced this variable.
    ///
    /// Called exactly once per variable, by [`apply`](crate::autograd::apply)
    /// during graph construction.
    pub(crate) fn set_creator(&self, node: Arc<FunctionNode>) {
        let mut guard = self.write_data();
        debug_assert!(
            guard.creator.is_none(),
            "set_creator called twice on the same variable"
        );
        guard.creator = Some(node);
    }

    /// Computes gradients for this variable and every ancestor reachable
    /// through creator links.
    ///
    /// If this variable's gradient is unset it is seeded with ones of the
    /// data's shape. Calling `backward` on a graph root (no creator) is a
    /// no-op apart from that seeding.
    ///
    /// Traversal is a LIFO worklist over applied nodes. Each node is
    /// processed at most once; its output gradients are read at pop time, its
    /// backward rule produces one gradient per input, and each is *summed*
    /// into the input's gradient. With simple diamonds (one operation
    /// consuming the same variable twice, or two outputs of one node
    /// converging) this yields the correct totals. No topological ordering is
    /// performed, so a graph where *separate* operations reconverge on a
    /// common ancestor may read that ancestor's gradient before every
    /// contribution has arrived.
    pub fn backward(&self) -> Result<(), ZeroDiffError> {
        {
            let mut guard = self.write_data();
            if guard.grad.is_none() {
                guard.grad = Some(ArrayD::ones(guard.data.raw_dim()));
            }
        }

        let mut funcs: Vec<Arc<FunctionNode>> = Vec::new();
        let mut seen: HashSet<*const FunctionNode> = HashSet::new();
        if let Some(creator) = self.creator() {
            seen.insert(Arc::as_ptr(&creator));
            funcs.push(creator);
        } else {
            return Ok(());
        }

        while let Some(node) = funcs.pop() {
            trace!("backward: visiting {}", node.name());

            // Gather the accumulated gradient of each output. An output that
            // is alive but was never reached contributes zeros; a dangling
            // output means the graph was partially dropped and the pass
            // cannot be completed.
            let outputs = node.outputs();
            let mut gys: Vec<ArrayD<f64>> = Vec::with_capacity(outputs.len());
            for weak_output in outputs {
                let output = weak_output.upgrade().ok_or_else(|| {
                    ZeroDiffError::BackwardError(format!(
                        "an output of {} was dropped before backward",
                        node.name()
                    ))
                })?;
                let guard = output.read().expect("RwLock poisoned");
                gys.push(match &guard.grad {
                    Some(g) => g.clone(),
                    None => ArrayD::zeros(guard.data.raw_dim()),
                });
            }

            let gxs = node.run_backward(&gys)?;

            for (input, gx) in node.inputs().iter().zip(gxs) {
                input.acc_grad(gx)?;
                if let Some(creator) = input.creator() {
                    if seen.insert(Arc::as_ptr(&creator)) {
                        funcs.push(creator);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
