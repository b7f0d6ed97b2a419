// zerodiff-core/src/autograd/function.rs

use std::fmt::Debug;
use std::sync::{Arc, RwLock, Weak};

use log::trace;
use ndarray::ArrayD;

use crate::error::ZeroDiffError;
use crate::variable::Variable;
use crate::variable_data::VariableData;

/// The forward/backward rule pair of one operation kind.
///
/// Concrete operations (square, exp, add, ...) implement both rules over raw
/// arrays; graph bookkeeping is handled entirely by [`apply`], so rule
/// implementations stay pure numeric code.
///
/// The default bodies fail with [`ZeroDiffError::NotImplemented`]. Hitting one
/// of them is a programming contract violation during development of a new
/// operation, not a runtime condition to handle.
pub trait Op: Debug + Send + Sync {
    /// Human-readable operation name, used in errors and trace logs.
    fn name(&self) -> &'static str;

    /// Pure forward computation over the inputs' raw arrays.
    ///
    /// Returns one array per output. Scalar results must be boxed as
    /// zero-dimensional arrays before being returned.
    fn forward(&self, _xs: &[ArrayD<f64>]) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
        Err(ZeroDiffError::NotImplemented {
            op: self.name().to_string(),
            rule: "forward",
        })
    }

    /// Derivative rule: given the inputs' raw arrays and the gradients with
    /// respect to each output, returns the gradient with respect to each
    /// input, in input order.
    fn backward(
        &self,
        _xs: &[ArrayD<f64>],
        _gys: &[ArrayD<f64>],
    ) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
        Err(ZeroDiffError::NotImplemented {
            op: self.name().to_string(),
            rule: "backward",
        })
    }
}

/// One applied operation in the computation graph.
///
/// A `FunctionNode` corresponds to a single forward application, not to an
/// operation kind: applying `square` twice creates two nodes. It is populated
/// once by [`apply`] and never mutated afterwards.
///
/// Ownership: inputs are held strongly (the creator chain hanging off any
/// output keeps the whole upstream graph alive), outputs weakly (the outputs
/// own this node through their `creator` field, and a strong link back would
/// form a cycle).
#[derive(Debug)]
pub struct FunctionNode {
    op: Box<dyn Op>,
    inputs: Vec<Variable>,
    outputs: RwLock<Vec<Weak<RwLock<VariableData>>>>,
}

impl FunctionNode {
    /// The operation kind's name.
    pub fn name(&self) -> &'static str {
        self.op.name()
    }

    /// The input variables of this application, in call order.
    pub fn inputs(&self) -> &[Variable] {
        &self.inputs
    }

    /// Weak references to the output nodes of this application.
    pub(crate) fn outputs(&self) -> Vec<Weak<RwLock<VariableData>>> {
        self.outputs.read().expect("RwLock poisoned").clone()
    }

    /// Runs this node's backward rule against the given output gradients.
    pub(crate) fn run_backward(
        &self,
        gys: &[ArrayD<f64>],
    ) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
        let xs: Vec<ArrayD<f64>> = self.inputs.iter().map(|v| v.data()).collect();
        let gxs = self.op.backward(&xs, gys)?;
        if gxs.len() != self.inputs.len() {
            return Err(ZeroDiffError::BackwardError(format!(
                "operation {} returned {} input gradients, expected {}",
                self.name(),
                gxs.len(),
                self.inputs.len()
            )));
        }
        Ok(gxs)
    }
}

/// Applies an operation to a sequence of input variables, wiring the result
/// into the computation graph.
///
/// This is the graph-construction protocol:
/// 1. unwrap each input's raw array,
/// 2. run the operation's forward rule,
/// 3. wrap each raw output in a fresh `Variable`,
/// 4. set each output's creator to the shared applied node,
/// 5. record inputs (strong) and outputs (weak) on the node.
///
/// Returns the ordered output variables (length >= 1).
pub fn apply(op: Box<dyn Op>, inputs: &[Variable]) -> Result<Vec<Variable>, ZeroDiffError> {
    if inputs.is_empty() {
        return Err(ZeroDiffError::EmptyInputList {
            op: op.name().to_string(),
        });
    }

    let xs: Vec<ArrayD<f64>> = inputs.iter().map(|v| v.data()).collect();
    let ys = op.forward(&xs)?;
    if ys.is_empty() {
        return Err(ZeroDiffError::InternalError(format!(
            "operation {} produced no outputs",
            op.name()
        )));
    }

    let node = Arc::new(FunctionNode {
        op,
        inputs: inputs.to_vec(),
        outputs: RwLock::new(Vec::new()),
    });

    let outputs: Vec<Variable> = ys.into_iter().map(Variable::new).collect();
    for output in &outputs {
        output.set_creator(Arc::clone(&node));
    }
    *node.outputs.write().expect("RwLock poisoned") =
        outputs.iter().map(|v| Arc::downgrade(&v.data)).collect();

    trace!(
        "apply: {} with {} input(s) -> {} output(s)",
        node.name(),
        node.inputs.len(),
        outputs.len()
    );

    Ok(outputs)
}

/// Applies a single-input, single-output operation and unwraps the singleton
/// result. Convenience used by the op entry points.
pub fn apply_unary(op: Box<dyn Op>, x: &Variable) -> Result<Variable, ZeroDiffError> {
    let mut outputs = apply(op, std::slice::from_ref(x))?;
    if outputs.len() != 1 {
        return Err(ZeroDiffError::InternalError(format!(
            "unary application produced {} outputs",
            outputs.len()
        )));
    }
    Ok(outputs.remove(0))
}

/// Applies a two-input, single-output operation and unwraps the singleton
/// result.
pub fn apply_binary(
    op: Box<dyn Op>,
    x0: &Variable,
    x1: &Variable,
) -> Result<Variable, ZeroDiffError> {
    let mut outputs = apply(op, &[x0.clone(), x1.clone()])?;
    if outputs.len() != 1 {
        return Err(ZeroDiffError::InternalError(format!(
            "binary application produced {} outputs",
            outputs.len()
        )));
    }
    Ok(outputs.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr0;

    /// Operation kind with no rules supplied, to exercise the contract errors.
    #[derive(Debug)]
    struct Unfinished;

    impl Op for Unfinished {
        fn name(&self) -> &'static str {
            "unfinished"
        }
    }

    #[test]
    fn test_default_forward_is_not_implemented() {
        let x = Variable::new(arr0(1.0).into_dyn());
        let err = apply(Box::new(Unfinished), &[x]).unwrap_err();
        assert_eq!(
            err,
            ZeroDiffError::NotImplemented {
                op: "unfinished".to_string(),
                rule: "forward",
            }
        );
    }

    #[test]
    fn test_default_backward_is_not_implemented() {
        let err = Unfinished.backward(&[], &[]).unwrap_err();
        assert_eq!(
            err,
            ZeroDiffError::NotImplemented {
                op: "unfinished".to_string(),
                rule: "backward",
            }
        );
    }

    #[test]
    fn test_apply_rejects_empty_inputs() {
        let err = apply(Box::new(Unfinished), &[]).unwrap_err();
        assert_eq!(
            err,
            ZeroDiffError::EmptyInputList {
                op: "unfinished".to_string()
            }
        );
    }

    /// A two-output operation, to check multi-output wiring.
    #[derive(Debug)]
    struct Duplicate;

    impl Op for Duplicate {
        fn name(&self) -> &'static str {
            "duplicate"
        }

        fn forward(&self, xs: &[ArrayD<f64>]) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
            Ok(vec![xs[0].clone(), xs[0].clone()])
        }

        fn backward(
            &self,
            _xs: &[ArrayD<f64>],
            gys: &[ArrayD<f64>],
        ) -> Result<Vec<ArrayD<f64>>, ZeroDiffError> {
            Ok(vec![&gys[0] + &gys[1]])
        }
    }

    #[test]
    fn test_apply_multi_output_wiring() {
        let x = Variable::new(arr0(3.0).into_dyn());
        let outputs = apply(Box::new(Duplicate), std::slice::from_ref(&x)).unwrap();
        assert_eq!(outputs.len(), 2);

        // Every output's creator is the same applied node.
        let c0 = outputs[0].creator().unwrap();
        let c1 = outputs[1].creator().unwrap();
        assert!(Arc::ptr_eq(&c0, &c1));
        assert_eq!(c0.name(), "duplicate");
        assert_eq!(c0.inputs().len(), 1);
        assert!(c0.inputs()[0].same_node(&x));

        // Weak output links resolve to the returned variables.
        let recorded = c0.outputs();
        assert_eq!(recorded.len(), 2);
        for (weak, var) in recorded.iter().zip(outputs.iter()) {
            let upgraded = weak.upgrade().expect("output should be alive");
            assert_eq!(Arc::as_ptr(&upgraded), var.node_id());
        }
    }

    #[test]
    fn test_distinct_applications_are_distinct_nodes() {
        let x = Variable::new(arr0(1.0).into_dyn());
        let a = apply(Box::new(Duplicate), std::slice::from_ref(&x)).unwrap();
        let b = apply(Box::new(Duplicate), std::slice::from_ref(&x)).unwrap();
        let ca = a[0].creator().unwrap();
        let cb = b[0].creator().unwrap();
        assert!(!Arc::ptr_eq(&ca, &cb));
    }
}
