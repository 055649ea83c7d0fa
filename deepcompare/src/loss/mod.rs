#[cfg(test)]
mod test;

use crate::backend::{Backend, CpuBackend, TensorOps};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::op::{InferredShapes, Operator};
use crate::tensor::{Dim1, Dim2, Dims, ITensor, Tensor1, Tensor2};
use log::{debug, trace};

pub const DATA: &str = "data";
pub const LABEL: &str = "label";
pub const OUTPUTS: &str = "outputs";

const ARGUMENTS: [&str; 2] = [DATA, LABEL];
const OUTPUT_NAMES: [&str; 1] = [OUTPUTS];

/// Terminal loss node of a patch-pair similarity network.
///
/// Given a signed score `x` per pair and a label `l` (`+1` match, `-1`
/// non-match), the forward pass writes the margin `1 - l * x` for every
/// score. The margin is left unreduced. The backward pass writes the
/// subgradient of the margin with respect to the scores: `-l` while the
/// margin is non-negative and `0` once it turned negative.
#[derive(Debug, Default, Clone)]
pub struct PairwiseHingeLoss {
    cached: Option<(Dim2, InferredShapes)>,
}

impl PairwiseHingeLoss {
    pub fn new() -> Self {
        PairwiseHingeLoss { cached: None }
    }

    /// Allocates output and gradient buffers for a batch of scores with the given dims.
    pub fn new_buffers<B: Backend>(&self, backend: &B, data_dims: Dim2) -> (B::Tensor<Dim2>, B::Tensor<Dim2>) {
        (
            backend.new_tensor_batch_sized(data_dims),
            backend.new_tensor_batch_sized(data_dims),
        )
    }

    pub fn forward<B: Backend>(
        &self,
        backend: &B,
        data: &B::Tensor<Dim2>,
        label: &B::Tensor<Dim1>,
        outputs: &mut B::Tensor<Dim2>,
    ) -> Result<()> {
        let dims = *data.dims();
        check_label(dims, label.dims(), "PairwiseHingeLoss forward")?;
        check_same(dims, outputs.dims(), "PairwiseHingeLoss forward outputs")?;
        trace!("forward {backend:?} dims={dims}");
        backend.pairwise_hinge(data, label, outputs);
        Ok(())
    }

    /// Writes the gradient with respect to `data` into `data_grad`.
    ///
    /// `outputs` must hold the result of [`PairwiseHingeLoss::forward`] for the
    /// same `data` and `label`. No gradient flows to the label.
    pub fn backward<B: Backend>(
        &self,
        backend: &B,
        data: &B::Tensor<Dim2>,
        label: &B::Tensor<Dim1>,
        outputs: &B::Tensor<Dim2>,
        data_grad: &mut B::Tensor<Dim2>,
    ) -> Result<()> {
        let dims = *data.dims();
        check_label(dims, label.dims(), "PairwiseHingeLoss backward")?;
        check_same(dims, outputs.dims(), "PairwiseHingeLoss backward outputs")?;
        check_same(dims, data_grad.dims(), "PairwiseHingeLoss backward data_grad")?;
        trace!("backward {backend:?} dims={dims}");
        backend.pairwise_hinge_error(label, outputs, data_grad);
        Ok(())
    }
}

impl Operator for PairwiseHingeLoss {
    fn name(&self) -> &'static str {
        "PairwiseHingeLoss"
    }

    fn arguments(&self) -> &'static [&'static str] {
        &ARGUMENTS
    }

    fn outputs(&self) -> &'static [&'static str] {
        &OUTPUT_NAMES
    }

    fn infer_shape(&mut self, in_shapes: &[Vec<usize>]) -> Result<InferredShapes> {
        const OP: &str = "PairwiseHingeLoss infer_shape";
        let data_shape = in_shapes
            .first()
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingInput { name: DATA, operation: OP })?;
        let dims = Dim2::try_from(data_shape.as_slice()).map_err(|rank| Error::RankMismatch {
            expected: 2,
            actual: rank,
            operation: OP,
        })?;
        if let Some(label_shape) = in_shapes.get(1).filter(|s| !s.is_empty()) {
            let label_dims = Dim1::try_from(label_shape.as_slice()).map_err(|rank| Error::RankMismatch {
                expected: 1,
                actual: rank,
                operation: OP,
            })?;
            check_label(dims, &label_dims, OP)?;
        }

        if let Some((cached_dims, shapes)) = &self.cached {
            if *cached_dims == dims {
                trace!("infer_shape cache hit for {dims}");
                return Ok(shapes.clone());
            }
        }

        let shapes = InferredShapes {
            arguments: vec![dims.as_vec(), Dim1(dims.rows()).as_vec()],
            outputs: vec![dims.as_vec()],
        };
        debug!("infer_shape {dims} -> {shapes:?}");
        self.cached = Some((dims, shapes.clone()));
        Ok(shapes)
    }
}

fn check_label(data: Dim2, label: &Dim1, operation: &'static str) -> Result<()> {
    if label.first() != data.rows() {
        return Err(Error::shape_mismatch(Dim1(data.rows()).as_vec(), label.as_vec(), operation));
    }
    Ok(())
}

fn check_same(expected: Dim2, actual: &Dim2, operation: &'static str) -> Result<()> {
    if expected != *actual {
        return Err(Error::shape_mismatch(expected.as_vec(), actual.as_vec(), operation));
    }
    Ok(())
}

/// Computes the per-sample margins `1 - label * data` into a fresh tensor.
pub fn pairwise_hinge<T: DType>(data: &Tensor2<T>, label: &Tensor1<T>) -> Result<Tensor2<T>> {
    let backend = CpuBackend::<T>::new(data.dims().rows());
    let mut outputs = backend.new_tensor_exact(*data.dims());
    PairwiseHingeLoss::new().forward(&backend, data, label, &mut outputs)?;
    Ok(outputs)
}

/// Computes the gradient of the margins with respect to `data` into a fresh tensor.
pub fn pairwise_hinge_grad<T: DType>(
    data: &Tensor2<T>,
    label: &Tensor1<T>,
    outputs: &Tensor2<T>,
) -> Result<Tensor2<T>> {
    let backend = CpuBackend::<T>::new(data.dims().rows());
    let mut data_grad = backend.new_tensor_exact(*data.dims());
    PairwiseHingeLoss::new().backward(&backend, data, label, outputs, &mut data_grad)?;
    Ok(data_grad)
}
