use super::math::{hinge_error_row, hinge_margin_row, pair_confusion_cell};
use crate::backend::{Backend, BackendOther, TensorOps, TensorTyped};
use crate::dtype::DType;
use crate::tensor::{Dims, ITensor, Tensor, Tensor1, Tensor2, TensorBase, TensorBaseMut};
use std::fmt::{Debug, Formatter, Write};
use std::iter::zip;
use std::marker::PhantomData;

pub struct CpuBackend<DT: DType> {
    max_batch_size: usize,
    _dtype: PhantomData<DT>,
}

impl<DT: DType> CpuBackend<DT> {
    pub fn new(max_batch_size: usize) -> Self {
        CpuBackend {
            max_batch_size,
            _dtype: PhantomData,
        }
    }
}

impl<DT: DType> TensorTyped for CpuBackend<DT> {
    type DType = DT;
    type Tensor<D: Dims> = Tensor<DT, D>;
}

impl<DT: DType> TensorOps for CpuBackend<DT> {
    #[inline]
    fn new_tensor_exact<D: Dims>(&self, dims: D) -> Tensor<DT, D> {
        Tensor::zeroed(dims)
    }

    fn new_tensor_batch_sized<D: Dims>(&self, dims: D) -> Tensor<DT, D> {
        let size = dims.first();
        let mut tensor = Tensor::zeroed(dims.with_resized_first_axis(self.max_batch_size.max(size)));
        tensor.resize_within_capacity(DT::ZERO, dims);
        tensor
    }

    #[inline]
    fn resize_tensor<D: Dims>(&self, tensor: &mut Tensor<DT, D>, dims: D) {
        tensor.resize_within_capacity(DT::ZERO, dims)
    }

    fn write_tensor<T, D>(&self, tensor: &mut Tensor<DT, D>, native_src: &T)
    where
        T: TensorBase<DT, D>,
        D: Dims,
    {
        assert_eq!(tensor.dims(), native_src.dims());
        tensor.as_mut().copy_from_slice(native_src.as_ref());
    }

    fn read_tensor<T, D>(&self, tensor: &Tensor<DT, D>, native_dst: &mut T)
    where
        T: TensorBaseMut<DT, D>,
        D: Dims,
    {
        assert_eq!(tensor.dims(), native_dst.dims());
        native_dst.as_mut().copy_from_slice(tensor.as_ref());
    }

    #[inline]
    fn new_tensor_from_native<T, D>(&self, native: T) -> Tensor<DT, D>
    where
        T: TensorBase<DT, D>,
        D: Dims,
    {
        native.into_owned()
    }

    #[inline]
    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }
}

impl<DT: DType> BackendOther for CpuBackend<DT> {
    fn pairwise_hinge(&self, data: &Tensor2<DT>, label: &Tensor1<DT>, output: &mut Tensor2<DT>) {
        debug_assert_eq!(data.dims().rows(), label.len());
        debug_assert_eq!(data.dims(), output.dims());
        for ((mut o_row, x_row), &l) in zip(zip(output.iter_major_axis_mut(), data.iter_major_axis()), label) {
            hinge_margin_row(l, x_row.as_ref(), o_row.as_mut());
        }
    }

    fn pairwise_hinge_error(&self, label: &Tensor1<DT>, output: &Tensor2<DT>, data_error: &mut Tensor2<DT>) {
        debug_assert_eq!(output.dims().rows(), label.len());
        debug_assert_eq!(output.dims(), data_error.dims());
        for ((mut e_row, y_row), &l) in zip(zip(data_error.iter_major_axis_mut(), output.iter_major_axis()), label) {
            hinge_error_row(l, y_row.as_ref(), e_row.as_mut());
        }
    }

    fn sum<D: Dims>(&self, a: &Tensor<DT, D>) -> DT {
        let mut sum = DT::ZERO;
        for &v in a {
            sum += v;
        }
        sum
    }

    fn pair_confusion(&self, output: &Tensor2<DT>, label: &Tensor1<DT>, threshold: DT) -> [usize; 4] {
        debug_assert_eq!(output.dims().rows(), label.len());
        let mut counts = [0; 4];
        for (row, &l) in zip(output.iter_major_axis(), label) {
            for &score in row {
                let (expected, predicted) = pair_confusion_cell(l, score, threshold);
                counts[2 * expected + predicted] += 1;
            }
        }
        counts
    }
}

impl<DT: DType> Backend for CpuBackend<DT> {}

impl<DT: DType> Debug for CpuBackend<DT> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CpuBackend<")?;
        f.write_str(std::any::type_name::<DT>())?;
        f.write_char('>')
    }
}
