use crate::dtype::DType;
use crate::tensor::{Dim1, Dim2, Dims, ITensor, TensorBase, TensorBaseMut};
use std::fmt::Debug;

mod cpu;

pub use cpu::*;

pub trait TensorTyped {
    type DType: DType;
    type Tensor<D: Dims>: ITensor<D>;
}

pub trait TensorOps: TensorTyped {
    fn new_tensor_exact<D: Dims>(&self, dims: D) -> Self::Tensor<D>;
    /// allocates room for `max_batch_size` rows, sized to `dims`
    fn new_tensor_batch_sized<D: Dims>(&self, dims: D) -> Self::Tensor<D>;
    fn resize_tensor<D: Dims>(&self, tensor: &mut Self::Tensor<D>, dims: D);
    fn write_tensor<T, D>(&self, tensor: &mut Self::Tensor<D>, native_src: &T)
    where
        T: TensorBase<Self::DType, D>,
        D: Dims;
    fn read_tensor<T, D>(&self, tensor: &Self::Tensor<D>, native_dst: &mut T)
    where
        T: TensorBaseMut<Self::DType, D>,
        D: Dims;

    fn resize_tensor_major<D: Dims>(&self, tensor: &mut Self::Tensor<D>, size: usize) {
        let dims = tensor.dims().with_resized_first_axis(size);
        self.resize_tensor(tensor, dims);
    }

    fn new_tensor_from_native<T, D>(&self, native: T) -> Self::Tensor<D>
    where
        T: TensorBase<Self::DType, D>,
        D: Dims,
    {
        let mut tensor = self.new_tensor_exact(*native.dims());
        self.write_tensor(&mut tensor, &native);
        tensor
    }

    fn max_batch_size(&self) -> usize;
}

pub trait BackendOther: TensorTyped {
    /// computes the hinge margin `1 - label * data` with the label broadcast along each row
    fn pairwise_hinge(
        &self,
        data: &Self::Tensor<Dim2>,
        label: &Self::Tensor<Dim1>,
        output: &mut Self::Tensor<Dim2>,
    );

    /// computes the subgradient of the hinge margin with respect to the data
    ///
    /// Elements start at `+1`, rows with a positive label become `-1`, and
    /// any element whose margin is already negative becomes `0`.
    fn pairwise_hinge_error(
        &self,
        label: &Self::Tensor<Dim1>,
        output: &Self::Tensor<Dim2>,
        data_error: &mut Self::Tensor<Dim2>,
    );

    fn sum<D: Dims>(&self, a: &Self::Tensor<D>) -> Self::DType;

    /// counts scored pairs per confusion cell, indexed by `2 * expected + predicted`
    fn pair_confusion(
        &self,
        output: &Self::Tensor<Dim2>,
        label: &Self::Tensor<Dim1>,
        threshold: Self::DType,
    ) -> [usize; 4];
}

pub trait Backend: 'static + Debug + TensorTyped + TensorOps + BackendOther {}
