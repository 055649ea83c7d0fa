use crate::tensor::{Dims, ITensor, Tensor, TensorBase, TensorBaseMut};
use std::slice::{Iter, IterMut};

pub struct TensorView<'a, T, D: Dims> {
    data: &'a [T],
    dims: D,
}

impl<'a, T, D: Dims> TensorView<'a, T, D> {
    #[inline]
    pub(super) unsafe fn from_slice_unchecked(data: &'a [T], dims: D) -> Self {
        debug_assert_eq!(data.len(), dims.tensor_len());
        TensorView { data, dims }
    }
    #[inline]
    pub fn iter(&self) -> Iter<'a, T> {
        self.data.iter()
    }
}

impl<'a, T, D: Dims> ITensor<D> for TensorView<'a, T, D> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }
    #[inline]
    fn dims(&self) -> &D {
        &self.dims
    }
}

impl<'a, T, D: Dims> AsRef<[T]> for TensorView<'a, T, D> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.data
    }
}

impl<'a, T, D: Dims> TensorBase<T, D> for TensorView<'a, T, D> {
    fn into_owned(self) -> Tensor<T, D>
    where
        T: Clone,
    {
        Tensor::from_vec(self.data.to_vec(), self.dims)
    }
}

impl<'a, T, D: Dims> IntoIterator for TensorView<'a, T, D> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T, D: Dims> Clone for TensorView<'a, T, D> {
    #[inline]
    fn clone(&self) -> Self {
        TensorView {
            data: self.data,
            dims: self.dims,
        }
    }
}

impl<'a, T, D: Dims> Copy for TensorView<'a, T, D> {}

pub struct TensorViewMut<'a, T, D: Dims> {
    data: &'a mut [T],
    dims: D,
}

impl<'a, T, D: Dims> TensorViewMut<'a, T, D> {
    #[inline]
    pub(super) unsafe fn from_slice_unchecked(data: &'a mut [T], dims: D) -> Self {
        debug_assert_eq!(data.len(), dims.tensor_len());
        TensorViewMut { data, dims }
    }
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<'a, T, D: Dims> ITensor<D> for TensorViewMut<'a, T, D> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }
    #[inline]
    fn dims(&self) -> &D {
        &self.dims
    }
}

impl<'a, T, D: Dims> AsRef<[T]> for TensorViewMut<'a, T, D> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &*self.data
    }
}

impl<'a, T, D: Dims> AsMut<[T]> for TensorViewMut<'a, T, D> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }
}

impl<'a, T, D: Dims> TensorBase<T, D> for TensorViewMut<'a, T, D> {
    fn into_owned(self) -> Tensor<T, D>
    where
        T: Clone,
    {
        Tensor::from_vec(self.data.to_vec(), self.dims)
    }
}

impl<'a, T, D: Dims> TensorBaseMut<T, D> for TensorViewMut<'a, T, D> {}

impl<'a, T, D: Dims> IntoIterator for TensorViewMut<'a, T, D> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}
