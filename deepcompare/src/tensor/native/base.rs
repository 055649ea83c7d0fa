use crate::tensor::{Dims, ITensor, Tensor, TensorIter, TensorIterMut, TensorView};

pub trait TensorBase<T, D: Dims>: ITensor<D> + AsRef<[T]> {
    fn into_owned(self) -> Tensor<T, D>
    where
        T: Clone;

    #[inline]
    fn view(&self) -> TensorView<'_, T, D> {
        unsafe { TensorView::from_slice_unchecked(self.as_ref(), *self.dims()) }
    }

    #[inline]
    fn iter_major_axis(&self) -> TensorIter<'_, T, D::Less> {
        unsafe { TensorIter::new_unchecked(self.as_ref(), self.dims().without_first_axis()) }
    }
}

pub trait TensorBaseMut<T, D: Dims>: TensorBase<T, D> + AsMut<[T]> {
    #[inline]
    fn iter_major_axis_mut(&mut self) -> TensorIterMut<'_, T, D::Less> {
        let out_dims = self.dims().without_first_axis();
        unsafe { TensorIterMut::new_unchecked(self.as_mut(), out_dims) }
    }
}
