use crate::tensor::{Dims, ITensor, Tensor, TensorView, TensorViewMut};

macro_rules! impl_tensor_extras {
    ($type_name: ident $(, $l: lifetime )?) => {
        impl<$($l,)?T, D: Dims> PartialEq<Tensor<T, D>> for $type_name<$($l,)?T, D> where T: PartialEq {
            fn eq(&self, other: &Tensor<T, D>) -> bool {
                self.dims() == other.dims() && self.as_ref() == other.as_ref()
            }
        }

        impl<$($l,)?'b, T, D: Dims> PartialEq<TensorView<'b, T, D>> for $type_name<$($l,)?T, D> where T: PartialEq {
            fn eq(&self, other: &TensorView<'b, T, D>) -> bool {
                self.dims() == other.dims() && self.as_ref() == other.as_ref()
            }
        }

        impl<$($l,)?'b, T, D: Dims> PartialEq<TensorViewMut<'b, T, D>> for $type_name<$($l,)?T, D> where T: PartialEq {
            fn eq(&self, other: &TensorViewMut<'b, T, D>) -> bool {
                self.dims() == other.dims() && self.as_ref() == other.as_ref()
            }
        }
    };
}

impl_tensor_extras!(Tensor);
impl_tensor_extras!(TensorView, 'a);
impl_tensor_extras!(TensorViewMut, 'a);
