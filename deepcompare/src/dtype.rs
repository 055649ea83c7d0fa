use num_traits::{Num, NumAssignOps};
use std::fmt::Debug;

/// Element type of the tensors a loss operator reads and writes.
pub trait DType: 'static + Sized + Copy + Debug + PartialOrd + Num + NumAssignOps {
    const ZERO: Self;
    const ONE: Self;
    fn from_f64(val: f64) -> Self;
    fn from_usize(val: usize) -> Self;
    fn to_f64(self) -> f64;
}

macro_rules! impl_dtype {
    ($ty:ty, $one:expr, $zero:expr) => {
        impl DType for $ty {
            const ZERO: Self = $zero;
            const ONE: Self = $one;
            #[inline]
            fn from_f64(val: f64) -> Self {
                val as $ty
            }
            #[inline]
            fn from_usize(val: usize) -> Self {
                val as $ty
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_dtype!(f32, 1.0, 0.0);
impl_dtype!(f64, 1.0, 0.0);

#[cfg(feature = "half")]
mod half_impl {
    use super::DType;
    use half::f16;

    impl DType for f16 {
        const ZERO: Self = f16::ZERO;
        const ONE: Self = f16::ONE;
        #[inline]
        fn from_f64(val: f64) -> Self {
            f16::from_f64(val)
        }
        #[inline]
        fn from_usize(val: usize) -> Self {
            f16::from_f64(val as f64)
        }
        #[inline]
        fn to_f64(self) -> f64 {
            f16::to_f64(self)
        }
    }
}
