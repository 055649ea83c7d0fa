mod dims;
mod native;

pub use dims::*;
pub use native::base::*;
pub use native::iter::*;
pub use native::owned::*;
pub use native::view::*;

/// Generic Tensor type which is specialized by different backends
pub trait ITensor<D: Dims> {
    fn len(&self) -> usize;
    fn dims(&self) -> &D;
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
