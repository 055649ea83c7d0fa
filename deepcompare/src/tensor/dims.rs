use std::fmt::{Debug, Display, Formatter, Write};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dim0;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dim1(pub usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dim2(pub usize, pub usize);

impl Dim2 {
    #[inline]
    pub fn rows(&self) -> usize {
        self.0
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.1
    }
}

pub trait Dims: Copy + Debug + Eq + Display {
    const N: usize;
    const ZERO: Self;
    type Less: Dims;
    /// size of the major (batch) axis
    fn first(&self) -> usize;
    fn tensor_len(&self) -> usize;
    fn as_vec(&self) -> Vec<usize>;
    fn without_first_axis(&self) -> Self::Less;
    fn with_resized_first_axis(&self, size: usize) -> Self;
}

impl Display for Dim0 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("()")
    }
}

impl Dims for Dim0 {
    const N: usize = 0;
    const ZERO: Self = Dim0;
    type Less = Self;
    #[inline]
    fn first(&self) -> usize {
        1
    }
    #[inline]
    fn tensor_len(&self) -> usize {
        1
    }
    fn as_vec(&self) -> Vec<usize> {
        Vec::new()
    }
    fn without_first_axis(&self) -> Self::Less {
        Dim0
    }
    fn with_resized_first_axis(&self, _size: usize) -> Self {
        Dim0
    }
}

impl Dims for Dim1 {
    const N: usize = 1;
    const ZERO: Self = Dim1(0);
    type Less = Dim0;
    #[inline]
    fn first(&self) -> usize {
        self.0
    }
    #[inline]
    fn tensor_len(&self) -> usize {
        self.0
    }
    fn as_vec(&self) -> Vec<usize> {
        vec![self.0]
    }
    fn without_first_axis(&self) -> Self::Less {
        Dim0
    }
    fn with_resized_first_axis(&self, size: usize) -> Self {
        Dim1(size)
    }
}

impl Display for Dim1 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('(')?;
        Display::fmt(&self.0, f)?;
        f.write_str(",)")
    }
}

impl Dims for Dim2 {
    const N: usize = 2;
    const ZERO: Self = Dim2(0, 0);
    type Less = Dim1;
    #[inline]
    fn first(&self) -> usize {
        self.0
    }
    #[inline]
    fn tensor_len(&self) -> usize {
        self.0 * self.1
    }
    fn as_vec(&self) -> Vec<usize> {
        vec![self.0, self.1]
    }
    fn without_first_axis(&self) -> Self::Less {
        Dim1(self.1)
    }
    fn with_resized_first_axis(&self, size: usize) -> Self {
        Dim2(size, self.1)
    }
}

impl Display for Dim2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('(')?;
        Display::fmt(&self.0, f)?;
        f.write_str(", ")?;
        Display::fmt(&self.1, f)?;
        f.write_char(')')
    }
}

impl TryFrom<&[usize]> for Dim1 {
    type Error = usize;
    /// fails with the rank of the rejected shape
    fn try_from(shape: &[usize]) -> Result<Self, Self::Error> {
        match *shape {
            [n] => Ok(Dim1(n)),
            _ => Err(shape.len()),
        }
    }
}

impl TryFrom<&[usize]> for Dim2 {
    type Error = usize;
    fn try_from(shape: &[usize]) -> Result<Self, Self::Error> {
        match *shape {
            [rows, cols] => Ok(Dim2(rows, cols)),
            _ => Err(shape.len()),
        }
    }
}
