use crate::backend::Backend;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::{Dim2, ITensor};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How a training loop folds the per-sample margins of a batch into one value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum Reduction {
    None,
    #[default]
    Mean,
    Sum,
}

impl Reduction {
    /// Reduces the margins of a batch. Returns `None` for [`Reduction::None`].
    ///
    /// The mean of an empty batch is zero.
    pub fn apply<B: Backend>(&self, backend: &B, margins: &B::Tensor<Dim2>) -> Option<B::DType> {
        match self {
            Reduction::None => None,
            Reduction::Sum => Some(backend.sum(margins)),
            Reduction::Mean => {
                let count = margins.len();
                if count == 0 {
                    Some(B::DType::ZERO)
                } else {
                    Some(backend.sum(margins) / B::DType::from_usize(count))
                }
            }
        }
    }

    /// Factor the per-sample gradients are scaled by to match [`Reduction::apply`].
    pub fn grad_scale<T: DType>(&self, count: usize) -> T {
        match self {
            Reduction::Mean if count > 0 => T::ONE / T::from_usize(count),
            _ => T::ONE,
        }
    }
}

impl FromStr for Reduction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Reduction::None),
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            _ => Err(Error::UnsupportedReduction(s.to_string())),
        }
    }
}

impl Display for Reduction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Reduction::None => "none",
            Reduction::Mean => "mean",
            Reduction::Sum => "sum",
        })
    }
}
