use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: &'static str,
    },

    #[error("Rank mismatch: expected rank {expected}, got {actual} during operation {operation}")]
    RankMismatch {
        expected: usize,
        actual: usize,
        operation: &'static str,
    },

    #[error("Missing input '{name}' for operation {operation}")]
    MissingInput {
        name: &'static str,
        operation: &'static str,
    },

    #[error("Unsupported reduction: {0}")]
    UnsupportedReduction(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn shape_mismatch<E, A>(expected: E, actual: A, operation: &'static str) -> Self
    where
        E: Into<Vec<usize>>,
        A: Into<Vec<usize>>,
    {
        Error::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
            operation,
        }
    }
}
