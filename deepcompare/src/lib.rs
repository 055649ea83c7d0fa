pub mod backend;
pub mod config;
pub mod dtype;
pub mod error;
pub mod loss;
pub mod op;
pub mod reduction;
pub mod scoring;
pub mod tensor;
pub mod util;

pub use error::{Error, Result};
