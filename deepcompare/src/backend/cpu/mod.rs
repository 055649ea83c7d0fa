mod backend;
mod math;

pub use backend::CpuBackend;
