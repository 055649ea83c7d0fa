#[cfg(feature = "approx")]
mod approx;
pub mod base;
mod debug;
mod extras;
pub mod iter;
pub mod owned;
pub mod view;
