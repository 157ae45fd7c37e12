//! Truncated tensor algebra and free Lie algebra over `f64` coefficients.
//!
//! This is the algebra collaborator the signature engine computes with:
//! dense free tensors with truncated multiplication, the tensor exponential
//! of degree-1 elements, the truncated logarithm, and projection of
//! log-tensors onto a Lyndon word basis of the free Lie algebra.
pub mod context;
pub mod lie;
pub mod lyndon;
pub mod tensor;

pub use context::{get_context, AlgebraContext};
pub use lie::Lie;
pub use lyndon::LyndonBasis;
pub use tensor::FreeTensor;
