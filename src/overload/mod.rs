//! 포화도 보간과 과하중 판정.

pub mod evaluator;
pub mod interpolation;

pub use evaluator::*;
pub use interpolation::*;
