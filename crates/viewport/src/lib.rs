pub mod clamp;
pub mod controller;

pub use clamp::*;
pub use controller::*;
