pub mod common;
pub mod error;
pub mod vec;
pub mod mat;
pub mod quat;
