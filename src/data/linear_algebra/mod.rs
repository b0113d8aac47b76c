//! # Linear algebra primitives
//!
//! Index arithmetic for packed symmetric matrices, and a matrix type built on it.

pub mod error;
pub mod packing;
pub mod symmetric;
