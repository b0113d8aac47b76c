//! # Storing of symmetric matrices in memory
//!
//! This module provides the data structures used to represent packed symmetric matrices in memory.

pub mod linear_algebra;
