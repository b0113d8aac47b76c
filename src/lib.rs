//! # Packed symmetric matrices
//!
//! A symmetric matrix of order `n` without its diagonal has only `n * (n - 1) / 2` distinct values.
//! This crate stores exactly those values in a flat array and maps matrix coordinates to positions
//! in that array and back.
#![warn(missing_docs)]

pub mod data;
