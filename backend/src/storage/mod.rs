//! # Storage Module
//!
//! Where blocked dates are read from. Nothing is ever written back.

pub mod availability_repository;
pub mod traits;

pub use availability_repository::*;
pub use traits::*;
