//! # IO Module
//!
//! Adapter layer between clients and the domain. Currently only REST.

pub mod rest;

pub use rest::*;
