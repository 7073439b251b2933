//! Adapter implementations for the directory repository port.

pub mod memory;
pub mod postgres;
