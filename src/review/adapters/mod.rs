//! Adapter implementations for the review repository ports.

pub mod memory;
pub mod postgres;
