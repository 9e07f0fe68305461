//! Adapter implementations for access control ports.

pub mod file;
pub mod memory;
