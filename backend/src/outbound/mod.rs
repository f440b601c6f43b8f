//! Outbound adapters implementing the domain's driven ports.

pub mod email;
pub mod hashing;
pub mod memory;
pub mod persistence;
