//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the kernel.
//! - `adapters`: runtime and IO specific implementations.

pub mod adapters;
pub mod ports;
