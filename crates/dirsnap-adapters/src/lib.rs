//! Infrastructure adapters for Dirsnap.
//!
//! This crate implements the ports defined in
//! `dirsnap-core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod archive;
pub mod catalog;

// Re-export commonly used adapters
pub use archive::ZipCodec;
pub use catalog::{MemoryCatalog, SqliteCatalog};
