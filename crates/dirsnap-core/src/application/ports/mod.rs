//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `dirsnap-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by
//!   infrastructure
//!   - `Catalog`: template metadata storage
//!   - `ArchiveCodec`: directory tree ↔ archive file
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by
//!   application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ArchiveCodec, Catalog};
