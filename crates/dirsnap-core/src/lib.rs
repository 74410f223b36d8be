//! Dirsnap Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Dirsnap
//! directory snapshot tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          dirsnap-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Service             │
//! │           (TemplateService)             │
//! │      Orchestrates the Lifecycle         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │    (Driven: Catalog, ArchiveCodec)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    dirsnap-adapters (Infrastructure)    │
//! │     (SqliteCatalog, ZipCodec, etc)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │      (TemplateName, TemplateRecord)     │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dirsnap_core::{application::TemplateService, domain::TemplateName};
//!
//! // 1. Normalize the user-supplied name
//! let name = TemplateName::parse("  My-Project ").unwrap();
//!
//! // 2. Use application service (with injected adapters)
//! let service = TemplateService::new(catalog, codec, templates_dir);
//! service.snapshot(&name, source_dir).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        TemplateService,
        ports::{ArchiveCodec, Catalog},
    };
    pub use crate::domain::{TemplateName, TemplatePatch, TemplateRecord};
    pub use crate::error::{DirsnapError, DirsnapResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
