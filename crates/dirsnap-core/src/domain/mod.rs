// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Dirsnap.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O — archive packing, catalog access — is handled via ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde derive
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod error;
pub mod template;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use template::{TemplateName, TemplatePatch, TemplateRecord};
