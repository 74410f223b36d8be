//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "snapshot this directory" or "clone a
//! template".

pub mod template_service;

pub use template_service::TemplateService;
