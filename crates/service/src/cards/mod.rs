//! Cards module: domain, repository, service, mirroring the layering used
//! elsewhere in the service crate.
//!
//! Cards and products form a many-to-many relation. The service owns the
//! rules (who must exist, what cascades); repositories own persistence and
//! the atomicity of multi-row writes.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::RelationshipService;
