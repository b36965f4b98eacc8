//! Business logic services for the application layer.

pub mod resolution_service;
pub mod short_link_service;

pub use resolution_service::ResolutionService;
pub use short_link_service::{CreateShortLink, GenerationPolicy, ShortLinkService};
