//! Application layer services implementing business logic.
//!
//! Services consume repository and cache traits through constructor-injected
//! `Arc`s and return [`crate::error::AppError`].
//!
//! # Available Services
//!
//! - [`services::short_link_service::ShortLinkService`] - Canonicalization, dedup and short code generation
//! - [`services::resolution_service::ResolutionService`] - Cache-aside short code resolution

pub mod services;
