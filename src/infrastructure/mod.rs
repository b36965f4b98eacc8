//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the storage and cache contracts.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`persistence`] - Repository implementations (PostgreSQL and in-memory)

pub mod cache;
pub mod persistence;
