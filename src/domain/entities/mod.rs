//! Core domain entities.
//!
//! Entities are plain data structures. Creation input lives in a separate
//! `New*` struct so store-assigned fields never appear in requests.

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
