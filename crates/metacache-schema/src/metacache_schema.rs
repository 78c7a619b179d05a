//! Metacache Schema - the object materialization cache layer
//!
//! This crate turns query result rows into typed, cached schema objects:
//!
//! - `ConstructorRegistry` - factory table mapping owner type/capability
//!   tags to construction closures
//! - `ObjectCache` - lazily populates and caches the child objects of one
//!   owner, with all-or-nothing refresh semantics

mod cache;
mod registry;

pub use cache::*;
pub use registry::*;
