//! Metacache Core - Core abstractions for the metadata object cache
//!
//! This crate provides the fundamental traits and types that the other
//! metacache crates depend on. It defines:
//!
//! - `RowSource` - Trait for prepared-statement execution over a connection
//! - `SchemaOwner` / `SchemaObject` - The schema object model
//! - `ProgressMonitor` - Cancellation token threaded through cache calls
//! - Common types like `Value` and `Row`

mod error;
mod object;
mod progress;
mod source;
mod types;

pub use error::*;
pub use object::*;
pub use progress::*;
pub use source::*;
pub use types::*;
