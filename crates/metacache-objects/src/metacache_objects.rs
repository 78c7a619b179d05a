//! Metacache Objects - database object model for metacache
//!
//! Typed schema objects materialized by the cache layer: stored procedures
//! and their parameters, plus the constraint/referrer capability used for
//! synthesized pseudo keys.

mod constraint;
mod procedure;

pub use constraint::*;
pub use procedure::*;
