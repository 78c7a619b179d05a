//! Stored procedures and their cached parameters
//!
//! A `Procedure` is the owner under which `ProcedureParameter`s are
//! enumerated and cached; parameters are built from sys.parameters-shaped
//! result rows.

mod owner;
mod parameter;

#[cfg(test)]
mod tests;

pub use owner::*;
pub use parameter::*;
