//! Entity constraints and the synthesized pseudo-key referrer

mod referrer;


pub use referrer::*;
