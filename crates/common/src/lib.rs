//! Shared plumbing for the clinic crates: logging setup, small response
//! types and startup environment checks.

pub mod types;
pub mod utils;
pub mod env;
