//! Service layer for the clinic: domain types, repository contracts and the
//! `ClinicService` façade the web layer talks to.
//! - Separates business logic from data access.
//! - Repository traits have a SeaORM implementation and an in-memory one.
//! - Validation lives here so every entry point checks forms the same way.

pub mod errors;
pub mod clinic;
#[cfg(test)]
pub mod test_support;

pub use clinic::{ClinicService, ClinicServiceImpl};
