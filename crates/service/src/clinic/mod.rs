//! Clinic module: three-layer architecture (domain, repository, service).
//!
//! Owners, pets, visits and vets. The service is a pure façade over the four
//! repositories; form rules are in `validation`.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;
pub mod validation;

pub use service::{ClinicService, ClinicServiceImpl};
