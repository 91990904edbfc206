//! Repository implementations backed by SeaORM.

pub mod seaorm;

pub use seaorm::{SeaOrmOwnerRepository, SeaOrmPetRepository, SeaOrmVetRepository, SeaOrmVisitRepository};
