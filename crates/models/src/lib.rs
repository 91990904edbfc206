//! SeaORM entities for the clinic schema, connection helpers and the
//! sample data loader.

pub mod errors;
pub mod db;
pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod visit;
pub mod vet;
pub mod specialty;
pub mod vet_specialty;
pub mod seed;

#[cfg(test)]
mod tests;
