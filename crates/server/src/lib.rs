//! Web layer of the clinic: controllers, HTML views and the HTTP router.

pub mod errors;
pub mod mvc;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod views;

pub use routes::{build_router, ServerState};
pub use startup::{run_with, shutdown_signal};
