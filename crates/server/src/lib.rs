pub mod errors;
pub mod extract;
pub mod identity;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{build_app, run_until};
pub use state::ServerState;
