//! HTTP API layer for the deskwatch back office.

pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
