// --- File: crates/solarify_auth/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod middleware;
pub mod routes;

pub use handlers::AuthState;
pub use middleware::{require_session, CurrentUser};
