// --- File: crates/solarify_marketing/src/lib.rs ---
//! Marketing campaigns and the social posts scheduled against them.

pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod routes;

pub use handlers::MarketingState;
