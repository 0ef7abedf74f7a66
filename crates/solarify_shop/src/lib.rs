// --- File: crates/solarify_shop/src/lib.rs ---
//! Inventory and order management.
//!
//! Confirming an order is the one flow with side effects beyond its own
//! table: it decrements stock transactionally and fans out threshold
//! alerts through `solarify_notify`.

pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod routes;

pub use handlers::ShopState;
