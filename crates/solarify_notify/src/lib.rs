// --- File: crates/solarify_notify/src/lib.rs ---
// Declare modules within this crate
pub mod alerts;
pub mod channels;
pub mod dispatch;
#[cfg(test)]
mod dispatch_test;
pub mod doc;
pub mod handlers;
pub mod routes;

pub use alerts::{Alert, AlertStore};
pub use dispatch::{NotificationDispatcher, STOCK_ALERT_THRESHOLDS};
