//! Relational storage for Solarify
//!
//! This crate provides a database client that is designed to be database
//! agnostic, using SQLx's Any driver, plus one repository per aggregate of
//! the CRM/e-commerce schema (companies, contacts, opportunities, inventory,
//! orders, social posts, campaigns, users, sessions, bookings).
//!
//! SQLite is the default backend; PostgreSQL and MySQL are available through
//! feature flags:
//!
//! ```toml
//! [dependencies]
//! solarify-db = { version = "0.1.0", features = ["postgres"] }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod repositories;

// Re-export the client, error type, and the repository bundle for ease of use
pub use client::DbClient;
pub use error::DbError;
pub use repositories::Repositories;
