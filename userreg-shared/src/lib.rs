//! # User Registry Shared Library
//!
//! This crate contains the types and storage plumbing shared by the user
//! registry API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: The `User` record and its input type
//! - `validation`: Email format rules
//! - `store`: The `UserStore` trait with in-memory and PostgreSQL backends
//! - `db`: PostgreSQL connection pool and schema setup

pub mod db;
pub mod models;
pub mod store;
pub mod validation;

/// Current version of the user registry shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
