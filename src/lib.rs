//! Crop recommendation and agronomic alert scheduling.
//!
//! The `logic` module is pure: every operation takes its snapshots, catalog
//! and current date as arguments. `db` is a thin SQLite store around it.

pub mod config;
pub mod db;
pub mod error;
pub mod logic;
pub mod models;

pub use error::{AdvisorError, Result};
pub use models::season::resolve_season;
