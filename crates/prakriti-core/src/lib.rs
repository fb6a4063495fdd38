//! prakriti-core
//!
//! Pure domain types and the typed rules configuration.
//! No I/O. This is the shared vocabulary of the Prakriti system.

pub mod config;
pub mod error;
pub mod models;
