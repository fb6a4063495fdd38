//! prakriti-storage
//!
//! Embedded SQLite store for users, patients and assessments.
//! One connection per process; every statement auto-commits.

pub mod assessments;
pub mod db;
pub mod error;
pub mod password;
pub mod patients;
pub mod users;

pub use db::{Database, export_bytes};
pub use error::StorageError;
