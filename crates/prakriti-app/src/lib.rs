//! prakriti-app library root.
//!
//! Application directory, YAML config handling, answer files and the
//! assessment pipeline. Exposed as a library so integration tests can
//! drive the same flow as the `prakriti` binary.

pub mod answers;
pub mod config;
pub mod paths;
pub mod pipeline;
