//! theralink-core
//!
//! Pure domain types, risk classification, and store key conventions.
//! No AWS SDK dependency; this is the shared vocabulary of the TheraLink system.

pub mod error;
pub mod models;
pub mod store_keys;
