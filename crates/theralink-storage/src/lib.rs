//! theralink-storage
//!
//! The triage store: where patient records live between requests.
//! [`store::TriageStore`] is the persistence boundary; [`memory::MemoryStore`]
//! keeps records for the life of the process and [`s3::S3Store`] keeps one
//! JSON object per patient in S3.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod state;
pub mod store;
