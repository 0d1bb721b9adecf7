//! theralink-dashboard
//!
//! View models for the patient check-in page and the clinic dashboard, and
//! their HTML rendering with Tera.

pub mod chart;
pub mod error;
pub mod render;
pub mod styles;
pub mod view;
