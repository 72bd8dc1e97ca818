//! HTTP handlers for the FWA service.

pub mod analyze;
pub mod health;
pub mod items;
pub mod metrics;
