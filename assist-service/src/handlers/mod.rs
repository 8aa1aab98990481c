//! HTTP handlers for the assist service.

pub mod dispatch;
pub mod health;
pub mod metrics;
