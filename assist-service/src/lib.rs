//! assist-service: backend dispatcher for AI-assisted agency tooling.
//!
//! Receives a named action plus a JSON payload (optionally with an attached
//! document), builds a prompt, calls the generative model, and recovers a
//! structured result (JSON, HTML fragment, or cleaned prose) from the raw
//! completion.
pub mod config;
pub mod dispatch;
pub mod extraction;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
