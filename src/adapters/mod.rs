//! Adapters for external integrations.

pub mod providers;
