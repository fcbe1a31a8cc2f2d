//! Core services: fetching, consolidation, projection, insights.

pub mod consolidation;
pub mod fetch_orchestrator;
pub mod insights;
pub mod view_projection;

pub use consolidation::consolidate;
pub use fetch_orchestrator::FetchOrchestrator;
pub use insights::{InsightCache, InsightContext};
pub use view_projection::{project, ReportView};
