//! `Tripwise` - budget-aware travel planning
//!
//! This library turns a trip request (budget, route, dates, preference)
//! into a complete plan: ranked transport and hotel options, places to
//! visit, a weather snapshot and a budget breakdown. The planning core is
//! pure and deterministic; candidate data comes from pluggable providers
//! with a static fallback catalog.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod plan_service;
pub mod planner;
pub mod providers;
pub mod web;

// Re-export core types for public API
pub use config::TripwiseConfig;
pub use error::TripwiseError;
pub use models::{
    BudgetBreakdown, HotelOption, Place, PlaceKind, Preference, TransportMode, TransportOption,
    TravelInput, TravelPlan, WeatherSummary,
};
pub use plan_service::PlanService;
pub use planner::{PlanCandidates, assemble};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
