//! Plan assembly
//!
//! Composes the ranked transport list, ranked hotel list, experience data,
//! weather snapshot and budget breakdown into one travel plan. The ordering
//! here is load-bearing: the hotel affordability cap depends on the
//! committed transport cost, so transport is ranked first.
//!
//! The assembler is pure over its inputs; fetching the candidate lists is
//! the plan service's job.

use serde::{Deserialize, Serialize};

use crate::error::TripwiseError;
use crate::models::{HotelOption, Place, TravelInput, TravelPlan, TransportOption, WeatherSummary};
use crate::planner::{budget, hotels, transport};

/// Everything the assembler needs besides the user's request: candidate
/// lists from the transport/hotel sources and passthrough experience data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanCandidates {
    pub transport: Vec<TransportOption>,
    pub hotels: Vec<HotelOption>,
    pub attractions: Vec<Place>,
    pub food: Vec<Place>,
    pub shopping: Vec<Place>,
    pub weather: WeatherSummary,
}

/// Pick the option the budget math should commit to: the flagged element if
/// any, otherwise the first, or `None` for an empty list.
///
/// Forces callers to handle the no-candidates case instead of indexing into
/// a possibly empty slice.
pub fn pick_committed<T>(options: &[T], is_flagged: impl Fn(&T) -> bool) -> Option<&T> {
    options.iter().find(|o| is_flagged(o)).or_else(|| options.first())
}

/// Assemble a complete travel plan from validated input and candidate data.
///
/// Fails fast with a validation error for malformed input; over well-formed
/// input it is total and deterministic (bit-identical output for identical
/// arguments). Empty candidate lists degrade to warnings rather than
/// errors, with a committed cost of zero.
pub fn assemble(input: TravelInput, candidates: PlanCandidates) -> Result<TravelPlan, TripwiseError> {
    input.validate()?;

    let days = input.trip_days();
    let mut warnings = Vec::new();

    let ranked_transport =
        transport::rank_transport(candidates.transport, input.preference, input.budget);
    let transport_cost = match pick_committed(&ranked_transport, |t| t.is_recommended) {
        Some(chosen) => chosen.cost,
        None => {
            warnings.push(format!(
                "No transport options found from {} to {}",
                input.source, input.destination
            ));
            0.0
        }
    };

    let ranked_hotels =
        hotels::rank_hotels(candidates.hotels, input.budget, days, transport_cost);
    let hotel_per_night = match pick_committed(&ranked_hotels, |h| h.is_best_value) {
        Some(chosen) => chosen.price_per_night,
        None => {
            warnings.push(format!("No hotels found in {}", input.destination));
            0.0
        }
    };

    let breakdown = budget::allocate(input.budget, transport_cost, hotel_per_night, days);

    tracing::debug!(
        days,
        transport_cost,
        hotel_per_night,
        total = breakdown.total_estimated,
        "assembled travel plan"
    );

    Ok(TravelPlan {
        input,
        transport: ranked_transport,
        hotels: ranked_hotels,
        attractions: candidates.attractions,
        food: candidates.food,
        shopping: candidates.shopping,
        weather: candidates.weather,
        budget: breakdown,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::models::Preference;

    fn input(preference: Preference, budget: f64) -> TravelInput {
        TravelInput {
            budget,
            source: "Mumbai".to_string(),
            destination: "Goa".to_string(),
            start_date: None,
            end_date: None,
            preference,
        }
    }

    fn candidates() -> PlanCandidates {
        PlanCandidates {
            transport: catalog::fallback_transport(),
            hotels: catalog::fallback_hotels(),
            attractions: catalog::fallback_places(crate::models::PlaceKind::Attraction),
            food: catalog::fallback_places(crate::models::PlaceKind::Food),
            shopping: catalog::fallback_places(crate::models::PlaceKind::Shopping),
            weather: catalog::fallback_weather(),
        }
    }

    #[test]
    fn test_assemble_full_plan() {
        let plan = assemble(input(Preference::Cheapest, 15_000.0), candidates()).unwrap();

        assert_eq!(plan.transport.len(), 6);
        assert!(!plan.hotels.is_empty());
        assert!(plan.warnings.is_empty());
        assert_eq!(plan.budget.total_days, 3);

        // cheapest option (600) is within the 0.4 cap and drives the math
        let committed = pick_committed(&plan.transport, |t| t.is_recommended).unwrap();
        assert_eq!(committed.cost, 600.0);
        assert_eq!(plan.budget.transport, 600.0);
    }

    #[test]
    fn test_hotel_cap_uses_committed_transport_cost() {
        let plan = assemble(input(Preference::Fastest, 20_000.0), candidates()).unwrap();
        let committed = pick_committed(&plan.transport, |t| t.is_recommended).unwrap();
        // fastest is the 4500 flight, so the per-night cap is
        // (20000 - 4500) * 0.6 / 3 = 3100
        assert_eq!(committed.cost, 4500.0);
        assert!(plan.hotels.iter().all(|h| h.price_per_night <= 3100.0));
    }

    #[test]
    fn test_falls_back_to_first_when_nothing_recommended() {
        // budget 1200: cheapest option costs 600 > 1200 * 0.4 = 480,
        // so nothing is flagged and the first sorted option is committed
        let plan = assemble(input(Preference::Cheapest, 1200.0), candidates()).unwrap();
        assert!(plan.transport.iter().all(|t| !t.is_recommended));
        assert_eq!(plan.budget.transport, 600.0);
    }

    #[test]
    fn test_empty_candidates_produce_warnings_not_errors() {
        let empty = PlanCandidates {
            transport: Vec::new(),
            hotels: Vec::new(),
            attractions: Vec::new(),
            food: Vec::new(),
            shopping: Vec::new(),
            weather: catalog::fallback_weather(),
        };
        let plan = assemble(input(Preference::Balanced, 10_000.0), empty).unwrap();

        assert!(plan.transport.is_empty());
        assert!(plan.hotels.is_empty());
        assert_eq!(plan.warnings.len(), 2);
        assert_eq!(plan.budget.transport, 0.0);
        assert_eq!(plan.budget.hotel, 0.0);
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let mut bad = input(Preference::Cheapest, 10_000.0);
        bad.budget = -5.0;
        let result = assemble(bad, candidates());
        assert!(matches!(result, Err(TripwiseError::Validation { .. })));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let a = assemble(input(Preference::Balanced, 15_000.0), candidates()).unwrap();
        let b = assemble(input(Preference::Balanced, 15_000.0), candidates()).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_pick_committed_prefers_flagged() {
        let values = vec![1, 2, 3];
        assert_eq!(pick_committed(&values, |v| *v == 2), Some(&2));
        assert_eq!(pick_committed(&values, |_| false), Some(&1));
        let empty: Vec<i32> = Vec::new();
        assert_eq!(pick_committed(&empty, |_| true), None);
    }
}
