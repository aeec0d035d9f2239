//! Hotel ranking engine
//!
//! Scores hotel candidates by value (rating per currency unit per night),
//! filters them by an affordability cap derived from the budget left after
//! transport, and flags the single best-value hotel in whatever set
//! survives. Pure: no I/O, no clock reads.

use crate::models::HotelOption;

/// Share of the post-transport budget reserved for the hotel
pub const HOTEL_BUDGET_SHARE: f64 = 0.6;

/// Number of hotels shown when fewer than [`MIN_AFFORDABLE_CHOICES`] pass
/// the affordability filter
const FALLBACK_CHOICES: usize = 4;

/// Minimum affordable options required before the filter is trusted
const MIN_AFFORDABLE_CHOICES: usize = 2;

/// Rank hotel candidates by value and annotate the best-value choice.
///
/// `days` must be >= 1 and every candidate must have a positive nightly
/// price; both are guaranteed by the caller (input validation and the
/// candidate sources respectively).
///
/// The affordability cap is `(budget - transport_cost) * 0.6 / days` per
/// night. When fewer than two hotels pass the cap the top four by score are
/// returned regardless of price, so the user always sees choices.
#[must_use]
pub fn rank_hotels(
    options: Vec<HotelOption>,
    budget: f64,
    days: i64,
    transport_cost: f64,
) -> Vec<HotelOption> {
    if options.is_empty() {
        return options;
    }

    let remaining_budget = budget - transport_cost;
    let max_hotel_budget = remaining_budget * HOTEL_BUDGET_SHARE;
    let max_per_night = max_hotel_budget / days as f64;

    let mut sorted: Vec<HotelOption> = options
        .into_iter()
        .map(|mut hotel| {
            hotel.is_best_value = false;
            hotel
        })
        .collect();
    sorted.sort_by(|a, b| b.value_score().total_cmp(&a.value_score()));

    let affordable: Vec<HotelOption> = sorted
        .iter()
        .filter(|h| h.price_per_night <= max_per_night)
        .cloned()
        .collect();

    let mut selected = if affordable.len() >= MIN_AFFORDABLE_CHOICES {
        affordable
    } else {
        tracing::debug!(
            max_per_night,
            affordable = affordable.len(),
            "too few affordable hotels, falling back to top choices by value"
        );
        sorted.into_iter().take(FALLBACK_CHOICES).collect()
    };

    // Descending score order puts the best-value hotel first
    if let Some(best) = selected.first_mut() {
        best.is_best_value = true;
    }

    selected
}
