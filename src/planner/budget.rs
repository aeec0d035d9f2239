//! Budget allocation
//!
//! Derives the full budget breakdown from the committed transport cost and
//! the chosen hotel's nightly rate: per-category spend, a capped daily
//! allowance, total estimated spend, remaining budget and utilization.
//! Stateless and recomputed fresh for every plan.

use crate::models::BudgetBreakdown;

/// Ceiling on the estimated discretionary spend per day, in currency units
pub const DAILY_EXPENSE_CAP: f64 = 1500.0;

/// Compute the budget breakdown for a trip.
///
/// Preconditions (enforced by `TravelInput::validate`, not re-checked
/// here): `budget > 0` and `days >= 1`.
///
/// The daily allowance is whatever budget is left after transport and
/// hotel, spread over the trip and capped at [`DAILY_EXPENSE_CAP`]; it goes
/// negative when transport and hotel alone exceed the budget, which is how
/// the overrun propagates into `total_estimated`. The returned `remaining`
/// is clamped to zero for display; `is_within_budget` keeps the pre-clamp
/// sign, so a trip landing exactly on budget reads as within budget.
#[must_use]
pub fn allocate(budget: f64, transport_cost: f64, hotel_per_night: f64, days: i64) -> BudgetBreakdown {
    let days_f = days as f64;
    let hotel_total = hotel_per_night * days_f;

    let daily_expense = DAILY_EXPENSE_CAP.min((budget - transport_cost - hotel_total) / days_f);
    let total_estimated = transport_cost + hotel_total + daily_expense * days_f;

    let remaining = budget - total_estimated;
    let utilization_percent = (total_estimated / budget * 100.0).min(100.0);

    BudgetBreakdown {
        transport: transport_cost,
        hotel: hotel_total,
        daily_expense,
        total_days: days,
        total_estimated,
        remaining: remaining.max(0.0),
        utilization_percent,
        is_within_budget: remaining >= 0.0,
    }
}
