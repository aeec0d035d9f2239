//! Data models for travel planning
//!
//! This module contains the data structures exchanged between the planning
//! core, the external data providers and the HTTP API: the user's trip
//! request, transport and hotel candidates, experience records, the weather
//! snapshot and the derived budget breakdown.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TripwiseError;

/// Trip days assumed when no valid date range is supplied
pub const DEFAULT_TRIP_DAYS: i64 = 3;

/// Ranking policy chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Cheapest,
    Fastest,
    Balanced,
}

/// Mode of transport for a candidate option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
}

/// Comfort tier of a transport option, ordered `Basic < Standard < Premium`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComfortTier {
    Basic,
    Standard,
    Premium,
}

/// The user's trip request. Immutable once validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelInput {
    /// Total trip budget in currency units (must be positive)
    pub budget: f64,
    /// Departure city
    pub source: String,
    /// Destination city (must differ from source)
    pub destination: String,
    /// Optional trip start date
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Optional trip end date (must not precede the start date)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Ranking policy for transport options
    pub preference: Preference,
}

/// A transport candidate produced by a candidate source and annotated by the
/// ranking engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportOption {
    /// Identifier, unique within one result set
    pub id: String,
    pub mode: TransportMode,
    /// Carrier or operator name
    pub name: String,
    /// Ticket cost in currency units (always positive)
    pub cost: f64,
    /// Travel time in the canonical `"<h>h <m>m"` form
    pub duration: String,
    /// Departure time, `HH:MM` 24-hour
    pub departure_time: String,
    /// Arrival time, `HH:MM` 24-hour (may wrap past midnight)
    pub arrival_time: String,
    pub comfort: ComfortTier,
    /// Set by the ranking engine on at most one option per result set
    #[serde(default)]
    pub is_recommended: bool,
    /// Human-readable justification, present iff `is_recommended`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A hotel candidate produced by a candidate source and annotated by the
/// ranking engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOption {
    /// Identifier, unique within one result set
    pub id: String,
    pub name: String,
    /// Nightly rate in currency units (always positive)
    pub price_per_night: f64,
    /// Guest rating, typically 1.0 - 5.0
    pub rating: f64,
    /// Distance-from-center descriptor, e.g. "1.2 km from center"
    pub distance: String,
    pub amenities: Vec<String>,
    /// Stock image reference for the presentation layer
    pub image: String,
    /// Set by the ranking engine on at most one option per result set
    #[serde(default)]
    pub is_best_value: bool,
}

/// Experience category for places returned by the places provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    Attraction,
    Food,
    Shopping,
}

/// A point of interest, restaurant or market. Opaque to the planning core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: PlaceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub image: String,
}

/// Weather snapshot for the destination. Opaque to the planning core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub condition: String,
    /// Temperature in degrees Celsius
    pub temperature: i32,
    pub icon: String,
    pub advice: String,
}

/// Derived budget breakdown for a plan. Stateless, recomputed per plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    /// Committed transport cost
    pub transport: f64,
    /// Hotel cost for the whole stay (per-night rate times days)
    pub hotel: f64,
    /// Discretionary daily allowance; negative when transport and hotel
    /// alone already exceed the budget
    pub daily_expense: f64,
    pub total_days: i64,
    pub total_estimated: f64,
    /// Remaining budget clamped to zero for display; the sign lives in
    /// `is_within_budget`
    pub remaining: f64,
    /// Budget utilization in percent, clamped to 100
    pub utilization_percent: f64,
    pub is_within_budget: bool,
}

/// The assembled travel plan returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelPlan {
    pub input: TravelInput,
    pub transport: Vec<TransportOption>,
    pub hotels: Vec<HotelOption>,
    pub attractions: Vec<Place>,
    pub food: Vec<Place>,
    pub shopping: Vec<Place>,
    pub weather: WeatherSummary,
    pub budget: BudgetBreakdown,
    /// Non-fatal signals such as "no transport options found"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl TravelInput {
    /// Validate the request at the boundary before any planning runs.
    ///
    /// The planning engines assume a positive budget and at least one trip
    /// day; this is the single place that enforces those preconditions.
    pub fn validate(&self) -> Result<(), TripwiseError> {
        if self.budget <= 0.0 {
            return Err(TripwiseError::validation("budget must be positive"));
        }
        if self.source.trim().is_empty() {
            return Err(TripwiseError::validation("source city is required"));
        }
        if self.destination.trim().is_empty() {
            return Err(TripwiseError::validation("destination city is required"));
        }
        if self.source.trim().eq_ignore_ascii_case(self.destination.trim()) {
            return Err(TripwiseError::validation(
                "source and destination must be different cities",
            ));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(TripwiseError::validation(
                    "end date must not be before start date",
                ));
            }
        }
        Ok(())
    }

    /// Number of trip days derived from the date range.
    ///
    /// Falls back to [`DEFAULT_TRIP_DAYS`] when either date is missing and
    /// never returns less than 1.
    #[must_use]
    pub fn trip_days(&self) -> i64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                let diff = end.signed_duration_since(start).num_days().abs();
                diff.max(1)
            }
            _ => DEFAULT_TRIP_DAYS,
        }
    }
}

impl TransportOption {
    /// Parse the canonical duration string into minutes.
    ///
    /// Accepts a leading integer hour count followed by `h` and an optional
    /// integer minute count (`"2h 15m"`, `"10h"`). Unparsable strings resolve
    /// to 0 minutes so a malformed candidate still ranks instead of being
    /// dropped.
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        parse_duration_minutes(&self.duration)
    }
}

impl HotelOption {
    /// Value score used by the hotel ranking engine: rating per currency
    /// unit per night. Candidate sources guarantee `price_per_night > 0`.
    #[must_use]
    pub fn value_score(&self) -> f64 {
        self.rating / self.price_per_night
    }
}

/// Parse a `"<h>h <m>m"` duration into minutes; 0 when unparsable
#[must_use]
pub fn parse_duration_minutes(duration: &str) -> u32 {
    let trimmed = duration.trim();
    let Some(h_pos) = trimmed.find('h') else {
        return 0;
    };
    let Ok(hours) = trimmed[..h_pos].trim().parse::<u32>() else {
        return 0;
    };

    let rest = trimmed[h_pos + 1..].trim().trim_end_matches('m').trim();
    let minutes = if rest.is_empty() {
        0
    } else {
        rest.parse::<u32>().unwrap_or(0)
    };

    hours * 60 + minutes
}

/// Format a minute count into the canonical `"<h>h <m>m"` form
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
