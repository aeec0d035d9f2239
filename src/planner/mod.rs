//! Planning core
//!
//! The deterministic decision logic of the application:
//! - Route distance estimation from a symmetric lookup table
//! - Transport ranking by user preference under a budget cap
//! - Hotel ranking by value with an affordability filter
//! - Budget allocation and breakdown
//! - Plan assembly tying the above together
//!
//! Everything in this module is synchronous, side-effect-free and total
//! over validated input. Candidate fetching, randomness and I/O live in
//! `providers` and `plan_service`.

pub mod assembler;
pub mod budget;
pub mod distance;
pub mod hotels;
pub mod transport;

// Re-export commonly used items from submodules
pub use assembler::{PlanCandidates, assemble, pick_committed};
pub use budget::{DAILY_EXPENSE_CAP, allocate};
pub use distance::{DistanceTable, FALLBACK_DISTANCE_KM, normalize_city};
pub use hotels::{HOTEL_BUDGET_SHARE, rank_hotels};
pub use transport::{TRANSPORT_BUDGET_SHARE, rank_transport};
