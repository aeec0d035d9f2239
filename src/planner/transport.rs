//! Transport ranking engine
//!
//! Orders transport candidates by the user's stated preference, then flags
//! at most one option as recommended subject to a budget cap. Pure: the
//! output list has the same cardinality as the input and the input is not
//! observed to change between calls.

use crate::models::{Preference, TransportOption};

/// Share of the total budget transport may consume before the top-ranked
/// option loses its recommendation
pub const TRANSPORT_BUDGET_SHARE: f64 = 0.4;

/// Weight on cost in the balanced composite score
const BALANCED_COST_WEIGHT: f64 = 0.6;
/// Weight on duration minutes in the balanced composite score
const BALANCED_MINUTES_WEIGHT: f64 = 10.0;

fn recommendation_reason(preference: Preference) -> &'static str {
    match preference {
        Preference::Cheapest => "Recommended for lowest cost within your budget",
        Preference::Fastest => "Recommended for quickest travel time",
        Preference::Balanced => "Best balance of cost and travel time",
    }
}

fn balanced_score(option: &TransportOption) -> f64 {
    option.cost * BALANCED_COST_WEIGHT
        + f64::from(option.duration_minutes()) * BALANCED_MINUTES_WEIGHT
}

/// Rank transport candidates by preference and annotate the recommendation.
///
/// The returned list is the full candidate set sorted ascending by the
/// preference's comparator (stable, so ties keep input order). The first
/// element after sorting is the candidate recommendation; it is flagged
/// only when its cost stays within [`TRANSPORT_BUDGET_SHARE`] of the total
/// budget, otherwise no element carries a flag.
#[must_use]
pub fn rank_transport(
    options: Vec<TransportOption>,
    preference: Preference,
    budget: f64,
) -> Vec<TransportOption> {
    let mut ranked: Vec<TransportOption> = options
        .into_iter()
        .map(|mut option| {
            option.is_recommended = false;
            option.reason = None;
            option
        })
        .collect();

    match preference {
        Preference::Cheapest => ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost)),
        Preference::Fastest => ranked.sort_by_key(TransportOption::duration_minutes),
        Preference::Balanced => {
            ranked.sort_by(|a, b| balanced_score(a).total_cmp(&balanced_score(b)));
        }
    }

    let max_transport_budget = budget * TRANSPORT_BUDGET_SHARE;
    if let Some(candidate) = ranked.first_mut() {
        if candidate.cost <= max_transport_budget {
            candidate.is_recommended = true;
            candidate.reason = Some(recommendation_reason(preference).to_string());
        } else {
            tracing::debug!(
                cost = candidate.cost,
                cap = max_transport_budget,
                "top-ranked transport exceeds budget cap, no recommendation"
            );
        }
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComfortTier, TransportMode};
    use rstest::rstest;

    fn option(id: &str, mode: TransportMode, cost: f64, duration: &str) -> TransportOption {
        TransportOption {
            id: id.to_string(),
            mode,
            name: id.to_string(),
            cost,
            duration: duration.to_string(),
            departure_time: "06:30".to_string(),
            arrival_time: "08:45".to_string(),
            comfort: ComfortTier::Standard,
            is_recommended: false,
            reason: None,
        }
    }

    fn candidates() -> Vec<TransportOption> {
        vec![
            option("flight-1", TransportMode::Flight, 4500.0, "2h 15m"),
            option("train-1", TransportMode::Train, 1800.0, "8h 30m"),
            option("bus-1", TransportMode::Bus, 800.0, "10h 0m"),
        ]
    }

    #[test]
    fn test_cheapest_recommends_bus_within_cap() {
        let ranked = rank_transport(candidates(), Preference::Cheapest, 10_000.0);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].id, "bus-1");
        assert!(ranked[0].is_recommended);
        assert_eq!(
            ranked[0].reason.as_deref(),
            Some("Recommended for lowest cost within your budget")
        );
        // 800 <= 10000 * 0.4
        assert!(ranked[0].cost <= 10_000.0 * TRANSPORT_BUDGET_SHARE);
    }

    #[test]
    fn test_fastest_recommends_flight() {
        let ranked = rank_transport(candidates(), Preference::Fastest, 20_000.0);

        assert_eq!(ranked[0].id, "flight-1");
        assert!(ranked[0].is_recommended);
        assert_eq!(
            ranked[0].reason.as_deref(),
            Some("Recommended for quickest travel time")
        );
    }

    #[test]
    fn test_over_cap_top_option_is_not_flagged() {
        // Cheapest option costs 1800, cap is 1000 * 0.4 = 400
        let options = vec![
            option("train-1", TransportMode::Train, 1800.0, "8h 30m"),
            option("flight-1", TransportMode::Flight, 4500.0, "2h 15m"),
        ];
        let ranked = rank_transport(options, Preference::Cheapest, 1000.0);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, "train-1");
        assert!(ranked.iter().all(|t| !t.is_recommended));
        assert!(ranked.iter().all(|t| t.reason.is_none()));
    }

    #[test]
    fn test_balanced_weighs_cost_and_time() {
        // flight: 4500 * 0.6 + 135 * 10 = 4050
        // train:  1800 * 0.6 + 510 * 10 = 6180
        // bus:     800 * 0.6 + 600 * 10 = 6480
        let ranked = rank_transport(candidates(), Preference::Balanced, 20_000.0);

        assert_eq!(ranked[0].id, "flight-1");
        assert_eq!(ranked[1].id, "train-1");
        assert_eq!(ranked[2].id, "bus-1");
        assert_eq!(
            ranked[0].reason.as_deref(),
            Some("Best balance of cost and travel time")
        );
    }

    #[rstest]
    #[case(Preference::Cheapest)]
    #[case(Preference::Fastest)]
    #[case(Preference::Balanced)]
    fn test_at_most_one_recommended(#[case] preference: Preference) {
        let ranked = rank_transport(candidates(), preference, 10_000.0);
        assert!(ranked.iter().filter(|t| t.is_recommended).count() <= 1);
        for option in &ranked {
            assert_eq!(option.is_recommended, option.reason.is_some());
        }
    }

    #[rstest]
    #[case(Preference::Cheapest)]
    #[case(Preference::Fastest)]
    #[case(Preference::Balanced)]
    fn test_cardinality_preserved(#[case] preference: Preference) {
        let ranked = rank_transport(candidates(), preference, 10_000.0);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_cheapest_is_monotone_by_cost() {
        let ranked = rank_transport(candidates(), Preference::Cheapest, 10_000.0);
        for pair in ranked.windows(2) {
            assert!(pair[0].cost <= pair[1].cost);
        }
    }

    #[test]
    fn test_fastest_is_monotone_by_minutes() {
        let ranked = rank_transport(candidates(), Preference::Fastest, 10_000.0);
        for pair in ranked.windows(2) {
            assert!(pair[0].duration_minutes() <= pair[1].duration_minutes());
        }
    }

    #[test]
    fn test_empty_input_returns_empty() {
        let ranked = rank_transport(Vec::new(), Preference::Cheapest, 10_000.0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_single_option_is_evaluated_against_cap() {
        let ranked = rank_transport(
            vec![option("bus-1", TransportMode::Bus, 800.0, "10h 0m")],
            Preference::Cheapest,
            10_000.0,
        );
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].is_recommended);

        let ranked = rank_transport(
            vec![option("bus-1", TransportMode::Bus, 800.0, "10h 0m")],
            Preference::Cheapest,
            1000.0,
        );
        assert!(!ranked[0].is_recommended);
    }

    #[test]
    fn test_unparsable_duration_ranks_as_zero_minutes() {
        let options = vec![
            option("train-1", TransportMode::Train, 1800.0, "8h 30m"),
            option("mystery", TransportMode::Bus, 900.0, "overnight"),
        ];
        let ranked = rank_transport(options, Preference::Fastest, 10_000.0);
        // 0 minutes sorts first rather than dropping the malformed entry
        assert_eq!(ranked[0].id, "mystery");
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let a = rank_transport(candidates(), Preference::Balanced, 10_000.0);
        let b = rank_transport(candidates(), Preference::Balanced, 10_000.0);
        let ids_a: Vec<_> = a.iter().map(|t| (&t.id, t.is_recommended)).collect();
        let ids_b: Vec<_> = b.iter().map(|t| (&t.id, t.is_recommended)).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_stale_flags_on_input_are_reset() {
        let mut options = candidates();
        options[0].is_recommended = true;
        options[0].reason = Some("stale".to_string());
        let ranked = rank_transport(options, Preference::Cheapest, 10_000.0);
        let flagged: Vec<_> = ranked.iter().filter(|t| t.is_recommended).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].id, "bus-1");
    }
}
