//! Route distance estimation
//!
//! Resolves a (source, destination) city pair to an approximate road
//! distance via a precomputed symmetric lookup table. The table is built
//! once and injected as a read-only dependency; unknown pairs fall back to
//! a fixed default so the estimator is total.

use std::collections::HashMap;

/// Distance assumed for city pairs absent from the table, in kilometers
pub const FALLBACK_DISTANCE_KM: f64 = 800.0;

/// Immutable symmetric city-pair distance table
#[derive(Debug, Clone)]
pub struct DistanceTable {
    entries: HashMap<(String, String), f64>,
    fallback_km: f64,
}

/// Normalize a city name for lookup: case-fold, trim and strip internal
/// whitespace, so "New  Delhi " and "newdelhi" hit the same entry
#[must_use]
pub fn normalize_city(city: &str) -> String {
    city.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

impl DistanceTable {
    /// Build a table from `(source, destination, km)` triples.
    ///
    /// Each pair is stored in both directions; later duplicates overwrite
    /// earlier ones.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str, f64)], fallback_km: f64) -> Self {
        let mut entries = HashMap::with_capacity(pairs.len() * 2);
        for (from, to, km) in pairs {
            let a = normalize_city(from);
            let b = normalize_city(to);
            entries.insert((a.clone(), b.clone()), *km);
            entries.insert((b, a), *km);
        }
        Self {
            entries,
            fallback_km,
        }
    }

    /// Approximate distance between two cities in kilometers.
    ///
    /// Never fails: unknown pairs (including a city paired with itself)
    /// resolve to the fallback distance.
    #[must_use]
    pub fn distance(&self, source: &str, destination: &str) -> f64 {
        let key = (normalize_city(source), normalize_city(destination));
        self.entries.get(&key).copied().unwrap_or(self.fallback_km)
    }
}

impl Default for DistanceTable {
    /// Table of approximate distances between major Indian cities
    fn default() -> Self {
        Self::from_pairs(
            &[
                ("mumbai", "delhi", 1400.0),
                ("mumbai", "bangalore", 980.0),
                ("mumbai", "chennai", 1340.0),
                ("mumbai", "kolkata", 1990.0),
                ("mumbai", "hyderabad", 710.0),
                ("mumbai", "pune", 150.0),
                ("mumbai", "jaipur", 1150.0),
                ("mumbai", "goa", 590.0),
                ("mumbai", "ahmedabad", 530.0),
                ("mumbai", "kerala", 1100.0),
                ("mumbai", "agra", 1200.0),
                ("mumbai", "varanasi", 1500.0),
                ("mumbai", "udaipur", 650.0),
                ("mumbai", "manali", 2000.0),
                ("delhi", "bangalore", 2150.0),
                ("delhi", "chennai", 2180.0),
                ("delhi", "kolkata", 1500.0),
                ("delhi", "hyderabad", 1550.0),
                ("delhi", "pune", 1450.0),
                ("delhi", "jaipur", 280.0),
                ("delhi", "goa", 1900.0),
                ("delhi", "ahmedabad", 940.0),
                ("delhi", "kerala", 2700.0),
                ("delhi", "agra", 230.0),
                ("delhi", "varanasi", 820.0),
                ("delhi", "udaipur", 660.0),
                ("delhi", "manali", 550.0),
                ("bangalore", "chennai", 350.0),
                ("bangalore", "kolkata", 1880.0),
                ("bangalore", "hyderabad", 570.0),
                ("bangalore", "pune", 840.0),
                ("bangalore", "jaipur", 1920.0),
                ("bangalore", "goa", 560.0),
                ("bangalore", "ahmedabad", 1500.0),
                ("bangalore", "kerala", 500.0),
                ("bangalore", "agra", 1950.0),
                ("bangalore", "varanasi", 1900.0),
                ("bangalore", "udaipur", 1400.0),
                ("bangalore", "manali", 2700.0),
                ("chennai", "kolkata", 1670.0),
                ("chennai", "hyderabad", 630.0),
                ("chennai", "pune", 1180.0),
                ("chennai", "jaipur", 1980.0),
                ("chennai", "goa", 860.0),
                ("chennai", "ahmedabad", 1850.0),
                ("chennai", "kerala", 700.0),
                ("chennai", "agra", 2000.0),
                ("chennai", "varanasi", 1800.0),
                ("chennai", "udaipur", 1700.0),
                ("chennai", "manali", 2800.0),
                ("kolkata", "hyderabad", 1500.0),
                ("kolkata", "pune", 1880.0),
                ("kolkata", "jaipur", 1500.0),
                ("kolkata", "goa", 2000.0),
                ("kolkata", "ahmedabad", 1900.0),
                ("kolkata", "kerala", 2200.0),
                ("kolkata", "agra", 1300.0),
                ("kolkata", "varanasi", 680.0),
                ("kolkata", "udaipur", 1600.0),
                ("kolkata", "manali", 1900.0),
                ("hyderabad", "pune", 560.0),
                ("hyderabad", "jaipur", 1350.0),
                ("hyderabad", "goa", 580.0),
                ("hyderabad", "ahmedabad", 1100.0),
                ("hyderabad", "kerala", 900.0),
                ("hyderabad", "agra", 1400.0),
                ("hyderabad", "varanasi", 1200.0),
                ("hyderabad", "udaipur", 1000.0),
                ("hyderabad", "manali", 2100.0),
                ("pune", "jaipur", 1150.0),
                ("pune", "goa", 450.0),
                ("pune", "ahmedabad", 660.0),
                ("pune", "kerala", 980.0),
                ("pune", "agra", 1250.0),
                ("pune", "varanasi", 1400.0),
                ("pune", "udaipur", 750.0),
                ("pune", "manali", 2000.0),
                ("jaipur", "goa", 1600.0),
                ("jaipur", "ahmedabad", 660.0),
                ("jaipur", "kerala", 2400.0),
                ("jaipur", "agra", 240.0),
                ("jaipur", "varanasi", 800.0),
                ("jaipur", "udaipur", 400.0),
                ("jaipur", "manali", 750.0),
                ("goa", "ahmedabad", 1100.0),
                ("goa", "kerala", 450.0),
                ("goa", "agra", 1700.0),
                ("goa", "varanasi", 1800.0),
                ("goa", "udaipur", 1100.0),
                ("goa", "manali", 2400.0),
                ("ahmedabad", "kerala", 1700.0),
                ("ahmedabad", "agra", 750.0),
                ("ahmedabad", "varanasi", 1200.0),
                ("ahmedabad", "udaipur", 260.0),
                ("ahmedabad", "manali", 1400.0),
                ("kerala", "agra", 2500.0),
                ("kerala", "varanasi", 2300.0),
                ("kerala", "udaipur", 1800.0),
                ("kerala", "manali", 3200.0),
                ("agra", "varanasi", 600.0),
                ("agra", "udaipur", 480.0),
                ("agra", "manali", 700.0),
                ("varanasi", "udaipur", 1000.0),
                ("varanasi", "manali", 1300.0),
                ("udaipur", "manali", 1100.0),
            ],
            FALLBACK_DISTANCE_KM,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_city() {
        assert_eq!(normalize_city("  New  Delhi "), "newdelhi");
        assert_eq!(normalize_city("MUMBAI"), "mumbai");
    }

    #[test]
    fn test_known_pair() {
        let table = DistanceTable::default();
        assert_eq!(table.distance("Mumbai", "Delhi"), 1400.0);
    }

    #[test]
    fn test_lookup_is_symmetric() {
        let table = DistanceTable::default();
        assert_eq!(
            table.distance("Goa", "Kolkata"),
            table.distance("Kolkata", "Goa")
        );
    }

    #[test]
    fn test_lookup_normalizes_input() {
        let table = DistanceTable::default();
        assert_eq!(table.distance(" MUMBAI ", "pune"), 150.0);
    }

    #[test]
    fn test_unknown_pair_falls_back() {
        let table = DistanceTable::default();
        assert_eq!(table.distance("Atlantis", "Shangri-La"), FALLBACK_DISTANCE_KM);
        assert!(table.distance("Atlantis", "Shangri-La") > 0.0);
    }

    #[test]
    fn test_custom_table_and_fallback() {
        let table = DistanceTable::from_pairs(&[("a", "b", 100.0)], 42.0);
        assert_eq!(table.distance("b", "a"), 100.0);
        assert_eq!(table.distance("a", "c"), 42.0);
    }
}
