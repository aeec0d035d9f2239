//! Geoapify geocoding
//!
//! Resolves a city name to coordinates, with results cached persistently —
//! city centers do not move, but the long TTL keeps the cache from growing
//! stale entries forever.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::cache;
use crate::planner::normalize_city;
use crate::providers::HTTP_CLIENT;

const GEOCODE_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60 * 30);

/// A geocoded city center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Formatted place name as returned by the geocoder
    pub label: String,
}

impl GeoPoint {
    /// Great-circle distance to another point in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let from = HaversineLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        };
        let to = HaversineLocation {
            latitude: other.latitude,
            longitude: other.longitude,
        };
        distance(from, to, Units::Kilometers)
    }
}

/// Client for the Geoapify geocoding API
pub struct GeocodingClient {
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    lat: f64,
    lon: f64,
    formatted: Option<String>,
}

impl GeocodingClient {
    #[must_use]
    pub fn new(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url }
    }

    /// Resolve a city name to its center coordinates.
    #[instrument(skip(self))]
    pub async fn geocode(&self, city: &str) -> Result<GeoPoint> {
        let key = format!("geo:{}", normalize_city(city));

        if let Some(cached) = cache::get::<GeoPoint>(&key).await? {
            return Ok(cached);
        }

        let point = self.geocode_call(city).await?;
        cache::put_jittered(&key, point.clone(), GEOCODE_CACHE_TTL).await?;
        Ok(point)
    }

    async fn geocode_call(&self, city: &str) -> Result<GeoPoint> {
        tracing::debug!("geocoding {city}");
        let url = format!(
            "{}/v1/geocode/search?text={}&format=json&apiKey={}",
            self.base_url,
            urlencoding::encode(city),
            self.api_key
        );

        let response = HTTP_CLIENT.get(url).send().await?;
        let response: GeocodeResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse geocoding response")?;

        let result = response
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Location not found: {city}"))?;

        Ok(GeoPoint {
            latitude: result.lat,
            longitude: result.lon,
            label: result.formatted.unwrap_or_else(|| city.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_km_between_known_points() {
        // Mumbai to Pune is roughly 120 km as the crow flies
        let mumbai = GeoPoint {
            latitude: 19.0760,
            longitude: 72.8777,
            label: "Mumbai".to_string(),
        };
        let pune = GeoPoint {
            latitude: 18.5204,
            longitude: 73.8567,
            label: "Pune".to_string(),
        };
        let d = mumbai.distance_km(&pune);
        assert!((100.0..150.0).contains(&d), "unexpected distance {d}");
    }

    #[test]
    fn test_distance_km_to_self_is_zero() {
        let p = GeoPoint {
            latitude: 28.6139,
            longitude: 77.2090,
            label: "Delhi".to_string(),
        };
        assert!(p.distance_km(&p).abs() < 1e-6);
    }
}
