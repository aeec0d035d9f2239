//! External data providers
//!
//! Everything that fetches or generates candidate data for the planning
//! core lives here, behind small async traits so the plan service can mix
//! live API-backed sources with the static fallback catalog. The core
//! itself never performs I/O.

pub mod geocode;
pub mod places;
pub mod transport;
pub mod weather;

use std::sync::LazyLock;

use anyhow::Result;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::models::{HotelOption, Place, PlaceKind, TransportOption, WeatherSummary};

// Re-export the provider implementations
pub use geocode::{GeoPoint, GeocodingClient};
pub use places::GeoapifyPlacesClient;
pub use transport::TransportGenerator;
pub use weather::OpenWeatherClient;

/// Shared HTTP client with transient-error retry used by all providers
pub static HTTP_CLIENT: LazyLock<ClientWithMiddleware> = LazyLock::new(|| {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
    reqwest_middleware::ClientBuilder::new(reqwest::Client::new())
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
});

/// Source of transport candidates for a route
#[async_trait]
pub trait TransportSource: Send + Sync {
    async fn fetch_options(&self, source: &str, destination: &str)
    -> Result<Vec<TransportOption>>;
}

/// Source of hotel candidates for a city
#[async_trait]
pub trait HotelSource: Send + Sync {
    async fn fetch_hotels(&self, city: &str) -> Result<Vec<HotelOption>>;
}

/// Source of experience records (attractions, food, shopping) for a city
#[async_trait]
pub trait PlacesSource: Send + Sync {
    async fn fetch_places(&self, city: &str, kind: PlaceKind) -> Result<Vec<Place>>;
}

/// Source of a weather snapshot for a city
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSummary>;
}
