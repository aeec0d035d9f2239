//! Plan orchestration
//!
//! Gathers candidate data from the providers, falling back to the static
//! catalog whenever a provider is unavailable or fails, and hands the
//! collected candidates to the planning core. Provider failures degrade the
//! plan, they never abort it; only invalid input is a hard error.

use std::sync::Arc;

use tracing::instrument;

use crate::catalog;
use crate::config::TripwiseConfig;
use crate::models::{
    HotelOption, Place, PlaceKind, TransportOption, TravelInput, TravelPlan, WeatherSummary,
};
use crate::planner::{self, DistanceTable, PlanCandidates};
use crate::providers::{
    GeoapifyPlacesClient, HotelSource, OpenWeatherClient, PlacesSource, TransportGenerator,
    TransportSource, WeatherSource,
};

/// Collects candidates from the configured sources and assembles plans
pub struct PlanService {
    transport: Arc<dyn TransportSource>,
    hotels: Option<Arc<dyn HotelSource>>,
    places: Option<Arc<dyn PlacesSource>>,
    weather: Option<Arc<dyn WeatherSource>>,
    distances: DistanceTable,
}

impl PlanService {
    /// Wire up sources from configuration. The transport generator is always
    /// available; hotel, places and weather sources require API keys and are
    /// replaced by the static catalog when the keys are absent.
    #[must_use]
    pub fn from_config(config: &TripwiseConfig) -> Self {
        let transport: Arc<dyn TransportSource> = Arc::new(TransportGenerator::new(
            DistanceTable::default(),
            config.planner.candidate_seed,
        ));

        let geoapify = config.geo.api_key.as_ref().map(|key| {
            Arc::new(GeoapifyPlacesClient::new(
                key.clone(),
                config.geo.base_url.clone(),
                config.geo.radius_m,
                config.planner.candidate_seed,
                config.cache.ttl_hours,
            ))
        });
        if geoapify.is_none() {
            tracing::info!("no Geoapify API key configured, using the static catalog");
        }

        let weather: Option<Arc<dyn WeatherSource>> = config.weather.api_key.as_ref().map(|key| {
            Arc::new(OpenWeatherClient::new(
                key.clone(),
                config.weather.base_url.clone(),
                config.cache.ttl_hours,
            )) as Arc<dyn WeatherSource>
        });
        if weather.is_none() {
            tracing::info!("no weather API key configured, using the static snapshot");
        }

        Self {
            transport,
            hotels: geoapify
                .clone()
                .map(|client| client as Arc<dyn HotelSource>),
            places: geoapify.map(|client| client as Arc<dyn PlacesSource>),
            weather,
            distances: DistanceTable::default(),
        }
    }

    /// Wire up explicit sources; `None` falls back to the static catalog.
    #[must_use]
    pub fn new(
        transport: Arc<dyn TransportSource>,
        hotels: Option<Arc<dyn HotelSource>>,
        places: Option<Arc<dyn PlacesSource>>,
        weather: Option<Arc<dyn WeatherSource>>,
    ) -> Self {
        Self {
            transport,
            hotels,
            places,
            weather,
            distances: DistanceTable::default(),
        }
    }

    /// Estimated route distance in kilometers
    #[must_use]
    pub fn route_distance(&self, source: &str, destination: &str) -> f64 {
        self.distances.distance(source, destination)
    }

    /// Transport candidates for a route, unranked
    pub async fn transport_candidates(
        &self,
        source: &str,
        destination: &str,
    ) -> Vec<TransportOption> {
        match self.transport.fetch_options(source, destination).await {
            Ok(options) => options,
            Err(error) => {
                tracing::warn!("transport source failed, using catalog: {error:#}");
                catalog::fallback_transport()
            }
        }
    }

    /// Hotel candidates for a city, unranked
    pub async fn hotel_candidates(&self, city: &str) -> Vec<HotelOption> {
        match &self.hotels {
            Some(source) => match source.fetch_hotels(city).await {
                Ok(hotels) if !hotels.is_empty() => hotels,
                Ok(_) => {
                    tracing::warn!("hotel source returned nothing for {city}, using catalog");
                    catalog::fallback_hotels()
                }
                Err(error) => {
                    tracing::warn!("hotel source failed for {city}, using catalog: {error:#}");
                    catalog::fallback_hotels()
                }
            },
            None => catalog::fallback_hotels(),
        }
    }

    /// Experience candidates for a city
    pub async fn place_candidates(&self, city: &str, kind: PlaceKind) -> Vec<Place> {
        match &self.places {
            Some(source) => match source.fetch_places(city, kind).await {
                Ok(places) if !places.is_empty() => places,
                Ok(_) => {
                    tracing::warn!("places source returned no {kind:?} for {city}, using catalog");
                    catalog::fallback_places(kind)
                }
                Err(error) => {
                    tracing::warn!("places source failed for {city}, using catalog: {error:#}");
                    catalog::fallback_places(kind)
                }
            },
            None => catalog::fallback_places(kind),
        }
    }

    /// Weather snapshot for a city
    pub async fn weather_snapshot(&self, city: &str) -> WeatherSummary {
        match &self.weather {
            Some(source) => match source.fetch_weather(city).await {
                Ok(summary) => summary,
                Err(error) => {
                    tracing::warn!("weather source failed for {city}, using fallback: {error:#}");
                    catalog::fallback_weather()
                }
            },
            None => catalog::fallback_weather(),
        }
    }

    /// Build a complete travel plan for the request.
    ///
    /// Fails only on invalid input; every provider failure is absorbed by the
    /// fallback catalog before the planning core runs.
    #[instrument(skip(self, input), fields(source = %input.source, destination = %input.destination))]
    pub async fn plan(&self, input: TravelInput) -> crate::Result<TravelPlan> {
        input.validate()?;

        let destination = input.destination.clone();
        let (transport, hotels, attractions, food, shopping, weather) = tokio::join!(
            self.transport_candidates(&input.source, &destination),
            self.hotel_candidates(&destination),
            self.place_candidates(&destination, PlaceKind::Attraction),
            self.place_candidates(&destination, PlaceKind::Food),
            self.place_candidates(&destination, PlaceKind::Shopping),
            self.weather_snapshot(&destination),
        );

        let candidates = PlanCandidates {
            transport,
            hotels,
            attractions,
            food,
            shopping,
            weather,
        };

        planner::assemble(input, candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Preference;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct FailingTransport;

    #[async_trait]
    impl TransportSource for FailingTransport {
        async fn fetch_options(
            &self,
            _source: &str,
            _destination: &str,
        ) -> anyhow::Result<Vec<TransportOption>> {
            Err(anyhow!("network down"))
        }
    }

    fn input() -> TravelInput {
        TravelInput {
            budget: 15_000.0,
            source: "Mumbai".to_string(),
            destination: "Goa".to_string(),
            start_date: None,
            end_date: None,
            preference: Preference::Balanced,
        }
    }

    fn catalog_service() -> PlanService {
        PlanService::new(
            Arc::new(TransportGenerator::new(DistanceTable::default(), 7)),
            None,
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_plan_with_catalog_fallbacks() {
        let plan = catalog_service().plan(input()).await.unwrap();
        assert!(!plan.transport.is_empty());
        assert!(!plan.hotels.is_empty());
        assert!(!plan.attractions.is_empty());
        assert!(!plan.food.is_empty());
        assert!(!plan.shopping.is_empty());
        assert!(plan.warnings.is_empty());
        assert_eq!(plan.budget.total_days, 3);
    }

    #[tokio::test]
    async fn test_plan_rejects_invalid_input() {
        let mut bad = input();
        bad.budget = -5.0;
        let result = catalog_service().plan(bad).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failing_transport_source_falls_back_to_catalog() {
        let service = PlanService::new(Arc::new(FailingTransport), None, None, None);
        let options = service.transport_candidates("Mumbai", "Goa").await;
        assert_eq!(options.len(), catalog::fallback_transport().len());
    }

    #[tokio::test]
    async fn test_plan_is_deterministic() {
        let service = catalog_service();
        let a = service.plan(input()).await.unwrap();
        let b = service.plan(input()).await.unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
