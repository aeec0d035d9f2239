//! Geoapify places provider
//!
//! Backs both the hotel and the experience (attractions, food, shopping)
//! lookups. Geoapify returns names, coordinates and the occasional star
//! rating but no prices, so nightly rates are estimated from the rating
//! and a seeded jitter; the same city with the same seed always produces
//! the same estimates.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::{RngExt, SeedableRng, rngs::StdRng};
use serde::Deserialize;
use tracing::instrument;

use crate::cache;
use crate::models::{HotelOption, Place, PlaceKind};
use crate::planner::normalize_city;
use crate::providers::{GeoPoint, GeocodingClient, HTTP_CLIENT, HotelSource, PlacesSource};

const MAX_HOTELS: usize = 8;
const MAX_PLACES: usize = 6;
const MAX_AMENITIES: usize = 4;

const HOTEL_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=400",
    "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=400",
    "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=400",
    "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=400",
];

const PLACE_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1564507592333-c60657eea523?w=400",
    "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=400",
    "https://images.unsplash.com/photo-1555529669-e69e7aa0ba9a?w=400",
];

const FOOD_CATEGORIES: [&str; 4] = ["Restaurant", "Café", "Bar", "Bakery"];

/// Client for the Geoapify places API; implements both hotel and
/// experience lookups
pub struct GeoapifyPlacesClient {
    geocoder: GeocodingClient,
    api_key: String,
    base_url: String,
    radius_m: u32,
    seed: u64,
    cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    name: Option<String>,
    place_id: Option<String>,
    formatted: Option<String>,
    lat: f64,
    lon: f64,
    datasource: Option<Datasource>,
}

#[derive(Debug, Deserialize)]
struct Datasource {
    raw: Option<RawTags>,
}

#[derive(Debug, Deserialize)]
struct RawTags {
    stars: Option<f64>,
    cuisine: Option<String>,
}

/// Geoapify category filter for an experience kind
#[must_use]
pub fn categories_for_kind(kind: PlaceKind) -> &'static str {
    match kind {
        PlaceKind::Attraction => "tourism.sights,tourism.attraction",
        PlaceKind::Food => "catering.restaurant,catering.cafe",
        PlaceKind::Shopping => "commercial.shopping_mall,commercial.marketplace",
    }
}

/// Amenity list estimated from rating and price level, capped at four
#[must_use]
pub fn amenities_for(rating: f64, price_level: u32) -> Vec<String> {
    let mut amenities = vec!["WiFi".to_string()];
    if rating >= 4.0 {
        amenities.push("Breakfast".to_string());
    }
    if price_level >= 3 {
        amenities.push("Pool".to_string());
        amenities.push("Spa".to_string());
    }
    if price_level >= 2 {
        amenities.push("Parking".to_string());
    }
    if rating >= 4.5 {
        amenities.push("Gym".to_string());
    }
    amenities.truncate(MAX_AMENITIES);
    amenities
}

impl GeoapifyPlacesClient {
    #[must_use]
    pub fn new(
        api_key: String,
        base_url: String,
        radius_m: u32,
        seed: u64,
        cache_ttl_hours: u32,
    ) -> Self {
        let geocoder = GeocodingClient::new(api_key.clone(), base_url.clone());
        Self {
            geocoder,
            api_key,
            base_url,
            radius_m,
            seed,
            cache_ttl: Duration::from_secs(u64::from(cache_ttl_hours) * 3600),
        }
    }

    fn city_rng(&self, city: &str) -> StdRng {
        let mut hasher = DefaultHasher::new();
        normalize_city(city).hash(&mut hasher);
        StdRng::seed_from_u64(self.seed ^ hasher.finish())
    }

    async fn query_places(&self, center: &GeoPoint, categories: &str) -> Result<Vec<Feature>> {
        let url = format!(
            "{}/v2/places?categories={}&filter=circle:{},{},{}&limit=20&apiKey={}",
            self.base_url,
            categories,
            center.longitude,
            center.latitude,
            self.radius_m,
            self.api_key
        );

        let response = HTTP_CLIENT.get(url).send().await?;
        let response: PlacesResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse places response")?;
        Ok(response.features)
    }

    fn build_hotel(
        &self,
        idx: usize,
        properties: &FeatureProperties,
        center: &GeoPoint,
        rng: &mut StdRng,
    ) -> HotelOption {
        let stars = properties
            .datasource
            .as_ref()
            .and_then(|d| d.raw.as_ref())
            .and_then(|r| r.stars);
        let rating = match stars {
            Some(s) => s.clamp(1.0, 5.0),
            None => ((3.0 + rng.random_range(0.0..2.0f64)) * 10.0).round() / 10.0,
        };
        let price_level = (rating.floor() as u32).min(4);
        let price_per_night =
            (1500.0 + f64::from(price_level) * 1500.0 + rating * 200.0
                + rng.random_range(0.0..500.0))
            .round();

        let location = GeoPoint {
            latitude: properties.lat,
            longitude: properties.lon,
            label: String::new(),
        };
        let distance = format!("{:.1} km from center", center.distance_km(&location));

        HotelOption {
            id: properties
                .place_id
                .clone()
                .unwrap_or_else(|| format!("hotel-{}", idx + 1)),
            name: properties
                .name
                .clone()
                .unwrap_or_else(|| format!("Hotel {}", idx + 1)),
            price_per_night,
            rating,
            distance,
            amenities: amenities_for(rating, price_level),
            image: HOTEL_IMAGES[idx % HOTEL_IMAGES.len()].to_string(),
            is_best_value: false,
        }
    }

    fn build_place(
        idx: usize,
        properties: &FeatureProperties,
        kind: PlaceKind,
        rng: &mut StdRng,
    ) -> Place {
        let category = match kind {
            PlaceKind::Food => Some(
                properties
                    .datasource
                    .as_ref()
                    .and_then(|d| d.raw.as_ref())
                    .and_then(|r| r.cuisine.clone())
                    .unwrap_or_else(|| {
                        FOOD_CATEGORIES[rng.random_range(0..FOOD_CATEGORIES.len())].to_string()
                    }),
            ),
            _ => None,
        };

        Place {
            id: properties
                .place_id
                .clone()
                .unwrap_or_else(|| format!("place-{}", idx + 1)),
            name: properties
                .name
                .clone()
                .unwrap_or_else(|| format!("Place {}", idx + 1)),
            description: properties
                .formatted
                .clone()
                .unwrap_or_else(|| "A popular local spot worth a visit".to_string()),
            kind,
            category,
            image: PLACE_IMAGES[idx % PLACE_IMAGES.len()].to_string(),
        }
    }
}

#[async_trait]
impl HotelSource for GeoapifyPlacesClient {
    #[instrument(skip(self))]
    async fn fetch_hotels(&self, city: &str) -> Result<Vec<HotelOption>> {
        let key = format!("hotels:{}", normalize_city(city));
        if let Some(cached) = cache::get::<Vec<HotelOption>>(&key).await? {
            return Ok(cached);
        }

        let center = self.geocoder.geocode(city).await?;
        let features = self.query_places(&center, "accommodation.hotel").await?;
        let mut rng = self.city_rng(city);

        let hotels: Vec<HotelOption> = features
            .iter()
            .filter(|f| f.properties.name.is_some())
            .take(MAX_HOTELS)
            .enumerate()
            .map(|(idx, f)| self.build_hotel(idx, &f.properties, &center, &mut rng))
            .collect();

        tracing::debug!(count = hotels.len(), "fetched hotels for {city}");
        cache::put_jittered(&key, hotels.clone(), self.cache_ttl).await?;
        Ok(hotels)
    }
}

#[async_trait]
impl PlacesSource for GeoapifyPlacesClient {
    #[instrument(skip(self))]
    async fn fetch_places(&self, city: &str, kind: PlaceKind) -> Result<Vec<Place>> {
        let key = format!("places:{:?}:{}", kind, normalize_city(city));
        if let Some(cached) = cache::get::<Vec<Place>>(&key).await? {
            return Ok(cached);
        }

        let center = self.geocoder.geocode(city).await?;
        let features = self.query_places(&center, categories_for_kind(kind)).await?;
        let mut rng = self.city_rng(city);

        let places: Vec<Place> = features
            .iter()
            .filter(|f| f.properties.name.is_some())
            .take(MAX_PLACES)
            .enumerate()
            .map(|(idx, f)| Self::build_place(idx, &f.properties, kind, &mut rng))
            .collect();

        tracing::debug!(count = places.len(), "fetched {kind:?} places for {city}");
        cache::put_jittered(&key, places.clone(), self.cache_ttl).await?;
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn client() -> GeoapifyPlacesClient {
        GeoapifyPlacesClient::new(
            "test-api-key".to_string(),
            "https://api.geoapify.com".to_string(),
            10_000,
            7,
            6,
        )
    }

    #[rstest]
    #[case(PlaceKind::Attraction, "tourism")]
    #[case(PlaceKind::Food, "catering")]
    #[case(PlaceKind::Shopping, "commercial")]
    fn test_categories_for_kind(#[case] kind: PlaceKind, #[case] prefix: &str) {
        assert!(categories_for_kind(kind).starts_with(prefix));
    }

    #[test]
    fn test_amenities_scale_with_rating_and_level() {
        assert_eq!(amenities_for(3.2, 1), vec!["WiFi"]);
        assert_eq!(amenities_for(4.2, 2), vec!["WiFi", "Breakfast", "Parking"]);
        let premium = amenities_for(4.8, 4);
        assert_eq!(premium.len(), MAX_AMENITIES);
        assert_eq!(premium[0], "WiFi");
    }

    #[test]
    fn test_hotel_estimation_is_deterministic_per_city() {
        let properties = FeatureProperties {
            name: Some("Seaside Retreat".to_string()),
            place_id: Some("p1".to_string()),
            formatted: Some("Seaside Retreat, Goa".to_string()),
            lat: 15.30,
            lon: 74.08,
            datasource: None,
        };
        let center = GeoPoint {
            latitude: 15.2993,
            longitude: 74.1240,
            label: "Goa".to_string(),
        };
        let c = client();
        let a = c.build_hotel(0, &properties, &center, &mut c.city_rng("Goa"));
        let b = c.build_hotel(0, &properties, &center, &mut c.city_rng("Goa"));
        assert_eq!(a.price_per_night, b.price_per_night);
        assert_eq!(a.rating, b.rating);
        assert!(a.price_per_night > 0.0);
        assert!((1.0..=5.0).contains(&a.rating));
        assert!(a.distance.ends_with("km from center"));
    }

    #[test]
    fn test_hotel_uses_datasource_stars_when_present() {
        let properties = FeatureProperties {
            name: Some("Grand Palace".to_string()),
            place_id: None,
            formatted: None,
            lat: 15.30,
            lon: 74.08,
            datasource: Some(Datasource {
                raw: Some(RawTags {
                    stars: Some(4.0),
                    cuisine: None,
                }),
            }),
        };
        let center = GeoPoint {
            latitude: 15.2993,
            longitude: 74.1240,
            label: "Goa".to_string(),
        };
        let c = client();
        let hotel = c.build_hotel(2, &properties, &center, &mut c.city_rng("Goa"));
        assert_eq!(hotel.rating, 4.0);
        assert_eq!(hotel.id, "hotel-3");
    }

    #[test]
    fn test_food_place_gets_a_category() {
        let properties = FeatureProperties {
            name: Some("Corner House".to_string()),
            place_id: Some("p9".to_string()),
            formatted: Some("Corner House, Bangalore".to_string()),
            lat: 12.97,
            lon: 77.59,
            datasource: None,
        };
        let c = client();
        let place = GeoapifyPlacesClient::build_place(
            0,
            &properties,
            PlaceKind::Food,
            &mut c.city_rng("Bangalore"),
        );
        let category = place.category.expect("food places carry a category");
        assert!(FOOD_CATEGORIES.contains(&category.as_str()));
    }

    #[test]
    fn test_attraction_place_has_no_category() {
        let properties = FeatureProperties {
            name: Some("Gateway of India".to_string()),
            place_id: None,
            formatted: None,
            lat: 18.92,
            lon: 72.83,
            datasource: None,
        };
        let c = client();
        let place = GeoapifyPlacesClient::build_place(
            0,
            &properties,
            PlaceKind::Attraction,
            &mut c.city_rng("Mumbai"),
        );
        assert!(place.category.is_none());
        assert_eq!(place.kind, PlaceKind::Attraction);
    }
}
