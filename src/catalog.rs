//! Static fallback catalog
//!
//! When the external providers are unconfigured or unreachable the plan
//! service still has to answer with a usable plan. This module holds the
//! immutable fallback data: a generic transport result set, a small hotel
//! roster, experience lists and a neutral weather snapshot. Loaded once,
//! never mutated at runtime.

use crate::models::{
    ComfortTier, HotelOption, Place, PlaceKind, TransportMode, TransportOption, WeatherSummary,
};

fn transport(
    id: &str,
    mode: TransportMode,
    name: &str,
    cost: f64,
    duration: &str,
    departure: &str,
    arrival: &str,
    comfort: ComfortTier,
) -> TransportOption {
    TransportOption {
        id: id.to_string(),
        mode,
        name: name.to_string(),
        cost,
        duration: duration.to_string(),
        departure_time: departure.to_string(),
        arrival_time: arrival.to_string(),
        comfort,
        is_recommended: false,
        reason: None,
    }
}

/// Generic transport candidates used when no route-specific data is available
#[must_use]
pub fn fallback_transport() -> Vec<TransportOption> {
    vec![
        transport(
            "flight-1",
            TransportMode::Flight,
            "IndiGo Airlines",
            4500.0,
            "2h 15m",
            "06:30",
            "08:45",
            ComfortTier::Standard,
        ),
        transport(
            "flight-2",
            TransportMode::Flight,
            "Air India Express",
            5200.0,
            "2h 30m",
            "10:00",
            "12:30",
            ComfortTier::Premium,
        ),
        transport(
            "train-1",
            TransportMode::Train,
            "Rajdhani Express",
            1800.0,
            "8h 30m",
            "16:00",
            "00:30",
            ComfortTier::Standard,
        ),
        transport(
            "train-2",
            TransportMode::Train,
            "Shatabdi Express",
            1200.0,
            "6h 45m",
            "06:00",
            "12:45",
            ComfortTier::Standard,
        ),
        transport(
            "bus-1",
            TransportMode::Bus,
            "VRL Travels Volvo",
            800.0,
            "10h 0m",
            "21:00",
            "07:00",
            ComfortTier::Standard,
        ),
        transport(
            "bus-2",
            TransportMode::Bus,
            "Orange Travels",
            600.0,
            "12h 0m",
            "20:00",
            "08:00",
            ComfortTier::Basic,
        ),
    ]
}

fn hotel(
    id: &str,
    name: &str,
    price_per_night: f64,
    rating: f64,
    distance: &str,
    amenities: &[&str],
    image: &str,
) -> HotelOption {
    HotelOption {
        id: id.to_string(),
        name: name.to_string(),
        price_per_night,
        rating,
        distance: distance.to_string(),
        amenities: amenities.iter().map(|a| (*a).to_string()).collect(),
        image: image.to_string(),
        is_best_value: false,
    }
}

/// Generic hotel candidates spanning budget to premium tiers
#[must_use]
pub fn fallback_hotels() -> Vec<HotelOption> {
    vec![
        hotel(
            "hotel-1",
            "The Grand Heritage",
            4500.0,
            4.5,
            "0.5 km from center",
            &["WiFi", "Breakfast", "Pool", "Spa"],
            "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=400",
        ),
        hotel(
            "hotel-2",
            "City Comfort Inn",
            2200.0,
            4.0,
            "1.2 km from center",
            &["WiFi", "Breakfast", "Parking"],
            "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=400",
        ),
        hotel(
            "hotel-3",
            "Budget Stay Plus",
            1200.0,
            3.5,
            "2.5 km from center",
            &["WiFi", "AC", "TV"],
            "https://images.unsplash.com/photo-1590490360182-c33d57733427?w=400",
        ),
        hotel(
            "hotel-4",
            "Backpacker Hostel",
            600.0,
            3.2,
            "3 km from center",
            &["WiFi", "Shared Kitchen"],
            "https://images.unsplash.com/photo-1555854877-bab0e564b8d5?w=400",
        ),
    ]
}

fn place(
    id: &str,
    name: &str,
    description: &str,
    kind: PlaceKind,
    category: Option<&str>,
    image: &str,
) -> Place {
    Place {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        kind,
        category: category.map(str::to_string),
        image: image.to_string(),
    }
}

/// Generic experience list for a category
#[must_use]
pub fn fallback_places(kind: PlaceKind) -> Vec<Place> {
    match kind {
        PlaceKind::Attraction => vec![
            place(
                "attr-1",
                "Historic Fort & Palace",
                "A magnificent 16th-century fort with stunning architecture and panoramic city views.",
                PlaceKind::Attraction,
                None,
                "https://images.unsplash.com/photo-1524492412937-b28074a5d7da?w=400",
            ),
            place(
                "attr-2",
                "Botanical Gardens",
                "Sprawling gardens featuring exotic plants, scenic walking paths, and peaceful lakes.",
                PlaceKind::Attraction,
                None,
                "https://images.unsplash.com/photo-1585320806297-9794b3e4eeae?w=400",
            ),
            place(
                "attr-3",
                "Cultural Museum",
                "World-class museum showcasing local art, history, and cultural heritage.",
                PlaceKind::Attraction,
                None,
                "https://images.unsplash.com/photo-1554907984-15263bfd63bd?w=400",
            ),
        ],
        PlaceKind::Food => vec![
            place(
                "food-1",
                "Street Food Corner",
                "Famous for authentic local street food - chaats, samosas, and fresh juices.",
                PlaceKind::Food,
                Some("Street Food"),
                "https://images.unsplash.com/photo-1601050690597-df0568f70950?w=400",
            ),
            place(
                "food-2",
                "Spice Garden Restaurant",
                "Fine dining with traditional recipes passed down through generations.",
                PlaceKind::Food,
                Some("Restaurant"),
                "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=400",
            ),
            place(
                "food-3",
                "Rooftop Café Vista",
                "Trendy café with fusion cuisine and breathtaking sunset views.",
                PlaceKind::Food,
                Some("Restaurant"),
                "https://images.unsplash.com/photo-1554118811-1e0d58224f24?w=400",
            ),
        ],
        PlaceKind::Shopping => vec![
            place(
                "shop-1",
                "Heritage Bazaar",
                "Traditional market famous for handicrafts, textiles, and authentic souvenirs.",
                PlaceKind::Shopping,
                None,
                "https://images.unsplash.com/photo-1555529669-e69e7aa0ba9a?w=400",
            ),
            place(
                "shop-2",
                "City Central Mall",
                "Modern shopping destination with international brands and entertainment.",
                PlaceKind::Shopping,
                None,
                "https://images.unsplash.com/photo-1519567241046-7f570eee3ce6?w=400",
            ),
        ],
    }
}

/// Neutral weather snapshot used when the weather provider is unavailable
#[must_use]
pub fn fallback_weather() -> WeatherSummary {
    WeatherSummary {
        condition: "Pleasant".to_string(),
        temperature: 26,
        icon: "🌤️".to_string(),
        advice: "Ideal weather conditions for all activities. Enjoy your trip!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_transport_is_well_formed() {
        let options = fallback_transport();
        assert_eq!(options.len(), 6);
        for option in &options {
            assert!(option.cost > 0.0);
            assert!(option.duration_minutes() > 0);
            assert!(!option.is_recommended);
            assert!(option.reason.is_none());
        }
    }

    #[test]
    fn test_fallback_hotels_have_positive_prices() {
        let hotels = fallback_hotels();
        assert_eq!(hotels.len(), 4);
        for hotel in &hotels {
            assert!(hotel.price_per_night > 0.0);
            assert!(hotel.rating > 0.0);
            assert!(!hotel.is_best_value);
        }
    }

    #[test]
    fn test_fallback_places_match_requested_kind() {
        for kind in [PlaceKind::Attraction, PlaceKind::Food, PlaceKind::Shopping] {
            let places = fallback_places(kind);
            assert!(!places.is_empty());
            assert!(places.iter().all(|p| p.kind == kind));
        }
    }
}
