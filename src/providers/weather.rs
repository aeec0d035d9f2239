//! OpenWeatherMap snapshot provider
//!
//! Fetches current weather for the destination city and condenses it into
//! the condition/temperature/icon/advice record the plan carries. The
//! advice strings mirror what the presentation layer shows next to the
//! weather widget.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use crate::cache;
use crate::models::WeatherSummary;
use crate::planner::normalize_city;
use crate::providers::{HTTP_CLIENT, WeatherSource};

/// Client for the OpenWeatherMap current-weather API
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    weather: Vec<ConditionEntry>,
    main: MainEntry,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: String,
}

#[derive(Debug, Deserialize)]
struct MainEntry {
    temp: f64,
}

/// Map a weather condition to the icon and sightseeing advice shown to the
/// user
#[must_use]
pub fn advice_for_condition(condition: &str) -> (&'static str, &'static str) {
    let lower = condition.to_lowercase();
    if lower.contains("clear") || lower.contains("sun") {
        (
            "☀️",
            "Perfect weather for outdoor sightseeing! Carry sunscreen and stay hydrated.",
        )
    } else if lower.contains("cloud") {
        (
            "⛅",
            "Great weather for exploring! Comfortable temperature for walking tours.",
        )
    } else if lower.contains("rain") || lower.contains("drizzle") {
        (
            "🌧️",
            "Carry an umbrella. Good time to visit indoor attractions and museums.",
        )
    } else if lower.contains("thunder") || lower.contains("storm") {
        (
            "⛈️",
            "Stay indoors if possible. Check local attractions for indoor options.",
        )
    } else if lower.contains("snow") {
        ("❄️", "Bundle up warm! Great weather for winter activities.")
    } else if lower.contains("mist") || lower.contains("fog") {
        ("🌫️", "Low visibility expected. Take care while traveling.")
    } else {
        ("🌤️", "Enjoy your trip!")
    }
}

impl OpenWeatherClient {
    #[must_use]
    pub fn new(api_key: String, base_url: String, cache_ttl_hours: u32) -> Self {
        Self {
            api_key,
            base_url,
            cache_ttl: Duration::from_secs(u64::from(cache_ttl_hours) * 3600),
        }
    }

    async fn fetch_call(&self, city: &str) -> Result<WeatherSummary> {
        tracing::debug!("fetching weather for {city}");
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(city),
            self.api_key
        );

        let response = HTTP_CLIENT.get(url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "Weather API returned status {} for {city}",
                response.status()
            ));
        }

        let data: CurrentWeatherResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse weather response")?;

        let condition = data
            .weather
            .first()
            .map_or_else(|| "Unknown".to_string(), |w| w.main.clone());
        let (icon, advice) = advice_for_condition(&condition);

        Ok(WeatherSummary {
            condition,
            temperature: data.main.temp.round() as i32,
            icon: icon.to_string(),
            advice: advice.to_string(),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSummary> {
        let key = format!("weather:{}", normalize_city(city));

        if let Some(cached) = cache::get::<WeatherSummary>(&key).await? {
            return Ok(cached);
        }

        let summary = self.fetch_call(city).await?;
        cache::put_jittered(&key, summary.clone(), self.cache_ttl).await?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Clear", "☀️")]
    #[case("Clouds", "⛅")]
    #[case("Rain", "🌧️")]
    #[case("Drizzle", "🌧️")]
    #[case("Thunderstorm", "⛈️")]
    #[case("Snow", "❄️")]
    #[case("Mist", "🌫️")]
    #[case("Haze-ish", "🌤️")]
    fn test_advice_icons(#[case] condition: &str, #[case] expected_icon: &str) {
        let (icon, advice) = advice_for_condition(condition);
        assert_eq!(icon, expected_icon);
        assert!(!advice.is_empty());
    }

    #[test]
    fn test_advice_is_case_insensitive() {
        assert_eq!(advice_for_condition("CLEAR").0, "☀️");
        assert_eq!(advice_for_condition("light rain").0, "🌧️");
    }
}
