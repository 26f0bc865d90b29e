// ABOUTME: Pure admission rule deciding whether weather and traffic favor doing a task now
// ABOUTME: Rejects precipitation, missing weather categories and slow or missing routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use super::conditions::{TrafficSnapshot, WeatherSnapshot};
use crate::constants::recommendation::MAX_ROUTE_DURATION_SECS;

/// Weather categories that signal precipitation
const PRECIPITATION_CATEGORIES: [&str; 4] = ["Rain", "Drizzle", "Thunderstorm", "Snow"];

/// Weather + traffic admission rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionPolicy {
    /// Best route must take strictly less than this
    pub max_route_duration_secs: u64,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self::new(MAX_ROUTE_DURATION_SECS)
    }
}

impl AdmissionPolicy {
    /// Create a policy with the given route duration threshold
    #[must_use]
    pub const fn new(max_route_duration_secs: u64) -> Self {
        Self {
            max_route_duration_secs,
        }
    }

    /// Both weather and traffic must be favorable
    #[must_use]
    pub fn is_favorable(&self, weather: &WeatherSnapshot, traffic: &TrafficSnapshot) -> bool {
        Self::is_weather_favorable(weather) && self.is_traffic_favorable(traffic)
    }

    /// Favorable unless the category signals precipitation; a missing category fails closed
    #[must_use]
    pub fn is_weather_favorable(weather: &WeatherSnapshot) -> bool {
        weather.category.as_deref().is_some_and(|category| {
            let category = category.trim();
            !category.is_empty()
                && !PRECIPITATION_CATEGORIES
                    .iter()
                    .any(|wet| wet.eq_ignore_ascii_case(category))
        })
    }

    /// Favorable when the shortest route is under the threshold
    #[must_use]
    pub fn is_traffic_favorable(&self, traffic: &TrafficSnapshot) -> bool {
        traffic
            .best_route_secs()
            .is_some_and(|secs| secs < self.max_route_duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear() -> WeatherSnapshot {
        WeatherSnapshot::with_category("Clear")
    }

    fn routes(durations: &[u64]) -> TrafficSnapshot {
        TrafficSnapshot::from_durations(durations.to_vec())
    }

    #[test]
    fn test_clear_weather_and_short_route_is_favorable() {
        let policy = AdmissionPolicy::default();
        assert!(policy.is_favorable(&clear(), &routes(&[600])));
    }

    #[test]
    fn test_precipitation_is_unfavorable_regardless_of_traffic() {
        let policy = AdmissionPolicy::default();
        for category in ["Rain", "rain", "Drizzle", "Thunderstorm", "SNOW"] {
            let weather = WeatherSnapshot::with_category(category);
            assert!(!policy.is_favorable(&weather, &routes(&[60])), "{category}");
        }
    }

    #[test]
    fn test_non_precipitation_categories_are_favorable() {
        for category in ["Clear", "Clouds", "Mist", "Haze"] {
            assert!(AdmissionPolicy::is_weather_favorable(
                &WeatherSnapshot::with_category(category)
            ));
        }
    }

    #[test]
    fn test_missing_weather_category_fails_closed() {
        let weather = WeatherSnapshot {
            category: None,
            description: Some("unknown".into()),
        };
        assert!(!AdmissionPolicy::is_weather_favorable(&weather));
        assert!(!AdmissionPolicy::is_weather_favorable(
            &WeatherSnapshot::with_category("  ")
        ));
    }

    #[test]
    fn test_empty_route_list_is_unfavorable() {
        let policy = AdmissionPolicy::default();
        assert!(!policy.is_favorable(&clear(), &routes(&[])));
    }

    #[test]
    fn test_threshold_is_strict_and_uses_best_route() {
        let policy = AdmissionPolicy::new(1800);
        assert!(!policy.is_traffic_favorable(&routes(&[1800])));
        assert!(policy.is_traffic_favorable(&routes(&[1799])));
        assert!(policy.is_traffic_favorable(&routes(&[3600, 1200])));
    }
}
