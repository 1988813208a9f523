//! Static climate baselines for the supported Indian metro cities
//!
//! The forecast heuristic anchors every prediction to a per-city baseline:
//! typical max/min temperatures, the conditions that commonly occur there,
//! and the amplitude of the annual temperature cycle.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Positional sampling weights for a profile's `common_conditions` list.
/// Weighted toward the first-listed (most typical) condition.
pub const CONDITION_WEIGHTS: [f64; 5] = [0.40, 0.25, 0.15, 0.12, 0.08];

/// Static climate baseline parameters for one city
#[derive(Debug, Clone, Serialize)]
pub struct CityClimateProfile {
    /// Typical daily maximum temperature in Celsius
    pub baseline_max_temp: f64,
    /// Typical daily minimum temperature in Celsius
    pub baseline_min_temp: f64,
    /// Climatological probability of rain on a given day
    pub rain_probability: f64,
    /// Conditions commonly observed in this city, most typical first.
    /// Paired positionally with [`CONDITION_WEIGHTS`]; the fixed-size array
    /// keeps the pairing honest at compile time.
    pub common_conditions: [&'static str; 5],
    /// Amplitude of the annual temperature cycle in Celsius
    pub seasonal_amplitude: f64,
}

/// A supported city with its OpenWeatherMap query alias
#[derive(Debug, Clone, Serialize)]
pub struct CityInfo {
    pub name: &'static str,
    pub api_name: &'static str,
}

static PROFILES: LazyLock<HashMap<&'static str, CityClimateProfile>> = LazyLock::new(|| {
    HashMap::from([
        (
            "delhi",
            CityClimateProfile {
                baseline_max_temp: 28.0,
                baseline_min_temp: 18.0,
                rain_probability: 0.25,
                common_conditions: ["clear", "haze", "rain", "thunderstorm", "fog"],
                seasonal_amplitude: 12.0,
            },
        ),
        (
            "mumbai",
            CityClimateProfile {
                baseline_max_temp: 30.0,
                baseline_min_temp: 24.0,
                rain_probability: 0.35,
                common_conditions: ["clear", "rain", "thunderstorm", "haze", "clouds"],
                seasonal_amplitude: 6.0,
            },
        ),
        (
            "bangalore",
            CityClimateProfile {
                baseline_max_temp: 26.0,
                baseline_min_temp: 19.0,
                rain_probability: 0.30,
                common_conditions: ["clear", "clouds", "rain", "thunderstorm", "mist"],
                seasonal_amplitude: 8.0,
            },
        ),
        (
            "kolkata",
            CityClimateProfile {
                baseline_max_temp: 29.0,
                baseline_min_temp: 21.0,
                rain_probability: 0.40,
                common_conditions: ["clear", "haze", "rain", "thunderstorm", "clouds"],
                seasonal_amplitude: 10.0,
            },
        ),
        (
            "chennai",
            CityClimateProfile {
                baseline_max_temp: 32.0,
                baseline_min_temp: 26.0,
                rain_probability: 0.20,
                common_conditions: ["clear", "clouds", "rain", "haze", "thunderstorm"],
                seasonal_amplitude: 4.0,
            },
        ),
    ])
});

/// Look up the climate profile for a city (case-insensitive).
///
/// Unknown cities fall back to the Delhi profile. This is a documented
/// policy, not an error: predictions must always succeed.
#[must_use]
pub fn profile_for(city: &str) -> &'static CityClimateProfile {
    let key = city.to_lowercase();
    PROFILES
        .get(key.as_str())
        .unwrap_or_else(|| &PROFILES["delhi"])
}

/// Map a display city name to the name OpenWeatherMap expects
#[must_use]
pub fn api_alias(city: &str) -> &str {
    match city {
        "Delhi" => "New Delhi",
        "Bangalore" => "Bengaluru",
        other => other,
    }
}

/// The fixed list of supported cities with their API aliases
#[must_use]
pub fn supported_cities() -> Vec<CityInfo> {
    vec![
        CityInfo {
            name: "Delhi",
            api_name: "New Delhi",
        },
        CityInfo {
            name: "Mumbai",
            api_name: "Mumbai",
        },
        CityInfo {
            name: "Bangalore",
            api_name: "Bengaluru",
        },
        CityInfo {
            name: "Kolkata",
            api_name: "Kolkata",
        },
        CityInfo {
            name: "Chennai",
            api_name: "Chennai",
        },
    ]
}
