//! CSV export of generated predictions

use crate::models::DailyPrediction;

/// Fixed column order for exported predictions
pub const CSV_HEADER: &str = "Date,City,Day,Weather_Condition,Max_Temperature_C,Min_Temperature_C,Average_Temperature_C,Precipitation_mm";

/// Render a generated forecast as a CSV document, one row per day
#[must_use]
pub fn predictions_to_csv(city: &str, daily: &[DailyPrediction]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for prediction in daily {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            prediction.date.format("%Y-%m-%d"),
            city,
            prediction.day,
            prediction.condition,
            prediction.max_temp,
            prediction.min_temp,
            prediction.avg_temp,
            prediction.precipitation,
        ));
    }
    out
}

/// Download filename for an exported forecast
#[must_use]
pub fn export_filename(city: &str, days: u32) -> String {
    format!("weather_prediction_{}_{}_days.csv", city.to_lowercase(), days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherPattern;
    use crate::predictor::ForecastGenerator;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_csv_shape_and_columns() {
        let generator = ForecastGenerator::for_city("Mumbai");
        let pattern = WeatherPattern::fallback();
        let mut rng = StdRng::seed_from_u64(11);
        let start = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let daily = generator.generate(&pattern, 5, start, &mut rng).unwrap();

        let csv = predictions_to_csv("Mumbai", &daily);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 6); // header + one row per day

        for (i, line) in lines[1..].iter().enumerate() {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 8);
            assert_eq!(fields[1], "Mumbai");
            assert_eq!(fields[2], (i + 1).to_string());

            // Average column is the mean of the max/min columns
            let max: f64 = fields[4].parse().unwrap();
            let min: f64 = fields[5].parse().unwrap();
            let avg: f64 = fields[6].parse().unwrap();
            assert!((avg - (max + min) / 2.0).abs() < 1e-9);

            let precipitation: f64 = fields[7].parse().unwrap();
            assert!(precipitation >= 0.0);
        }
    }

    #[test]
    fn test_dates_advance_from_tomorrow() {
        let generator = ForecastGenerator::for_city("Delhi");
        let pattern = WeatherPattern::fallback();
        let mut rng = StdRng::seed_from_u64(2);
        let start = NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();
        let daily = generator.generate(&pattern, 3, start, &mut rng).unwrap();

        let csv = predictions_to_csv("Delhi", &daily);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].starts_with("2026-12-31,"));
        assert!(lines[2].starts_with("2027-01-01,"));
        assert!(lines[3].starts_with("2027-01-02,"));
    }

    #[test]
    fn test_export_filename_format() {
        assert_eq!(
            export_filename("Bangalore", 7),
            "weather_prediction_bangalore_7_days.csv"
        );
    }
}
