use super::Criterion;
use crate::models::{CropProfile, SoilSnapshot, WeatherSnapshot};

/// Air temperature from the latest weather reading must fall inside the
/// crop's range. Soil temperature is not considered.
pub struct TemperatureCriterion;

impl Criterion for TemperatureCriterion {
    fn id(&self) -> &'static str {
        "temperature"
    }

    fn name(&self) -> &'static str {
        "Air Temperature"
    }

    fn weight(&self) -> f64 {
        1.0
    }

    fn evaluate(&self, crop: &CropProfile, _soil: &SoilSnapshot, weather: &WeatherSnapshot) -> f64 {
        let temp = weather.temperature;
        if crop.temp_min <= temp && temp <= crop.temp_max {
            self.weight()
        } else {
            0.0
        }
    }
}
