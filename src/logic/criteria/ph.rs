use super::Criterion;
use crate::models::{CropProfile, SoilSnapshot, WeatherSnapshot};

/// Soil pH must fall inside the crop's acceptable range (inclusive).
pub struct PhCriterion;

impl Criterion for PhCriterion {
    fn id(&self) -> &'static str {
        "ph"
    }

    fn name(&self) -> &'static str {
        "Soil pH"
    }

    fn weight(&self) -> f64 {
        1.0
    }

    fn evaluate(&self, crop: &CropProfile, soil: &SoilSnapshot, _weather: &WeatherSnapshot) -> f64 {
        if crop.ph_min <= soil.ph && soil.ph <= crop.ph_max {
            self.weight()
        } else {
            0.0
        }
    }
}
