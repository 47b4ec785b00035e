use super::Criterion;
use crate::models::{CropProfile, SoilSnapshot, WeatherSnapshot};

/// Fraction of the crop's requirement a nutrient must reach to count.
pub const SUFFICIENCY_RATIO: f64 = 0.8;

/// Points per sufficient nutrient.
pub const POINTS_PER_NUTRIENT: f64 = 0.5;

/// NPK sufficiency
///
/// Nitrogen, phosphorus and potassium are checked independently. Each one at
/// or above 80% of the crop's requirement earns half a point, so the
/// criterion contributes between 0 and 1.5 points in steps of 0.5.
pub struct NutrientCriterion;

impl NutrientCriterion {
    fn sufficient(level: f64, required: f64) -> bool {
        level >= required * SUFFICIENCY_RATIO
    }
}

impl Criterion for NutrientCriterion {
    fn id(&self) -> &'static str {
        "npk"
    }

    fn name(&self) -> &'static str {
        "Nutrient Sufficiency (N-P-K)"
    }

    fn weight(&self) -> f64 {
        3.0 * POINTS_PER_NUTRIENT
    }

    fn evaluate(&self, crop: &CropProfile, soil: &SoilSnapshot, _weather: &WeatherSnapshot) -> f64 {
        [
            (soil.nitrogen, crop.nitrogen_req),
            (soil.phosphorus, crop.phosphorus_req),
            (soil.potassium, crop.potassium_req),
        ]
        .iter()
        .filter(|(level, required)| Self::sufficient(*level, *required))
        .count() as f64
            * POINTS_PER_NUTRIENT
    }
}
