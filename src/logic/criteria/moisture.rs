use super::Criterion;
use crate::models::{CropProfile, SoilSnapshot, WeatherSnapshot};

/// Allowed distance from the crop's target moisture, in percentage points.
pub const MOISTURE_TOLERANCE: f64 = 20.0;

/// Soil moisture within ±20 percentage points of the crop's target.
pub struct MoistureCriterion;

impl Criterion for MoistureCriterion {
    fn id(&self) -> &'static str {
        "moisture"
    }

    fn name(&self) -> &'static str {
        "Soil Moisture"
    }

    fn weight(&self) -> f64 {
        1.0
    }

    fn evaluate(&self, crop: &CropProfile, soil: &SoilSnapshot, _weather: &WeatherSnapshot) -> f64 {
        if (soil.moisture - crop.moisture_req).abs() <= MOISTURE_TOLERANCE {
            self.weight()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::criteria::fixtures::{matching_soil, soybean, weather};

    #[test]
    fn moisture_tolerance_both_sides() {
        let crop = soybean(); // target 60%
        let w = weather(28.0);
        for (moisture, expected) in [
            (60.0, 1.0),
            (40.0, 1.0),
            (80.0, 1.0),
            (39.5, 0.0),
            (80.5, 0.0),
            (5.0, 0.0),
        ] {
            let soil = matching_soil().with_moisture(moisture);
            assert_eq!(
                MoistureCriterion.evaluate(&crop, &soil, &w),
                expected,
                "moisture {}",
                moisture
            );
        }
    }
}
