pub mod engine;
pub mod moisture;
pub mod nutrients;
pub mod ph;
pub mod temperature;

pub use engine::CompatibilityScorer;

use crate::models::{CropProfile, SoilSnapshot, WeatherSnapshot};

/// One weighted check of a crop's requirements against current conditions.
pub trait Criterion: Send + Sync {
    /// Unique identifier for this criterion
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Maximum points this criterion can contribute
    fn weight(&self) -> f64;

    /// Points earned, between 0 and `weight()`
    fn evaluate(&self, crop: &CropProfile, soil: &SoilSnapshot, weather: &WeatherSnapshot)
        -> f64;
}
