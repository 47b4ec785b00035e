use super::{
    moisture::MoistureCriterion, nutrients::NutrientCriterion, ph::PhCriterion,
    temperature::TemperatureCriterion, Criterion,
};
use crate::models::{
    CriterionScore, CropProfile, ScoreResult, ScoredCrop, SoilSnapshot, WeatherSnapshot,
};

pub struct CompatibilityScorer {
    criteria: Vec<Box<dyn Criterion>>,
}

impl CompatibilityScorer {
    pub fn new() -> Self {
        let criteria: Vec<Box<dyn Criterion>> = vec![
            Box::new(PhCriterion),
            Box::new(TemperatureCriterion),
            Box::new(MoistureCriterion),
            Box::new(NutrientCriterion),
        ];

        Self { criteria }
    }

    /// Sum of all criterion weights.
    pub fn max_score(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight()).sum()
    }

    pub fn score(
        &self,
        crop: &CropProfile,
        soil: &SoilSnapshot,
        weather: &WeatherSnapshot,
    ) -> ScoreResult {
        let breakdown = self
            .criteria
            .iter()
            .map(|criterion| CriterionScore {
                id: criterion.id().to_string(),
                name: criterion.name().to_string(),
                earned: criterion.evaluate(crop, soil, weather),
                weight: criterion.weight(),
            })
            .collect();

        let result = ScoreResult::from_breakdown(breakdown);
        tracing::debug!(
            crop = %crop.name,
            raw = result.raw,
            max = result.max,
            confidence = result.confidence,
            "Scored crop"
        );
        result
    }

    /// Score every crop, keeping the input order.
    pub fn score_all(
        &self,
        crops: &[CropProfile],
        soil: &SoilSnapshot,
        weather: &WeatherSnapshot,
    ) -> Vec<ScoredCrop> {
        crops
            .iter()
            .map(|crop| ScoredCrop::new(crop.clone(), self.score(crop, soil, weather)))
            .collect()
    }

    pub fn list_criteria(&self) -> Vec<(&'static str, &'static str)> {
        self.criteria.iter().map(|c| (c.id(), c.name())).collect()
    }
}

impl Default for CompatibilityScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Confidence of one crop against one soil and weather snapshot.
pub fn score(crop: &CropProfile, soil: &SoilSnapshot, weather: &WeatherSnapshot) -> ScoreResult {
    CompatibilityScorer::new().score(crop, soil, weather)
}
