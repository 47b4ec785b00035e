use super::{CropProfile, Season};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Points earned by one scoring criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub id: String,
    pub name: String,
    pub earned: f64,
    pub weight: f64,
}

impl CriterionScore {
    pub fn is_met(&self) -> bool {
        self.earned >= self.weight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Percentage of the achievable score, 0-100
    pub confidence: f64,
    pub raw: f64,
    pub max: f64,
    pub breakdown: Vec<CriterionScore>,
}

impl ScoreResult {
    pub fn from_breakdown(breakdown: Vec<CriterionScore>) -> Self {
        let raw: f64 = breakdown.iter().map(|c| c.earned).sum();
        let max: f64 = breakdown.iter().map(|c| c.weight).sum();
        let confidence = if max > 0.0 { raw / max * 100.0 } else { 0.0 };
        Self {
            confidence,
            raw,
            max,
            breakdown,
        }
    }
}

/// A catalog crop paired with its score for one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCrop {
    pub crop: CropProfile,
    pub confidence: f64,
    pub raw: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<CriterionScore>,
}

impl ScoredCrop {
    pub fn new(crop: CropProfile, result: ScoreResult) -> Self {
        Self {
            crop,
            confidence: result.confidence,
            raw: result.raw,
            max: result.max,
            breakdown: result.breakdown,
        }
    }
}

/// Ranked output of a recommendation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub season: Season,
    pub min_confidence: f64,
    pub crops: Vec<ScoredCrop>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn best(&self) -> Option<&ScoredCrop> {
        self.crops.first()
    }
}

/// A crop a farmer has chosen to grow. The adoption date anchors its alert
/// schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptedCrop {
    pub id: Option<i64>,
    pub farmer_id: i64,
    pub crop_id: i64,
    pub adopted_on: NaiveDate,
    pub confidence: f64,
}

impl AdoptedCrop {
    pub fn new(farmer_id: i64, crop_id: i64, adopted_on: NaiveDate, confidence: f64) -> Self {
        Self {
            id: None,
            farmer_id,
            crop_id,
            adopted_on,
            confidence,
        }
    }
}
