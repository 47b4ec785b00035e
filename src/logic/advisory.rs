use crate::models::WeatherSnapshot;
use serde::Serialize;

/// Number of most recent readings the advisory looks at.
pub const ADVISORY_READINGS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    Irrigation,
    FrostProtection,
    FungalDisease,
    Drainage,
}

impl AdvisoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryKind::Irrigation => "Irrigation",
            AdvisoryKind::FrostProtection => "Frost Protection",
            AdvisoryKind::FungalDisease => "Fungal Disease",
            AdvisoryKind::Drainage => "Drainage",
        }
    }
}

impl std::fmt::Display for AdvisoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub kind: AdvisoryKind,
    pub message: String,
}

impl Advice {
    fn new(kind: AdvisoryKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

/// Aggregates over a farmer's recent weather readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub readings: usize,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub total_rainfall_mm: f64,
}

impl WeatherSummary {
    /// Summarise the most recent readings. `None` when there are none.
    pub fn from_recent(readings: &[WeatherSnapshot]) -> Option<Self> {
        let mut recent: Vec<&WeatherSnapshot> = readings.iter().collect();
        recent.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        recent.truncate(ADVISORY_READINGS);

        if recent.is_empty() {
            return None;
        }

        let n = recent.len() as f64;
        Some(Self {
            readings: recent.len(),
            avg_temperature: recent.iter().map(|r| r.temperature).sum::<f64>() / n,
            avg_humidity: recent.iter().map(|r| r.humidity).sum::<f64>() / n,
            total_rainfall_mm: recent.iter().map(|r| r.rainfall_mm).sum(),
        })
    }
}

/// Field advice from recent weather. Thresholds apply to averages and totals
/// of what was observed; nothing is projected forward.
pub fn conditions_advisory(readings: &[WeatherSnapshot]) -> Vec<Advice> {
    let Some(summary) = WeatherSummary::from_recent(readings) else {
        return Vec::new();
    };

    let mut advice = Vec::new();

    if summary.avg_temperature > 30.0 {
        advice.push(Advice::new(
            AdvisoryKind::Irrigation,
            "High temperature - increase irrigation",
        ));
    } else if summary.avg_temperature < 15.0 {
        advice.push(Advice::new(
            AdvisoryKind::FrostProtection,
            "Low temperature - protect crops from frost",
        ));
    }

    if summary.avg_humidity > 80.0 {
        advice.push(Advice::new(
            AdvisoryKind::FungalDisease,
            "High humidity - watch for fungal diseases",
        ));
    }

    if summary.total_rainfall_mm > 50.0 {
        advice.push(Advice::new(
            AdvisoryKind::Drainage,
            "Heavy rainfall - ensure proper drainage",
        ));
    } else if summary.total_rainfall_mm < 10.0 {
        advice.push(Advice::new(
            AdvisoryKind::Irrigation,
            "Low rainfall - increase irrigation",
        ));
    }

    advice
}
