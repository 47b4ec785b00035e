use crate::error::{AdvisorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilType {
    Black,
    Red,
    Alluvial,
    Laterite,
    Sandy,
    Clay,
    Loamy,
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Black => "Black",
            SoilType::Red => "Red",
            SoilType::Alluvial => "Alluvial",
            SoilType::Laterite => "Laterite",
            SoilType::Sandy => "Sandy",
            SoilType::Clay => "Clay",
            SoilType::Loamy => "Loamy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "black" | "regur" | "black cotton" => Some(SoilType::Black),
            "red" => Some(SoilType::Red),
            "alluvial" => Some(SoilType::Alluvial),
            "laterite" => Some(SoilType::Laterite),
            "sandy" | "desert" => Some(SoilType::Sandy),
            "clay" => Some(SoilType::Clay),
            "loamy" | "loam" => Some(SoilType::Loamy),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A soil test result recorded by a farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSnapshot {
    pub id: Option<i64>,
    pub farmer_id: i64,
    pub ph: f64,
    /// Percent
    pub moisture: f64,
    /// ppm
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    /// Soil temperature, °C
    pub temperature: f64,
    pub soil_type: SoilType,
    pub recorded_at: DateTime<Utc>,
}

impl SoilSnapshot {
    pub fn new(farmer_id: i64, soil_type: SoilType, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            farmer_id,
            ph: 7.0,
            moisture: 0.0,
            nitrogen: 0.0,
            phosphorus: 0.0,
            potassium: 0.0,
            temperature: 0.0,
            soil_type,
            recorded_at,
        }
    }

    pub fn with_ph(mut self, ph: f64) -> Self {
        self.ph = ph;
        self
    }

    pub fn with_moisture(mut self, moisture: f64) -> Self {
        self.moisture = moisture;
        self
    }

    pub fn with_npk(mut self, nitrogen: f64, phosphorus: f64, potassium: f64) -> Self {
        self.nitrogen = nitrogen;
        self.phosphorus = phosphorus;
        self.potassium = potassium;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Ingestion bounds check. Scoring never calls this.
    pub fn validate(&self) -> Result<()> {
        check_range("pH", self.ph, 0.0, 14.0)?;
        check_range("Moisture", self.moisture, 0.0, 100.0)?;
        check_range("Nitrogen", self.nitrogen, 0.0, 1000.0)?;
        check_range("Phosphorus", self.phosphorus, 0.0, 1000.0)?;
        check_range("Potassium", self.potassium, 0.0, 1000.0)?;
        check_range("Soil temperature", self.temperature, -10.0, 50.0)?;
        Ok(())
    }

    /// Most recent reading by timestamp.
    pub fn latest(readings: &[SoilSnapshot]) -> Option<&SoilSnapshot> {
        readings.iter().max_by_key(|r| r.recorded_at)
    }
}

/// A weather observation recorded for a farmer's location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub id: Option<i64>,
    pub farmer_id: i64,
    /// Air temperature, °C
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    pub rainfall_mm: f64,
    pub recorded_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn new(
        farmer_id: i64,
        temperature: f64,
        humidity: f64,
        rainfall_mm: f64,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            farmer_id,
            temperature,
            humidity,
            rainfall_mm,
            recorded_at,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_range("Temperature", self.temperature, -50.0, 50.0)?;
        check_range("Humidity", self.humidity, 0.0, 100.0)?;
        if self.rainfall_mm.is_nan() || self.rainfall_mm < 0.0 {
            return Err(AdvisorError::InvalidRange(format!(
                "Rainfall cannot be negative (got {})",
                self.rainfall_mm
            )));
        }
        Ok(())
    }

    pub fn latest(readings: &[WeatherSnapshot]) -> Option<&WeatherSnapshot> {
        readings.iter().max_by_key(|r| r.recorded_at)
    }
}

// NaN fails the contains check and is rejected along with everything else
fn check_range(label: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AdvisorError::InvalidRange(format!(
            "{} must be between {} and {} (got {})",
            label, min, max, value
        )))
    }
}
