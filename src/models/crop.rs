use super::Season;
use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};

/// Agronomic requirements for one crop.
///
/// Reference data: profiles are created when the catalog is seeded and are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub id: i64,
    pub name: String,
    pub season: Season,
    pub duration_days: u32,
    pub ph_min: f64,
    pub ph_max: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Target soil moisture, percent
    pub moisture_req: f64,
    /// Target nutrient levels, ppm
    pub nitrogen_req: f64,
    pub phosphorus_req: f64,
    pub potassium_req: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CropProfile {
    pub fn new(id: i64, name: impl Into<String>, season: Season, duration_days: u32) -> Self {
        Self {
            id,
            name: name.into(),
            season,
            duration_days,
            ph_min: 0.0,
            ph_max: 14.0,
            temp_min: -50.0,
            temp_max: 50.0,
            moisture_req: 0.0,
            nitrogen_req: 0.0,
            phosphorus_req: 0.0,
            potassium_req: 0.0,
            notes: None,
        }
    }

    pub fn with_ph(mut self, min: f64, max: f64) -> Self {
        self.ph_min = min;
        self.ph_max = max;
        self
    }

    pub fn with_temperature(mut self, min: f64, max: f64) -> Self {
        self.temp_min = min;
        self.temp_max = max;
        self
    }

    pub fn with_moisture(mut self, moisture: f64) -> Self {
        self.moisture_req = moisture;
        self
    }

    pub fn with_npk(mut self, nitrogen: f64, phosphorus: f64, potassium: f64) -> Self {
        self.nitrogen_req = nitrogen;
        self.phosphorus_req = phosphorus;
        self.potassium_req = potassium;
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Reject profiles that no reading could ever satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AdvisorError::InvalidData(format!(
                "Crop {} has an empty name",
                self.id
            )));
        }
        if self.duration_days == 0 {
            return Err(AdvisorError::InvalidData(format!(
                "{}: duration_days must be positive",
                self.name
            )));
        }
        if is_inverted(self.ph_min, self.ph_max) {
            return Err(AdvisorError::InvalidData(format!(
                "{}: pH range {}-{} is inverted",
                self.name, self.ph_min, self.ph_max
            )));
        }
        if is_inverted(self.temp_min, self.temp_max) {
            return Err(AdvisorError::InvalidData(format!(
                "{}: temperature range {}-{} is inverted",
                self.name, self.temp_min, self.temp_max
            )));
        }
        Ok(())
    }
}

// NaN bounds count as inverted
fn is_inverted(min: f64, max: f64) -> bool {
    min.is_nan() || max.is_nan() || min > max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_builder_pattern() {
        let crop = CropProfile::new(1, "Soybean", Season::Kharif, 120)
            .with_ph(6.0, 7.5)
            .with_temperature(20.0, 35.0)
            .with_moisture(60.0)
            .with_npk(25.0, 15.0, 20.0)
            .with_notes("Good for protein content");

        assert_eq!(crop.name, "Soybean");
        assert_eq!(crop.season, Season::Kharif);
        assert_eq!(crop.duration_days, 120);
        assert_eq!((crop.ph_min, crop.ph_max), (6.0, 7.5));
        assert_eq!((crop.temp_min, crop.temp_max), (20.0, 35.0));
        assert_eq!(crop.moisture_req, 60.0);
        assert_eq!(
            (crop.nitrogen_req, crop.phosphorus_req, crop.potassium_req),
            (25.0, 15.0, 20.0)
        );
        assert_eq!(crop.notes.as_deref(), Some("Good for protein content"));
    }

    #[test]
    fn validate_rejects_unusable_profiles() {
        let good = CropProfile::new(1, "Soybean", Season::Kharif, 120)
            .with_ph(6.0, 7.5)
            .with_temperature(20.0, 35.0);
        assert!(good.validate().is_ok());

        let bad = [
            good.clone().with_ph(7.5, 6.0),
            good.clone().with_temperature(35.0, 20.0),
            good.clone().with_ph(f64::NAN, 7.5),
            CropProfile::new(1, "Soybean", Season::Kharif, 0),
            CropProfile::new(1, "  ", Season::Kharif, 120),
        ];
        for crop in bad {
            assert!(
                matches!(crop.validate(), Err(AdvisorError::InvalidData(_))),
                "{:?} should be rejected",
                crop
            );
        }
    }

    #[test]
    fn crop_deserializes_without_notes() {
        let yaml = r#"
id: 9
name: Groundnut
season: Summer
duration_days: 110
ph_min: 6.0
ph_max: 7.0
temp_min: 24.0
temp_max: 33.0
moisture_req: 50.0
nitrogen_req: 20.0
phosphorus_req: 40.0
potassium_req: 40.0
"#;
        let crop: CropProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(crop.season, Season::Summer);
        assert!(crop.notes.is_none());
    }
}
