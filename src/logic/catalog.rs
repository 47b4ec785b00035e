use crate::error::{AdvisorError, Result};
use crate::models::{CropProfile, Season};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Read-only set of crop profiles.
///
/// Never mutated after construction, so it can be shared across threads
/// behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    crops: Vec<CropProfile>,
}

#[derive(Deserialize)]
struct CatalogFile {
    crops: Vec<CropProfile>,
}

impl CropCatalog {
    /// Build a catalog, dropping repeated ids and repeated names within a
    /// season. The first occurrence wins and insertion order is kept.
    pub fn new(profiles: impl IntoIterator<Item = CropProfile>) -> Self {
        let mut seen_ids = HashSet::new();
        let mut seen_names = HashSet::new();
        let mut crops = Vec::new();

        for crop in profiles {
            let name_key = (crop.season, crop.name.trim().to_lowercase());
            if seen_ids.contains(&crop.id) || seen_names.contains(&name_key) {
                tracing::warn!(
                    id = crop.id,
                    crop = %crop.name,
                    season = %crop.season,
                    "Duplicate crop profile in catalog, ignoring"
                );
                continue;
            }
            seen_ids.insert(crop.id);
            seen_names.insert(name_key);
            crops.push(crop);
        }

        Self { crops }
    }

    /// Load a catalog from a YAML file with a top-level `crops:` list.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AdvisorError::Config(format!("Failed to read catalog {:?}: {}", path, e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        for crop in &file.crops {
            crop.validate()?;
        }
        Ok(Self::new(file.crops))
    }

    /// The eight reference profiles the application ships with.
    pub fn default_seed() -> Self {
        Self::new(vec![
            CropProfile::new(1, "Soybean", Season::Kharif, 120)
                .with_ph(6.0, 7.5)
                .with_temperature(20.0, 35.0)
                .with_moisture(60.0)
                .with_npk(25.0, 15.0, 20.0)
                .with_notes("Good for protein content, requires well-drained soil"),
            CropProfile::new(2, "Cotton", Season::Kharif, 180)
                .with_ph(5.5, 8.0)
                .with_temperature(21.0, 30.0)
                .with_moisture(70.0)
                .with_npk(30.0, 20.0, 25.0)
                .with_notes("Requires warm climate and adequate water"),
            CropProfile::new(3, "Sugarcane", Season::Kharif, 365)
                .with_ph(6.0, 7.5)
                .with_temperature(26.0, 32.0)
                .with_moisture(80.0)
                .with_npk(40.0, 25.0, 35.0)
                .with_notes("Long duration crop, requires high water and nutrients"),
            CropProfile::new(4, "Moong", Season::Kharif, 90)
                .with_ph(6.0, 7.5)
                .with_temperature(25.0, 35.0)
                .with_moisture(50.0)
                .with_npk(20.0, 10.0, 15.0)
                .with_notes("Short duration pulse crop, drought tolerant"),
            CropProfile::new(5, "Tur (Pigeon Pea)", Season::Kharif, 150)
                .with_ph(6.0, 7.5)
                .with_temperature(20.0, 30.0)
                .with_moisture(55.0)
                .with_npk(15.0, 12.0, 18.0)
                .with_notes("Drought resistant, good for intercropping"),
            CropProfile::new(6, "Rice", Season::Kharif, 120)
                .with_ph(5.0, 8.0)
                .with_temperature(20.0, 35.0)
                .with_moisture(90.0)
                .with_npk(35.0, 20.0, 30.0)
                .with_notes("Requires standing water, high yielding"),
            CropProfile::new(7, "Jowar (Sorghum)", Season::Kharif, 100)
                .with_ph(6.0, 8.5)
                .with_temperature(25.0, 35.0)
                .with_moisture(45.0)
                .with_npk(25.0, 15.0, 20.0)
                .with_notes("Drought tolerant, good for dry areas"),
            CropProfile::new(8, "Wheat", Season::Rabi, 120)
                .with_ph(6.0, 7.5)
                .with_temperature(15.0, 25.0)
                .with_moisture(50.0)
                .with_npk(30.0, 20.0, 25.0)
                .with_notes("Winter crop, requires cool climate"),
        ])
    }

    pub fn crops_for_season(&self, season: Season) -> Vec<CropProfile> {
        self.crops
            .iter()
            .filter(|c| c.season == season)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: i64) -> Option<&CropProfile> {
        self.crops.iter().find(|c| c.id == id)
    }

    pub fn all(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn default_seed_has_eight_profiles() {
        let catalog = CropCatalog::default_seed();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.crops_for_season(Season::Kharif).len(), 7);
        assert_eq!(catalog.crops_for_season(Season::Rabi).len(), 1);
        assert!(catalog.crops_for_season(Season::Summer).is_empty());
    }

    #[test]
    fn crops_for_season_preserves_order() {
        let catalog = CropCatalog::default_seed();
        let names: Vec<String> = catalog
            .crops_for_season(Season::Kharif)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names.first().map(String::as_str), Some("Soybean"));
        assert_eq!(names.last().map(String::as_str), Some("Jowar (Sorghum)"));
    }

    #[test]
    fn duplicates_are_dropped() {
        let catalog = CropCatalog::new(vec![
            CropProfile::new(1, "Wheat", Season::Rabi, 120),
            CropProfile::new(2, "wheat ", Season::Rabi, 110),
            CropProfile::new(1, "Barley", Season::Rabi, 100),
            CropProfile::new(3, "Wheat", Season::Summer, 90),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.crops_for_season(Season::Rabi).len(), 1);
        assert_eq!(catalog.get(1).map(|c| c.duration_days), Some(120));
        assert_eq!(catalog.get(3).map(|c| c.season), Some(Season::Summer));
    }

    #[test]
    fn get_unknown_crop() {
        assert!(CropCatalog::default_seed().get(99).is_none());
    }

    #[test]
    fn from_yaml_str() {
        let yaml = r#"
crops:
  - id: 20
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
    notes: Oilseed
"#;
        let catalog = CropCatalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.crops_for_season(Season::Summer).len(), 1);
        assert_eq!(
            catalog.get(20).and_then(|c| c.notes.as_deref()),
            Some("Oilseed")
        );
    }

    #[test]
    fn from_yaml_str_invalid() {
        assert!(matches!(
            CropCatalog::from_yaml_str("crops: 12"),
            Err(AdvisorError::Yaml(_))
        ));
    }

    #[test]
    fn from_yaml_str_rejects_inverted_ranges() {
        let yaml = r#"
crops:
  - id: 21
    name: Mustard
    season: Rabi
    duration_days: 110
    ph_min: 7.5
    ph_max: 6.0
    temp_min: 10.0
    temp_max: 25.0
    moisture_req: 40.0
    nitrogen_req: 20.0
    phosphorus_req: 10.0
    potassium_req: 10.0
"#;
        assert!(matches!(
            CropCatalog::from_yaml_str(yaml),
            Err(AdvisorError::InvalidData(_))
        ));
    }

    #[test]
    fn seed_profiles_are_valid() {
        for crop in CropCatalog::default_seed().all() {
            assert!(crop.validate().is_ok(), "{} is invalid", crop.name);
        }
    }

    #[test]
    fn catalog_is_shareable_across_threads() {
        let catalog = Arc::new(CropCatalog::default_seed());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || catalog.crops_for_season(Season::Kharif).len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 7);
        }
    }
}
