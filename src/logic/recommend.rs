use super::catalog::CropCatalog;
use super::criteria::CompatibilityScorer;
use super::ranking::rank;
use crate::error::{AdvisorError, Result};
use crate::models::{
    AdoptedCrop, CropProfile, Recommendations, Season, SoilSnapshot, WeatherSnapshot,
};
use chrono::NaiveDate;

/// Rank the current season's crops against a farmer's latest readings.
///
/// Both snapshots are required. A season with no catalog crops yields an
/// empty list rather than an error.
pub fn recommend(
    catalog: &CropCatalog,
    soil: Option<&SoilSnapshot>,
    weather: Option<&WeatherSnapshot>,
    today: NaiveDate,
    min_confidence: f64,
) -> Result<Recommendations> {
    let (soil, weather) = match (soil, weather) {
        (Some(s), Some(w)) => (s, w),
        (None, Some(_)) => {
            return Err(AdvisorError::MissingInputData(
                "no soil data recorded; add a soil test first".into(),
            ))
        }
        (Some(_), None) => {
            return Err(AdvisorError::MissingInputData(
                "no weather data recorded; add a weather reading first".into(),
            ))
        }
        (None, None) => {
            return Err(AdvisorError::MissingInputData(
                "no soil or weather data recorded".into(),
            ))
        }
    };

    let season = Season::for_date(today);
    let candidates = catalog.crops_for_season(season);
    if candidates.is_empty() {
        tracing::info!(%season, "No catalog crops for current season");
    }

    let scored = CompatibilityScorer::new().score_all(&candidates, soil, weather);
    let crops = rank(scored, min_confidence);

    tracing::info!(
        %season,
        candidates = candidates.len(),
        recommended = crops.len(),
        "Computed crop recommendations"
    );

    Ok(Recommendations {
        season,
        min_confidence,
        crops,
    })
}

/// Record that a farmer is growing a crop. Each crop can be adopted once per
/// farmer.
pub fn adopt(
    existing: &[AdoptedCrop],
    farmer_id: i64,
    crop: &CropProfile,
    confidence: f64,
    on: NaiveDate,
) -> Result<AdoptedCrop> {
    if existing
        .iter()
        .any(|a| a.farmer_id == farmer_id && a.crop_id == crop.id)
    {
        return Err(AdvisorError::AlreadyAdopted {
            farmer_id,
            crop_id: crop.id,
        });
    }

    Ok(AdoptedCrop::new(farmer_id, crop.id, on, confidence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SoilType;
    use chrono::{TimeZone, Utc};

    fn soil() -> SoilSnapshot {
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        SoilSnapshot::new(1, SoilType::Black, at)
            .with_ph(6.5)
            .with_moisture(55.0)
            .with_npk(25.0, 15.0, 20.0)
            .with_temperature(27.0)
    }

    fn weather(temperature: f64) -> WeatherSnapshot {
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        WeatherSnapshot::new(1, temperature, 65.0, 0.0, at)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn missing_snapshots_are_reported() {
        let catalog = CropCatalog::default_seed();
        let today = date(2024, 7, 1);
        for (s, w) in [
            (None, Some(weather(28.0))),
            (Some(soil()), None),
            (None, None),
        ] {
            let result = recommend(&catalog, s.as_ref(), w.as_ref(), today, 60.0);
            assert!(matches!(result, Err(AdvisorError::MissingInputData(_))));
        }
    }

    #[test]
    fn kharif_recommendations() {
        let catalog = CropCatalog::default_seed();
        let recs = recommend(
            &catalog,
            Some(&soil()),
            Some(&weather(28.0)),
            date(2024, 7, 1),
            60.0,
        )
        .unwrap();

        assert_eq!(recs.season, Season::Kharif);
        assert!(!recs.is_empty());
        assert!(recs.crops.iter().all(|c| c.crop.season == Season::Kharif));
        assert!(recs.crops.iter().all(|c| c.confidence >= 60.0));

        let best = recs.best().unwrap();
        assert_eq!(best.crop.name, "Soybean");
        assert!((best.confidence - 100.0).abs() < 1e-9);
    }

    #[test]
    fn ties_follow_catalog_order() {
        // Soybean, Moong, Tur and Jowar all score 100 at these readings
        let catalog = CropCatalog::default_seed();
        let recs = recommend(
            &catalog,
            Some(&soil()),
            Some(&weather(28.0)),
            date(2024, 7, 1),
            0.0,
        )
        .unwrap();
        let top: Vec<i64> = recs.crops.iter().take(4).map(|c| c.crop.id).collect();
        assert_eq!(top, vec![1, 4, 5, 7]);
        for pair in recs.crops.windows(2) {
            if pair[0].confidence == pair[1].confidence {
                assert!(pair[0].crop.id < pair[1].crop.id);
            }
        }
    }

    #[test]
    fn rabi_only_offers_wheat() {
        let catalog = CropCatalog::default_seed();
        let recs = recommend(
            &catalog,
            Some(&soil()),
            Some(&weather(20.0)),
            date(2024, 12, 5),
            0.0,
        )
        .unwrap();
        assert_eq!(recs.season, Season::Rabi);
        let names: Vec<&str> = recs.crops.iter().map(|c| c.crop.name.as_str()).collect();
        assert_eq!(names, vec!["Wheat"]);
    }

    #[test]
    fn empty_season_is_not_an_error() {
        let catalog = CropCatalog::default_seed();
        let recs = recommend(
            &catalog,
            Some(&soil()),
            Some(&weather(30.0)),
            date(2024, 4, 1),
            60.0,
        )
        .unwrap();
        assert_eq!(recs.season, Season::Summer);
        assert!(recs.is_empty());
    }

    #[test]
    fn adopt_once_per_farmer() {
        let catalog = CropCatalog::default_seed();
        let soybean = catalog.get(1).unwrap();
        let on = date(2024, 7, 1);

        let first = adopt(&[], 1, soybean, 100.0, on).unwrap();
        assert_eq!(first.crop_id, 1);
        assert_eq!(first.adopted_on, on);

        let again = adopt(std::slice::from_ref(&first), 1, soybean, 90.0, on);
        assert!(matches!(
            again,
            Err(AdvisorError::AlreadyAdopted {
                farmer_id: 1,
                crop_id: 1
            })
        ));

        // A different farmer may adopt the same crop
        assert!(adopt(&[first], 2, soybean, 90.0, on).is_ok());
    }
}
