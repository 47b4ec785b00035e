use super::catalog::CropCatalog;
use super::dedup::filter_new;
use super::schedule::AlertScheduleGenerator;
use crate::models::{AdoptedCrop, AlertEvent, StoredAlert};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Default look-ahead for the upcoming alerts view.
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// New alerts to persist after regenerating a farmer's schedules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertPlan {
    pub events: Vec<AlertEvent>,
}

impl AlertPlan {
    pub fn created(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Generate and deduplicate alerts for every crop a farmer has adopted.
///
/// Each crop's schedule is anchored at its adoption date. Crops missing from
/// the catalog and adoptions belonging to another farmer are skipped.
pub fn plan_alerts(
    farmer_id: i64,
    adopted: &[AdoptedCrop],
    catalog: &CropCatalog,
    existing: &[AlertEvent],
    now: NaiveDate,
) -> AlertPlan {
    let generator = AlertScheduleGenerator::new();
    let mut candidates = Vec::new();

    for adoption in adopted {
        if adoption.farmer_id != farmer_id {
            tracing::warn!(
                farmer_id,
                other = adoption.farmer_id,
                crop_id = adoption.crop_id,
                "Skipping adoption that belongs to another farmer"
            );
            continue;
        }
        let Some(crop) = catalog.get(adoption.crop_id) else {
            tracing::warn!(
                farmer_id,
                crop_id = adoption.crop_id,
                "Adopted crop not in catalog, no alerts generated"
            );
            continue;
        };
        candidates.extend(generator.generate(farmer_id, crop, adoption.adopted_on, now));
    }

    let events = filter_new(candidates, existing);
    tracing::info!(farmer_id, created = events.len(), "Planned new alerts");
    AlertPlan { events }
}

/// Pending alerts due between `today` and `today + window_days`, inclusive,
/// soonest first.
pub fn upcoming(alerts: &[StoredAlert], today: NaiveDate, window_days: u32) -> Vec<StoredAlert> {
    let horizon = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut due: Vec<StoredAlert> = alerts
        .iter()
        .filter(|a| a.is_pending() && a.event.date >= today && a.event.date <= horizon)
        .cloned()
        .collect();
    due.sort_by_key(|a| a.event.date);
    due
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertStatus, AlertType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stored(id: i64, on: NaiveDate, status: AlertStatus) -> StoredAlert {
        StoredAlert {
            id,
            event: AlertEvent::new(1, 1, AlertType::Irrigation, on, "Irrigate field for Soybean"),
            status,
        }
    }

    #[test]
    fn plan_covers_all_adopted_crops() {
        let catalog = CropCatalog::default_seed();
        let adopted = vec![
            AdoptedCrop::new(1, 1, date(2024, 7, 1), 100.0),
            AdoptedCrop::new(1, 4, date(2024, 7, 1), 100.0),
        ];
        let plan = plan_alerts(1, &adopted, &catalog, &[], date(2024, 7, 1));
        assert!(plan.events.iter().any(|e| e.crop_id == 1));
        assert!(plan.events.iter().any(|e| e.crop_id == 4));
        // Soybean 120 days: 17 + 4 + 4 + 1, Moong 90 days: 12 + 4 + 4 + 1
        assert_eq!(plan.created(), 26 + 21);
    }

    #[test]
    fn replanning_creates_nothing_new() {
        let catalog = CropCatalog::default_seed();
        let adopted = vec![AdoptedCrop::new(1, 2, date(2024, 7, 1), 88.9)];
        let now = date(2024, 7, 20);

        let first = plan_alerts(1, &adopted, &catalog, &[], now);
        assert!(!first.is_empty());

        let second = plan_alerts(1, &adopted, &catalog, &first.events, now);
        assert!(second.is_empty());
        assert_eq!(second.created(), 0);
    }

    #[test]
    fn unknown_crop_and_foreign_adoption_are_skipped() {
        let catalog = CropCatalog::default_seed();
        let adopted = vec![
            AdoptedCrop::new(1, 99, date(2024, 7, 1), 70.0),
            AdoptedCrop::new(2, 1, date(2024, 7, 1), 70.0),
        ];
        assert!(plan_alerts(1, &adopted, &catalog, &[], date(2024, 7, 1)).is_empty());
    }

    #[test]
    fn upcoming_window_is_inclusive_and_pending_only() {
        let today = date(2024, 3, 1);
        let alerts = vec![
            stored(1, date(2024, 3, 8), AlertStatus::Pending),
            stored(2, date(2024, 2, 29), AlertStatus::Pending),
            stored(3, date(2024, 3, 1), AlertStatus::Pending),
            stored(4, date(2024, 3, 9), AlertStatus::Pending),
            stored(5, date(2024, 3, 3), AlertStatus::Completed),
            stored(6, date(2024, 3, 4), AlertStatus::Dismissed),
            stored(7, date(2024, 3, 5), AlertStatus::Pending),
        ];
        let ids: Vec<i64> = upcoming(&alerts, today, DEFAULT_UPCOMING_DAYS)
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![3, 7, 1]);
    }
}
