use crate::models::AlertEvent;
use std::collections::HashSet;

/// Drop candidates that already exist for the same farmer, crop, alert type
/// and date. Matching is exact; there is no date window.
///
/// A candidate repeating an earlier candidate in the same batch is dropped
/// too. Survivors keep their relative order.
pub fn filter_new(candidates: Vec<AlertEvent>, existing: &[AlertEvent]) -> Vec<AlertEvent> {
    let mut taken: HashSet<_> = existing.iter().map(AlertEvent::slot).collect();

    candidates
        .into_iter()
        .filter(|candidate| taken.insert(candidate.slot()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::schedule::generate;
    use crate::models::{AlertType, CropProfile, Season};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn irrigation(farmer: i64, crop: i64, on: NaiveDate) -> AlertEvent {
        AlertEvent::new(farmer, crop, AlertType::Irrigation, on, "Irrigate field for Moong")
    }

    #[test]
    fn exact_match_is_dropped_next_day_is_kept() {
        let existing = vec![irrigation(1, 3, date(2024, 2, 1))];
        let candidates = vec![
            irrigation(1, 3, date(2024, 2, 1)),
            irrigation(1, 3, date(2024, 2, 2)),
        ];
        let new = filter_new(candidates, &existing);
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].date, date(2024, 2, 2));
    }

    #[test]
    fn any_differing_field_is_new() {
        let existing = vec![irrigation(1, 3, date(2024, 2, 1))];
        let mut spray = irrigation(1, 3, date(2024, 2, 1));
        spray.alert_type = AlertType::Spray;
        let candidates = vec![
            irrigation(2, 3, date(2024, 2, 1)),
            irrigation(1, 4, date(2024, 2, 1)),
            spray,
        ];
        assert_eq!(filter_new(candidates, &existing).len(), 3);
    }

    #[test]
    fn message_differences_do_not_matter() {
        let existing = vec![irrigation(1, 3, date(2024, 2, 1))];
        let mut reworded = irrigation(1, 3, date(2024, 2, 1));
        reworded.message = "Water the Moong".into();
        assert!(filter_new(vec![reworded], &existing).is_empty());
    }

    #[test]
    fn duplicates_within_batch_are_collapsed() {
        let candidates = vec![
            irrigation(1, 3, date(2024, 2, 1)),
            irrigation(1, 3, date(2024, 2, 8)),
            irrigation(1, 3, date(2024, 2, 1)),
        ];
        let new = filter_new(candidates, &[]);
        let dates: Vec<NaiveDate> = new.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 2, 8)]);
    }

    #[test]
    fn regeneration_is_idempotent() {
        let crop = CropProfile::new(3, "Cotton", Season::Kharif, 180);
        let anchor = date(2024, 6, 10);
        let now = date(2024, 7, 1);

        let first = generate(1, &crop, anchor, now);
        assert!(!first.is_empty());
        let stored = filter_new(first.clone(), &[]);
        assert_eq!(stored, first);

        let second = generate(1, &crop, anchor, now);
        assert!(filter_new(second, &stored).is_empty());
    }
}
