use super::schedule::AlertScheduleGenerator;
use crate::models::{CalendarEntry, CropProfile, EventKind};
use chrono::NaiveDate;

/// Whole-lifecycle calendar for a crop sown on `start`, ascending by date.
///
/// Unlike alert generation nothing is dropped for being in the past. Entries
/// on the same day keep schedule order (sowing, irrigation, fertilizer,
/// spray, harvest).
pub fn crop_calendar(crop: &CropProfile, start: NaiveDate) -> Vec<CalendarEntry> {
    let mut entries = vec![CalendarEntry {
        date: start,
        kind: EventKind::Sowing,
        title: "Sowing".to_string(),
        description: format!("Plant {} seeds", crop.name),
    }];

    entries.extend(
        AlertScheduleGenerator::new()
            .timeline(crop, start)
            .into_iter()
            .map(|(alert_type, action)| CalendarEntry {
                date: action.date,
                kind: alert_type.into(),
                title: action.label,
                description: action.message,
            }),
    );

    entries.sort_by_key(|e| e.date);
    entries
}
