use super::{offset_date, Schedule, ScheduledAction};
use crate::models::{AlertType, CropProfile};
use chrono::NaiveDate;

/// Day offset, label and nutrient phrase for each top dressing.
const APPLICATIONS: [(u32, &str, &str); 4] = [
    (15, "Nitrogen application", "nitrogen"),
    (30, "Phosphorus application", "phosphorus"),
    (45, "Potassium application", "potassium"),
    (60, "Balanced NPK application", "balanced NPK"),
];

/// Split fertilizer program. An application is only scheduled when it falls
/// strictly before the end of the crop's duration.
pub struct FertilizerSchedule;

impl Schedule for FertilizerSchedule {
    fn alert_type(&self) -> AlertType {
        AlertType::Fertilizer
    }

    fn actions(&self, crop: &CropProfile, anchor: NaiveDate) -> Vec<ScheduledAction> {
        APPLICATIONS
            .iter()
            .filter(|(offset, _, _)| *offset < crop.duration_days)
            .filter_map(|(offset, label, nutrient)| {
                Some(ScheduledAction {
                    date: offset_date(anchor, *offset)?,
                    label: label.to_string(),
                    message: format!("Apply {} fertilizer for {}", nutrient, crop.name),
                })
            })
            .collect()
    }
}
