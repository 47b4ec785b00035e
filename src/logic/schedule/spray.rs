use super::{offset_date, Schedule, ScheduledAction};
use crate::models::{AlertType, CropProfile};
use chrono::NaiveDate;

const SPRAY_DAYS: [u32; 4] = [20, 40, 60, 80];

/// Pest and disease control sprays every 20 days up to day 80.
pub struct SpraySchedule;

impl Schedule for SpraySchedule {
    fn alert_type(&self) -> AlertType {
        AlertType::Spray
    }

    fn actions(&self, crop: &CropProfile, anchor: NaiveDate) -> Vec<ScheduledAction> {
        SPRAY_DAYS
            .iter()
            .filter(|offset| **offset < crop.duration_days)
            .filter_map(|offset| {
                Some(ScheduledAction {
                    date: offset_date(anchor, *offset)?,
                    label: "Pest/Disease control spray".to_string(),
                    message: format!("Apply pest/disease control spray for {}", crop.name),
                })
            })
            .collect()
    }
}
