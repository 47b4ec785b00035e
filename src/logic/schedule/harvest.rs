use super::{offset_date, Schedule, ScheduledAction};
use crate::models::{AlertType, CropProfile};
use chrono::NaiveDate;

pub struct HarvestSchedule;

impl Schedule for HarvestSchedule {
    fn alert_type(&self) -> AlertType {
        AlertType::Harvest
    }

    fn actions(&self, crop: &CropProfile, anchor: NaiveDate) -> Vec<ScheduledAction> {
        offset_date(anchor, crop.duration_days)
            .map(|date| ScheduledAction {
                date,
                label: "Harvest".to_string(),
                message: format!("Begin harvest for {}", crop.name),
            })
            .into_iter()
            .collect()
    }
}
