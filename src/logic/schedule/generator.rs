use super::{
    fertilizer::FertilizerSchedule, harvest::HarvestSchedule, irrigation::IrrigationSchedule,
    spray::SpraySchedule, Schedule, ScheduledAction,
};
use crate::models::{AlertEvent, AlertType, CropProfile};
use chrono::NaiveDate;
use std::collections::HashSet;

pub struct AlertScheduleGenerator {
    schedules: Vec<Box<dyn Schedule>>,
}

impl AlertScheduleGenerator {
    pub fn new() -> Self {
        // Registration order is output order
        let schedules: Vec<Box<dyn Schedule>> = vec![
            Box::new(IrrigationSchedule),
            Box::new(FertilizerSchedule),
            Box::new(SpraySchedule),
            Box::new(HarvestSchedule),
        ];

        Self { schedules }
    }

    /// Full lifecycle of a crop grouped by schedule, without any date filter.
    pub fn timeline(
        &self,
        crop: &CropProfile,
        anchor: NaiveDate,
    ) -> Vec<(AlertType, ScheduledAction)> {
        let mut seen = HashSet::new();
        let mut timeline = Vec::new();

        for schedule in &self.schedules {
            let alert_type = schedule.alert_type();
            let mut actions = schedule.actions(crop, anchor);
            actions.sort_by_key(|a| a.date);
            for action in actions {
                if seen.insert((alert_type, action.date)) {
                    timeline.push((alert_type, action));
                }
            }
        }

        timeline
    }

    /// Alerts for a crop adopted on `anchor`, keeping only those dated
    /// strictly after `now`.
    ///
    /// Output is grouped irrigation, fertilizer, spray, harvest and ascending
    /// by date within each group.
    pub fn generate(
        &self,
        farmer_id: i64,
        crop: &CropProfile,
        anchor: NaiveDate,
        now: NaiveDate,
    ) -> Vec<AlertEvent> {
        let events: Vec<AlertEvent> = self
            .timeline(crop, anchor)
            .into_iter()
            .filter(|(_, action)| action.date > now)
            .map(|(alert_type, action)| {
                AlertEvent::new(farmer_id, crop.id, alert_type, action.date, action.message)
            })
            .collect();

        tracing::debug!(
            farmer_id,
            crop = %crop.name,
            %anchor,
            %now,
            count = events.len(),
            "Generated alert schedule"
        );
        events
    }
}

impl Default for AlertScheduleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn generate(
    farmer_id: i64,
    crop: &CropProfile,
    anchor: NaiveDate,
    now: NaiveDate,
) -> Vec<AlertEvent> {
    AlertScheduleGenerator::new().generate(farmer_id, crop, anchor, now)
}
