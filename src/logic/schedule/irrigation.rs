use super::{offset_date, Schedule, ScheduledAction};
use crate::models::{AlertType, CropProfile};
use chrono::NaiveDate;

/// Weekly irrigation for the first four rounds, 10-day spacing afterwards.
///
/// The number of rounds is `duration_days / 7` regardless of the spacing
/// switch, so long crops get rounds scheduled past their harvest date and
/// round `i >= 5` lands on day `10 * i`, not ten days after round `i - 1`.
pub struct IrrigationSchedule;

const WEEKLY_ROUNDS: u32 = 4;

impl IrrigationSchedule {
    pub fn round_offset(round: u32) -> u64 {
        let round = u64::from(round);
        if round <= u64::from(WEEKLY_ROUNDS) {
            round * 7
        } else {
            round * 10
        }
    }
}

impl Schedule for IrrigationSchedule {
    fn alert_type(&self) -> AlertType {
        AlertType::Irrigation
    }

    fn actions(&self, crop: &CropProfile, anchor: NaiveDate) -> Vec<ScheduledAction> {
        // Offsets only grow, so the first round past the calendar end stops the series
        (1..=crop.duration_days / 7)
            .map_while(|round| {
                let date = offset_date(anchor, Self::round_offset(round))?;
                Some(ScheduledAction {
                    date,
                    label: "Irrigation".to_string(),
                    message: format!("Irrigate field for {}", crop.name),
                })
            })
            .collect()
    }
}
