pub mod fertilizer;
pub mod generator;
pub mod harvest;
pub mod irrigation;
pub mod spray;

pub use generator::{generate, AlertScheduleGenerator};

use crate::models::{AlertType, CropProfile};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One dated action produced by a schedule, before it is tied to a farmer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledAction {
    pub date: NaiveDate,
    /// Short label, e.g. "Nitrogen application"
    pub label: String,
    /// Reminder text in the form "<verb> for <crop name>"
    pub message: String,
}

/// A recurring or one-off agronomic task anchored at the adoption date.
pub trait Schedule: Send + Sync {
    fn alert_type(&self) -> AlertType;

    /// Every action for the crop's lifecycle, ascending by date. No
    /// filtering against the current date happens here.
    fn actions(&self, crop: &CropProfile, anchor: NaiveDate) -> Vec<ScheduledAction>;
}

/// `anchor + days`, or `None` past the end of the calendar.
pub(crate) fn offset_date(anchor: NaiveDate, days: impl Into<u64>) -> Option<NaiveDate> {
    anchor.checked_add_days(Days::new(days.into()))
}
