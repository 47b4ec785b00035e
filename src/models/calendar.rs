use super::AlertType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Sowing,
    Irrigation,
    Fertilizer,
    Spray,
    Harvest,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Sowing => "Sowing",
            EventKind::Irrigation => "Irrigation",
            EventKind::Fertilizer => "Fertilizer",
            EventKind::Spray => "Spray",
            EventKind::Harvest => "Harvest",
        }
    }
}

impl From<AlertType> for EventKind {
    fn from(alert_type: AlertType) -> Self {
        match alert_type {
            AlertType::Irrigation => EventKind::Irrigation,
            AlertType::Fertilizer => EventKind::Fertilizer,
            AlertType::Spray => EventKind::Spray,
            AlertType::Harvest => EventKind::Harvest,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of a crop's lifecycle calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub kind: EventKind,
    pub title: String,
    pub description: String,
}
