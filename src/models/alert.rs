use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Irrigation,
    Fertilizer,
    Spray,
    Harvest,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Irrigation => "Irrigation",
            AlertType::Fertilizer => "Fertilizer",
            AlertType::Spray => "Spray",
            AlertType::Harvest => "Harvest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "irrigation" => Some(AlertType::Irrigation),
            "fertilizer" | "fertiliser" => Some(AlertType::Fertilizer),
            "spray" => Some(AlertType::Spray),
            "harvest" => Some(AlertType::Harvest),
            _ => None,
        }
    }

    pub fn all() -> &'static [AlertType] {
        &[
            AlertType::Irrigation,
            AlertType::Fertilizer,
            AlertType::Spray,
            AlertType::Harvest,
        ]
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Pending,
    Completed,
    Dismissed,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Pending => "Pending",
            AlertStatus::Completed => "Completed",
            AlertStatus::Dismissed => "Dismissed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(AlertStatus::Pending),
            "completed" | "done" => Some(AlertStatus::Completed),
            "dismissed" => Some(AlertStatus::Dismissed),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dated action reminder for one farmer and crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub farmer_id: i64,
    pub crop_id: i64,
    pub alert_type: AlertType,
    pub date: NaiveDate,
    pub message: String,
}

impl AlertEvent {
    pub fn new(
        farmer_id: i64,
        crop_id: i64,
        alert_type: AlertType,
        date: NaiveDate,
        message: impl Into<String>,
    ) -> Self {
        Self {
            farmer_id,
            crop_id,
            alert_type,
            date,
            message: message.into(),
        }
    }

    /// Identity used for duplicate detection. The message is not part of it.
    pub fn slot(&self) -> (i64, i64, AlertType, NaiveDate) {
        (self.farmer_id, self.crop_id, self.alert_type, self.date)
    }
}

/// An alert as persisted, with its lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAlert {
    pub id: i64,
    #[serde(flatten)]
    pub event: AlertEvent,
    pub status: AlertStatus,
}

impl StoredAlert {
    pub fn is_pending(&self) -> bool {
        self.status == AlertStatus::Pending
    }

    pub fn complete(&mut self) {
        self.status = AlertStatus::Completed;
    }

    pub fn dismiss(&mut self) {
        self.status = AlertStatus::Dismissed;
    }
}
