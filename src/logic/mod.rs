pub mod advisory;
pub mod calendar;
pub mod catalog;
pub mod criteria;
pub mod dedup;
pub mod planner;
pub mod ranking;
pub mod recommend;
pub mod schedule;

pub use advisory::{conditions_advisory, Advice, AdvisoryKind, WeatherSummary};
pub use calendar::crop_calendar;
pub use catalog::CropCatalog;
pub use criteria::{engine::score, CompatibilityScorer};
pub use dedup::filter_new;
pub use planner::{plan_alerts, upcoming, AlertPlan, DEFAULT_UPCOMING_DAYS};
pub use ranking::{rank, DEFAULT_MIN_CONFIDENCE};
pub use recommend::{adopt, recommend};
pub use schedule::{generate, AlertScheduleGenerator};
