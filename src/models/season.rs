use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Indian cropping seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Monsoon sowing, June through October
    Kharif,
    /// Winter sowing, November through February
    Rabi,
    /// Zaid, March through May
    Summer,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Summer => "Summer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kharif" => Some(Season::Kharif),
            "rabi" => Some(Season::Rabi),
            "summer" | "zaid" => Some(Season::Summer),
            _ => None,
        }
    }

    pub fn all() -> &'static [Season] {
        &[Season::Kharif, Season::Rabi, Season::Summer]
    }

    pub fn for_date(date: NaiveDate) -> Self {
        resolve_season(date.month())
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a calendar month (1-12) to its growing season.
///
/// Anything that is not a Kharif or Rabi month resolves to Summer.
pub fn resolve_season(month: u32) -> Season {
    match month {
        6..=10 => Season::Kharif,
        11 | 12 | 1 | 2 => Season::Rabi,
        _ => Season::Summer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_season_known_months() {
        assert_eq!(resolve_season(6), Season::Kharif);
        assert_eq!(resolve_season(10), Season::Kharif);
        assert_eq!(resolve_season(11), Season::Rabi);
        assert_eq!(resolve_season(1), Season::Rabi);
        assert_eq!(resolve_season(2), Season::Rabi);
        assert_eq!(resolve_season(3), Season::Summer);
        assert_eq!(resolve_season(5), Season::Summer);
    }

    #[test]
    fn resolve_season_partitions_the_year() {
        let mut counts = std::collections::HashMap::new();
        for month in 1..=12 {
            *counts.entry(resolve_season(month)).or_insert(0) += 1;
        }
        assert_eq!(counts.get(&Season::Kharif), Some(&5));
        assert_eq!(counts.get(&Season::Rabi), Some(&4));
        assert_eq!(counts.get(&Season::Summer), Some(&3));
        assert_eq!(counts.values().sum::<i32>(), 12);
    }

    #[test]
    fn season_for_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(Season::for_date(date), Season::Kharif);
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(Season::for_date(date), Season::Rabi);
    }

    #[test]
    fn season_from_str() {
        assert_eq!(Season::from_str("Kharif"), Some(Season::Kharif));
        assert_eq!(Season::from_str("RABI"), Some(Season::Rabi));
        assert_eq!(Season::from_str(" summer "), Some(Season::Summer));
        assert_eq!(Season::from_str("zaid"), Some(Season::Summer));
        assert_eq!(Season::from_str("monsoon"), None);
        assert_eq!(Season::from_str(""), None);
    }

    #[test]
    fn season_round_trip() {
        for season in Season::all() {
            assert_eq!(Season::from_str(season.as_str()), Some(*season));
        }
    }
}
