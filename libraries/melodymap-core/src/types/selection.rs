/// Selector values for the dashboard views
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of top artists and top tracks requested by the home view.
pub const HOME_TOP_ITEMS_LIMIT: u32 = 15;

/// Window of listening history the backend ranks over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Roughly the last four weeks
    ShortTerm,
    /// Roughly the last six months
    #[default]
    MediumTerm,
    /// Roughly the last year
    LongTerm,
}

impl TimeRange {
    /// Every selectable range, in display order
    pub const ALL: [TimeRange; 3] = [
        TimeRange::ShortTerm,
        TimeRange::MediumTerm,
        TimeRange::LongTerm,
    ];

    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    /// Label shown in the selector
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "Last 4 Weeks",
            TimeRange::MediumTerm => "6 Months",
            TimeRange::LongTerm => "1 Year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| {
                format!("Invalid time range '{s}', expected short_term, medium_term or long_term")
            })
    }
}

/// Number of recommendations to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecommendationLimit {
    /// 5 tracks
    Five,
    /// 10 tracks
    #[default]
    Ten,
    /// 20 tracks
    Twenty,
    /// 50 tracks
    Fifty,
}

impl RecommendationLimit {
    /// Every selectable limit, in display order
    pub const ALL: [RecommendationLimit; 4] = [
        RecommendationLimit::Five,
        RecommendationLimit::Ten,
        RecommendationLimit::Twenty,
        RecommendationLimit::Fifty,
    ];

    /// Numeric value sent as the `limit` query parameter
    pub fn value(&self) -> u32 {
        match self {
            RecommendationLimit::Five => 5,
            RecommendationLimit::Ten => 10,
            RecommendationLimit::Twenty => 20,
            RecommendationLimit::Fifty => 50,
        }
    }

    /// Label shown in the selector
    pub fn label(&self) -> String {
        format!("{} tracks", self.value())
    }
}

impl fmt::Display for RecommendationLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<u32> for RecommendationLimit {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        RecommendationLimit::ALL
            .into_iter()
            .find(|limit| limit.value() == value)
            .ok_or_else(|| format!("Invalid recommendation limit {value}, expected 5, 10, 20 or 50"))
    }
}

impl FromStr for RecommendationLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid recommendation limit '{s}'"))?;
        RecommendationLimit::try_from(value)
    }
}
