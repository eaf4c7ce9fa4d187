// Filter selection and the static option tables shown in the search form
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(String),

    #[error("Unknown holiday type: {0}")]
    UnknownHolidayType(String),

    #[error("Invalid year: {0} (expected 4 digits)")]
    InvalidYear(String),

    #[error("Invalid country code: {0}")]
    InvalidCountry(String),
}

// Calendar month, always within 1..=12
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    pub fn new(value: u8) -> Result<Self, FilterError> {
        if (1..=12).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FilterError::InvalidMonth(value.to_string()))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.0) - 1]
    }
}

impl TryFrom<u8> for Month {
    type Error = FilterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Month::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> u8 {
        month.0
    }
}

impl FromStr for Month {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| FilterError::InvalidMonth(s.to_string()))?;
        Month::new(value)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayType {
    National,
    Local,
    Religious,
    Observance,
}

impl HolidayType {
    pub const ALL: [HolidayType; 4] = [
        HolidayType::National,
        HolidayType::Local,
        HolidayType::Religious,
        HolidayType::Observance,
    ];

    // Value sent as the `type` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            HolidayType::National => "national",
            HolidayType::Local => "local",
            HolidayType::Religious => "religious",
            HolidayType::Observance => "observance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HolidayType::National => "National Holiday",
            HolidayType::Local => "Local Holiday",
            HolidayType::Religious => "Religious Holiday",
            HolidayType::Observance => "Observance",
        }
    }
}

impl FromStr for HolidayType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        HolidayType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| FilterError::UnknownHolidayType(s.to_string()))
    }
}

impl fmt::Display for HolidayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// What the user has picked in the search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub country: Option<String>,
    pub year: Option<String>,
    pub month: Option<Month>,
    pub holiday_type: Option<HolidayType>,
    pub search_text: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            country: Some(DEFAULT_COUNTRY.to_string()),
            year: Some(DEFAULT_YEAR.to_string()),
            month: None,
            holiday_type: None,
            search_text: String::new(),
        }
    }
}

impl FilterSelection {
    // Country and year are required, everything else refines the query
    pub fn is_valid(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.country) && present(&self.year)
    }

    // Snapshot of the selection as a request, None when the form is incomplete
    pub fn to_query(&self) -> Option<HolidayQuery> {
        if !self.is_valid() {
            return None;
        }

        let search = self.search_text.trim();
        Some(HolidayQuery {
            country: self.country.clone()?.trim().to_string(),
            year: self.year.clone()?.trim().to_string(),
            month: self.month,
            search: (!search.is_empty()).then(|| search.to_string()),
            holiday_type: self.holiday_type,
        })
    }
}

// A fully validated request for the holidays endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayQuery {
    pub country: String,
    pub year: String,
    pub month: Option<Month>,
    pub search: Option<String>,
    pub holiday_type: Option<HolidayType>,
}

impl HolidayQuery {
    pub fn new(country: &str, year: &str) -> Self {
        Self {
            country: country.to_string(),
            year: year.to_string(),
            month: None,
            search: None,
            holiday_type: None,
        }
    }

    // Query string pairs in the order they are sent. Unset refinements are
    // left out entirely rather than sent as empty strings.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("country", self.country.clone()),
            ("year", self.year.clone()),
        ];

        if let Some(month) = self.month {
            params.push(("month", month.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(holiday_type) = self.holiday_type {
            params.push(("type", holiday_type.as_str().to_string()));
        }

        params
    }
}

pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_YEAR: &str = "2024";

// Most recent year offered in the year picker, the list counts down from it
pub const LATEST_YEAR: u16 = 2024;
pub const YEAR_OPTION_COUNT: u16 = 5;

pub const COUNTRY_OPTIONS: [(&str, &str); 5] = [
    ("US", "United States"),
    ("IN", "India"),
    ("GB", "United Kingdom"),
    ("CA", "Canada"),
    ("AU", "Australia"),
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn country_label(code: &str) -> Option<&'static str> {
    COUNTRY_OPTIONS
        .iter()
        .find(|(value, _)| value.eq_ignore_ascii_case(code))
        .map(|(_, label)| *label)
}

pub fn year_options() -> Vec<String> {
    (0..YEAR_OPTION_COUNT)
        .map(|i| (LATEST_YEAR - i).to_string())
        .collect()
}

pub fn parse_year(input: &str) -> Result<String, FilterError> {
    let year = input.trim();
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Ok(year.to_string())
    } else {
        Err(FilterError::InvalidYear(input.to_string()))
    }
}

// Codes outside the option table are accepted as long as they look like one
pub fn parse_country(input: &str) -> Result<String, FilterError> {
    let code = input.trim();
    if (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(FilterError::InvalidCountry(input.to_string()))
    }
}
