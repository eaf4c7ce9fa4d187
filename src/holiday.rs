// Holiday records as returned by the holidays endpoint
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// A single holiday entry. Only the fields the view needs are typed, anything
// else the API sends is carried along untouched. Building one never fails:
// missing or oddly typed fields come out empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolidayRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: HolidayDate,
    #[serde(rename = "type")]
    pub kind: HolidayKind,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HolidayDate {
    pub iso: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Upstream sends either "National holiday" or ["National holiday", ...]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HolidayKind {
    Single(String),
    Many(Vec<String>),
}

impl Default for HolidayKind {
    fn default() -> Self {
        HolidayKind::Single(String::new())
    }
}

impl fmt::Display for HolidayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayKind::Single(kind) => f.write_str(kind),
            HolidayKind::Many(kinds) => f.write_str(&kinds.join(", ")),
        }
    }
}

// Absent and null are both empty text, scalars keep their JSON spelling
fn text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

impl From<Value> for HolidayKind {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(kinds) => {
                HolidayKind::Many(kinds.into_iter().map(|k| text(Some(k))).collect())
            }
            other => HolidayKind::Single(text(Some(other))),
        }
    }
}

impl From<Value> for HolidayDate {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => HolidayDate {
                iso: text(fields.remove("iso")),
                extra: fields,
            },
            // Some feeds flatten the date to a plain string
            other => HolidayDate {
                iso: text(Some(other)),
                extra: Map::new(),
            },
        }
    }
}

impl From<Value> for HolidayRecord {
    fn from(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                let mut fields = Map::new();
                fields.insert("name".to_string(), other);
                fields
            }
        };

        let description = match fields.remove("description") {
            None | Some(Value::Null) => None,
            some => Some(text(some)),
        };

        HolidayRecord {
            name: text(fields.remove("name")),
            description,
            date: fields.remove("date").map(HolidayDate::from).unwrap_or_default(),
            kind: fields.remove("type").map(HolidayKind::from).unwrap_or_default(),
            extra: fields,
        }
    }
}

impl<'de> Deserialize<'de> for HolidayRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(HolidayRecord::from)
    }
}

impl<'de> Deserialize<'de> for HolidayDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(HolidayDate::from)
    }
}

impl<'de> Deserialize<'de> for HolidayKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(HolidayKind::from)
    }
}

pub const NO_DESCRIPTION: &str = "No description available.";

impl HolidayRecord {
    pub fn new(name: &str, iso: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            date: HolidayDate {
                iso: iso.to_string(),
                extra: Map::new(),
            },
            kind: HolidayKind::Single(kind.to_string()),
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    // Identifies a record within a result set
    pub fn key(&self) -> String {
        format!("{}-{}", self.name, self.date.iso)
    }

    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }

    // `iso` may carry a time component ("2024-03-10T02:00:00-08:00"), only the
    // calendar date is interpreted.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let day = self.date.iso.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};
    use serde_json::json;

    #[test]
    fn test_deserialize_calendarific_record() {
        let json = r#"{
            "name": "Independence Day",
            "description": "Independence Day is a federal holiday in the USA",
            "country": {"id": "us", "name": "United States"},
            "date": {"iso": "2024-07-04", "datetime": {"year": 2024, "month": 7, "day": 4}},
            "type": ["National holiday"],
            "primary_type": "Federal Holiday",
            "locations": "All",
            "states": "All"
        }"#;

        let record: HolidayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Independence Day");
        assert_eq!(record.date.iso, "2024-07-04");
        assert_eq!(record.kind.to_string(), "National holiday");
        assert_eq!(record.extra["locations"], "All");
        assert!(record.date.extra.contains_key("datetime"));
        assert_eq!(record.key(), "Independence Day-2024-07-04");
    }

    #[test]
    fn test_plain_string_type_and_missing_description() {
        let json = r#"{"name": "Diwali", "date": {"iso": "2024-11-01"}, "type": "religious"}"#;

        let record: HolidayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, HolidayKind::Single("religious".to_string()));
        assert_eq!(record.description, None);
        assert_eq!(record.description_or_default(), NO_DESCRIPTION);
    }

    #[test]
    fn test_multiple_types_are_joined() {
        let kind = HolidayKind::Many(vec!["Observance".to_string(), "Season".to_string()]);
        assert_eq!(kind.to_string(), "Observance, Season");
    }

    #[test]
    fn test_calendar_date_ignores_time_component() {
        let record = HolidayRecord::new("Daylight Saving Time starts", "2024-03-10T02:00:00-08:00", "Clock change");
        let date = record.calendar_date().unwrap();
        assert_eq!(date.weekday(), Weekday::Sun);
        assert_eq!(date.month(), 3);

        let broken = HolidayRecord::new("Broken", "soon", "local");
        assert!(broken.calendar_date().is_none());
    }

    #[test]
    fn test_blank_description_falls_back() {
        let record = HolidayRecord::new("Christmas", "2024-12-25", "national").with_description("  ");
        assert_eq!(record.description_or_default(), NO_DESCRIPTION);
    }

    #[test]
    fn test_missing_or_null_type_defaults_to_empty() {
        let untyped: HolidayRecord =
            serde_json::from_value(json!({"name": "Local Fair", "date": {"iso": "2024-05-01"}}))
                .unwrap();
        assert_eq!(untyped.kind, HolidayKind::default());
        assert_eq!(untyped.kind.to_string(), "");

        let null_type = HolidayRecord::from(json!({"name": "Local Fair", "type": null}));
        assert_eq!(null_type.kind, HolidayKind::default());
        assert_eq!(null_type.date.iso, "");
        assert!(null_type.calendar_date().is_none());
    }

    #[test]
    fn test_odd_shapes_never_fail() {
        let record = HolidayRecord::from(json!({
            "name": null,
            "date": "2024-08-15",
            "type": 7,
            "description": null,
            "country": {"id": "in"}
        }));
        assert_eq!(record.name, "");
        assert_eq!(record.date.iso, "2024-08-15");
        assert_eq!(record.kind, HolidayKind::Single("7".to_string()));
        assert_eq!(record.description, None);
        assert_eq!(record.extra["country"]["id"], "in");

        let bare = HolidayRecord::from(json!("Founders Day"));
        assert_eq!(bare.name, "Founders Day");
        assert!(bare.extra.is_empty());
    }
}
