use std::fmt;

use anyhow::{anyhow, Result};
use jiff::{
    civil::{Date, DateTime},
    tz::TimeZone,
    Timestamp,
};
use serde::{Deserialize, Serialize};

/// A catalog entry as exchanged with the course service.
///
/// The identifier travels as `_id`. It is empty until the service assigns one, and an empty id
/// is never put on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub university: String,
    pub city: String,
    pub country: String,
    pub course_name: String,
    pub course_description: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub price: f64,
    pub currency: String,
}

impl Course {
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Display form of the price, e.g. `100.00 USD`
    pub fn price_display(&self) -> String {
        format!("{:.2} {}", self.price, self.currency)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.course_name, self.university, self.city)
    }
}

/// Currencies a course can be priced in, as `(code, display name)`.
pub const CURRENCIES: &[(&str, &str)] = &[
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
    ("CHF", "Swiss Franc"),
    ("CAD", "Canadian Dollar"),
    ("AUD", "Australian Dollar"),
    ("NZD", "New Zealand Dollar"),
    ("CNY", "Chinese Yuan"),
    ("INR", "Indian Rupee"),
    ("SEK", "Swedish Krona"),
    ("NOK", "Norwegian Krone"),
    ("DKK", "Danish Krone"),
    ("SGD", "Singapore Dollar"),
    ("HKD", "Hong Kong Dollar"),
    ("KRW", "South Korean Won"),
    ("BRL", "Brazilian Real"),
    ("MXN", "Mexican Peso"),
    ("ZAR", "South African Rand"),
    ("PLN", "Polish Zloty"),
];

pub fn currency_name(code: &str) -> Option<&'static str> {
    CURRENCIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Parses a calendar date out of whatever the course service sends back.
///
/// Accepts `YYYY-MM-DD`, civil datetimes (`2025-01-10T00:00:00`) and RFC 3339 timestamps. Only
/// the date part is kept; timestamps are read in UTC.
pub fn parse_date(s: &str) -> Result<Date> {
    let s = s.trim();
    if let Ok(date) = s.parse::<Date>() {
        return Ok(date);
    }
    if let Ok(datetime) = s.parse::<DateTime>() {
        return Ok(datetime.date());
    }
    let timestamp: Timestamp = s
        .parse()
        .map_err(|e| anyhow!("invalid date {:?}: {}", s, e))?;
    Ok(timestamp.to_zoned(TimeZone::UTC).date())
}

mod iso_date {
    use jiff::civil::Date;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(date)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_date(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use serde_json::json;

    use super::*;

    fn oxford() -> Course {
        Course {
            id: String::new(),
            university: "Oxford".to_string(),
            city: "Oxford".to_string(),
            country: "UK".to_string(),
            course_name: "Oxford Summer School".to_string(),
            course_description: "Six weeks of tutorials".to_string(),
            start_date: date(2025, 7, 1),
            end_date: date(2025, 8, 15),
            price: 4200.0,
            currency: "GBP".to_string(),
        }
    }

    #[test]
    fn decodes_service_json() {
        let value = json!({
            "_id": "66a1f0c2e4b0a1b2c3d4e5f6",
            "university": "MIT",
            "city": "Cambridge",
            "country": "USA",
            "course_name": "AI101",
            "course_description": "Intro to AI",
            "start_date": "2025-01-10T00:00:00",
            "end_date": "2025-03-01",
            "price": 100,
            "currency": "USD"
        });

        let course: Course = serde_json::from_value(value).unwrap();

        assert_eq!(course.id, "66a1f0c2e4b0a1b2c3d4e5f6");
        assert!(course.is_persisted());
        assert_eq!(course.start_date, date(2025, 1, 10));
        assert_eq!(course.end_date, date(2025, 3, 1));
        assert_eq!(course.price, 100.0);
    }

    #[test]
    fn unsaved_course_has_no_id_on_the_wire() {
        let value = serde_json::to_value(oxford()).unwrap();

        assert!(value.get("_id").is_none());
        assert_eq!(value["start_date"], "2025-07-01");
        assert_eq!(value["end_date"], "2025-08-15");

        let saved = Course {
            id: "abc".to_string(),
            ..oxford()
        };
        let value = serde_json::to_value(saved).unwrap();
        assert_eq!(value["_id"], "abc");
    }

    #[test]
    fn plain_id_field_is_not_read() {
        let mut value = serde_json::to_value(oxford()).unwrap();
        value["id"] = json!("abc");

        let course: Course = serde_json::from_value(value).unwrap();
        assert!(!course.is_persisted());
    }

    #[test]
    fn parse_date_formats() {
        assert_eq!(parse_date("2025-01-10").unwrap(), date(2025, 1, 10));
        assert_eq!(parse_date("2025-01-10T13:45:00").unwrap(), date(2025, 1, 10));
        assert_eq!(parse_date("2025-01-10T23:30:00Z").unwrap(), date(2025, 1, 10));
        assert!(parse_date("10/01/2025").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn currency_table() {
        assert_eq!(currency_name("USD"), Some("US Dollar"));
        assert_eq!(currency_name("usd"), None);
        assert_eq!(currency_name("XYZ"), None);
    }
}
