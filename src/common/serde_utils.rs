// src/common/serde_utils.rs
//
// Lenient deserializers for fields the frontend sends loosely typed.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawLabel> for String {
    fn from(raw: RawLabel) -> Self {
        match raw {
            RawLabel::Text(s) => s,
            RawLabel::Integer(n) => n.to_string(),
            RawLabel::Float(f) => f.to_string(),
        }
    }
}

/// Floor labels arrive as `"1"`, `1` or `"Tech. basement"`; all become strings.
pub fn labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawLabel>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(String::from).collect())
}

/// A single optional label (work priority is sent as `"medium"` or `3`).
pub fn optional_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawLabel>::deserialize(deserializer)?.map(String::from))
}

/// `YYYY-MM-DD`, with `""` and `null` both meaning "no date".
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid date '{s}', expected YYYY-MM-DD"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "labels")]
        floors: Vec<String>,
        #[serde(default, deserialize_with = "optional_label")]
        priority: Option<String>,
        #[serde(default, deserialize_with = "optional_date")]
        start_date: Option<NaiveDate>,
    }

    #[test]
    fn mixed_floor_labels_become_strings() {
        let probe: Probe =
            serde_json::from_value(json!({ "floors": ["Tech. basement", 1, "2"] })).unwrap();
        assert_eq!(probe.floors, vec!["Tech. basement", "1", "2"]);
    }

    #[test]
    fn priority_accepts_text_and_numbers() {
        let text: Probe = serde_json::from_value(json!({ "priority": "medium" })).unwrap();
        let number: Probe = serde_json::from_value(json!({ "priority": 3 })).unwrap();
        assert_eq!(text.priority.as_deref(), Some("medium"));
        assert_eq!(number.priority.as_deref(), Some("3"));
    }

    #[test]
    fn empty_date_string_is_none() {
        let probe: Probe = serde_json::from_value(json!({ "start_date": "" })).unwrap();
        assert_eq!(probe.start_date, None);

        let probe: Probe = serde_json::from_value(json!({ "start_date": "2024-05-31" })).unwrap();
        assert_eq!(probe.start_date, NaiveDate::from_ymd_opt(2024, 5, 31));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let result = serde_json::from_value::<Probe>(json!({ "start_date": "31.05.2024" }));
        assert!(result.is_err());
    }
}
