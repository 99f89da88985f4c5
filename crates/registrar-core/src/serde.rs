use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Parse a calendar date from `YYYY-MM-DD`, `DD/MM/YYYY`, or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Deserialize an optional string, treating empty strings as `None`.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()))
}

/// Deserialize an optional string into any `FromStr` type.
///
/// Empty strings and `null` are `None`; unparsable values are an error.
pub fn deserialize_optional_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match deserialize_optional_string(deserializer)? {
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Any JSON value, keeping strings and discarding everything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn deserialize_loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseText>::deserialize(deserializer)? {
        Some(LooseText::Text(s)) if !s.trim().is_empty() => Some(s),
        Some(LooseText::Text(_) | LooseText::Other(_)) | None => None,
    })
}

/// Deserialize an optional date that the backend may send as a plain date,
/// a full timestamp, an empty string, or `null`. Unparsable values are `None`
/// instead of failing the enclosing record.
pub fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_loose_text(deserializer)?.and_then(|s| parse_date(&s)))
}

/// Like [`deserialize_optional_from_str`], but an unparsable value is `None`
/// instead of failing the enclosing record.
pub fn deserialize_lenient_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(deserialize_loose_text(deserializer)?.and_then(|s| s.trim().parse::<T>().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        gender: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_from_str")]
        grade: Option<u8>,
    }

    #[derive(Deserialize)]
    struct LenientRow {
        #[serde(default, deserialize_with = "deserialize_lenient_date")]
        date_of_birth: Option<NaiveDate>,
        #[serde(default, deserialize_with = "deserialize_lenient_from_str")]
        grade: Option<u8>,
    }

    #[test]
    fn test_lenient_fields_fall_back_to_none() {
        let row: LenientRow =
            serde_json::from_str(r#"{"date_of_birth": "yesterday", "grade": 7}"#).unwrap();
        assert_eq!(row.date_of_birth, None);
        assert_eq!(row.grade, None);

        let row: LenientRow =
            serde_json::from_str(r#"{"date_of_birth": "01/05/2010", "grade": " 7 "}"#).unwrap();
        assert_eq!(row.date_of_birth, NaiveDate::from_ymd_opt(2010, 5, 1));
        assert_eq!(row.grade, Some(7));

        let row: LenientRow =
            serde_json::from_str(r#"{"date_of_birth": "2010-05-01T00:00:00.000Z"}"#).unwrap();
        assert_eq!(row.date_of_birth, NaiveDate::from_ymd_opt(2010, 5, 1));

        let row: LenientRow = serde_json::from_str(r#"{"date_of_birth": null}"#).unwrap();
        assert_eq!(row.date_of_birth, None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2010, 5, 1);
        assert_eq!(parse_date("2010-05-01"), expected);
        assert_eq!(parse_date("01/05/2010"), expected);
        assert_eq!(parse_date("2010-05-01T00:00:00.000Z"), expected);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_deserialize_empty_string_is_none() {
        let row: Row = serde_json::from_str(r#"{"gender": ""}"#).unwrap();
        assert_eq!(row.gender, None);
        assert_eq!(row.grade, None);
    }

    #[test]
    fn test_deserialize_from_str() {
        let row: Row = serde_json::from_str(r#"{"grade": "7"}"#).unwrap();
        assert_eq!(row.grade, Some(7));
        let result: Result<Row, _> = serde_json::from_str(r#"{"grade": "seven"}"#);
        assert!(result.is_err());
    }
}
