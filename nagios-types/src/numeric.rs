//! Lenient decoding for numbers that may arrive as JSON strings.
//!
//! Use these with `#[serde(deserialize_with = "...")]`. Optional variants
//! need `#[serde(default)]` as well so a missing field decodes to `None`.

use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};

/// Deserialize a required `f64` from a JSON number or numeric string.
pub fn deserialize_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(F64Visitor)
}

/// Deserialize an optional `f64`. `null` and `""` decode to `None`.
pub fn deserialize_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptF64Visitor)
}

/// Deserialize an optional non-negative integer, such as `recordcount`.
pub fn deserialize_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match deserializer.deserialize_option(OptF64Visitor)? {
        None => Ok(None),
        Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(Some(v as u64)),
        Some(v) => Err(de::Error::invalid_value(
            Unexpected::Float(v),
            &"a non-negative integer",
        )),
    }
}

/// Deserialize a string that must never be interpreted as a number.
///
/// Bare JSON numbers are accepted and rendered back to text, so a backend
/// that sends `5.8` instead of `"5.8"` still decodes.
pub fn deserialize_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(StringVisitor)
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

struct F64Visitor;

impl<'de> Visitor<'de> for F64Visitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a string containing a number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        parse_number(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }
}

struct OptF64Visitor;

impl<'de> Visitor<'de> for OptF64Visitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("null, a number or a string containing a number")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.trim().is_empty() {
            return Ok(None);
        }
        parse_number(v)
            .map(Some)
            .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }
}

struct StringVisitor;

impl<'de> Visitor<'de> for StringVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "deserialize_f64")]
        required: f64,
        #[serde(default, deserialize_with = "deserialize_opt_f64")]
        optional: Option<f64>,
        #[serde(default, deserialize_with = "deserialize_opt_u64")]
        count: Option<u64>,
    }

    #[derive(Debug, Deserialize)]
    struct Text {
        #[serde(deserialize_with = "deserialize_string")]
        value: String,
    }

    #[test]
    fn test_quoted_and_bare_numbers() {
        let quoted: Probe =
            serde_json::from_str(r#"{"required": "2", "optional": "1", "count": "7"}"#).unwrap();
        assert_eq!(quoted.required, 2.0);
        assert_eq!(quoted.optional, Some(1.0));
        assert_eq!(quoted.count, Some(7));

        let bare: Probe =
            serde_json::from_str(r#"{"required": 2, "optional": 0.5, "count": 7}"#).unwrap();
        assert_eq!(bare.required, 2.0);
        assert_eq!(bare.optional, Some(0.5));
        assert_eq!(bare.count, Some(7));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let probe: Probe = serde_json::from_str(r#"{"required": " 3 "}"#).unwrap();
        assert_eq!(probe.required, 3.0);
    }

    #[test]
    fn test_missing_null_and_empty_optionals() {
        let missing: Probe = serde_json::from_str(r#"{"required": "0"}"#).unwrap();
        assert_eq!(missing.optional, None);
        assert_eq!(missing.count, None);

        let null: Probe =
            serde_json::from_str(r#"{"required": "0", "optional": null, "count": null}"#).unwrap();
        assert_eq!(null.optional, None);
        assert_eq!(null.count, None);

        let empty: Probe =
            serde_json::from_str(r#"{"required": "0", "optional": "", "count": ""}"#).unwrap();
        assert_eq!(empty.optional, None);
        assert_eq!(empty.count, None);
    }

    #[test]
    fn test_rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Probe>(r#"{"required": "up"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"required": "NaN"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"required": ""}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"required": true}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"required": "0", "optional": "x"}"#).is_err());
    }

    #[test]
    fn test_missing_required_field_fails() {
        assert!(serde_json::from_str::<Probe>(r#"{"optional": "1"}"#).is_err());
    }

    #[test]
    fn test_count_must_be_whole_and_non_negative() {
        assert!(serde_json::from_str::<Probe>(r#"{"required": 0, "count": "-1"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"required": 0, "count": 1.5}"#).is_err());
    }

    #[test]
    fn test_string_accepts_version_like_tokens() {
        let text: Text = serde_json::from_str(r#"{"value": "5.8.10"}"#).unwrap();
        assert_eq!(text.value, "5.8.10");

        let text: Text = serde_json::from_str(r#"{"value": "2024R1.3"}"#).unwrap();
        assert_eq!(text.value, "2024R1.3");
    }

    #[test]
    fn test_string_accepts_bare_numbers() {
        let text: Text = serde_json::from_str(r#"{"value": 5}"#).unwrap();
        assert_eq!(text.value, "5");

        let text: Text = serde_json::from_str(r#"{"value": 5.8}"#).unwrap();
        assert_eq!(text.value, "5.8");
    }
}
