use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Monetary amount as reported by the kiosk backend.
///
/// The backend is not consistent about this field: it may be a JSON number,
/// a numeric string, `null`, or absent entirely. A value that cannot be
/// read as a number is kept as `None` and contributes `0` to every sum
/// while still counting as one payment. Strict validation here would drop
/// whole records over a formatting hiccup, so the permissive read is the
/// contract, not a shortcut.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Amount(Option<f64>);

impl Amount {
    pub fn new(value: f64) -> Self {
        Amount(Some(value))
    }

    pub fn missing() -> Self {
        Amount(None)
    }

    /// The additive value: parsed amount, or zero when absent/garbage.
    pub fn or_zero(&self) -> f64 {
        self.0.unwrap_or(0.0)
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount(Some(value))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_none(),
        }
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string, or null")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Amount, E> {
        Ok(Amount(Some(value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
        Ok(Amount(Some(value as f64)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
        Ok(Amount(Some(value as f64)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Amount, E> {
        Ok(Amount(value.trim().parse::<f64>().ok()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount(None))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount(None))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Amount {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parses_number() {
        assert_eq!(parse("10.5").or_zero(), 10.5);
        assert_eq!(parse("3").or_zero(), 3.0);
    }

    #[test]
    fn test_parses_numeric_string() {
        assert_eq!(parse("\"10.50\"").or_zero(), 10.50);
        assert_eq!(parse("\" 7.25 \"").or_zero(), 7.25);
    }

    #[test]
    fn test_null_and_garbage_become_zero() {
        assert_eq!(parse("null").or_zero(), 0.0);
        assert!(parse("null").is_missing());
        assert_eq!(parse("\"abc\"").or_zero(), 0.0);
        assert!(parse("\"abc\"").is_missing());
    }

    #[test]
    fn test_default_is_missing() {
        assert!(Amount::default().is_missing());
        assert_eq!(Amount::default().or_zero(), 0.0);
    }

    #[test]
    fn test_serializes_back_to_number_or_null() {
        assert_eq!(serde_json::to_string(&Amount::new(2.5)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&Amount::missing()).unwrap(), "null");
    }
}
