//! Serde utilities for backend payloads.

use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserializer, Serializer};
use serde_json::Value;
use std::fmt;

/// Module to handle identifiers that might arrive as strings or numbers.
pub mod string_to_u64 {
    use super::{Deserializer, Serializer, Visitor, de, fmt};

    /// Serializes a u64 as a JSON integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(*value)
    }

    /// Deserializes a u64 from a string or number.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a non-negative integer or a string holding one.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrIntVisitor;

        impl Visitor<'_> for StringOrIntVisitor {
            type Value = u64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing a record id")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(value).map_err(de::Error::custom)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.trim().parse::<u64>().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(StringOrIntVisitor)
    }
}

/// Module for numeric columns that may be serialized as strings (`"5000.00"`).
///
/// Reading accepts numbers, numeric strings and `null` (read as zero). Writing
/// emits integral values as JSON integers and non-finite values as `null`.
pub mod lenient_number {
    use super::{Deserializer, Serializer, Visitor, de, fmt};

    /// Serializes an f64 the way a JSON encoder in a browser would.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

        if !value.is_finite() {
            return serializer.serialize_none();
        }

        if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            #[allow(clippy::cast_possible_truncation)]
            return serializer.serialize_i64(*value as i64);
        }

        serializer.serialize_f64(*value)
    }

    /// Deserializes an f64 from a number, numeric string or null.
    ///
    /// # Errors
    ///
    /// Returns an error for booleans, arrays, objects and unparsable strings.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberVisitor;

        impl Visitor<'_> for NumberVisitor {
            type Value = f64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a string holding a number")
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value as f64)
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value as f64)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(0.0);
                }
                trimmed.parse::<f64>().map_err(de::Error::custom)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0.0)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0.0)
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}

/// Deserializes a string field that may be `null`.
///
/// # Errors
///
/// Returns an error if the value is neither a string nor null.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Deserializes a field that may be `null`, reading `null` as `T::default()`.
///
/// # Errors
///
/// Returns an error if a present value does not match `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    let value: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Extracts the records of a collection response.
///
/// The backend answers either with a bare array or with an object whose
/// `data` field holds the array. Any other shape reads as no records.
#[must_use]
pub fn collection_records(body: Value) -> Vec<Value> {
    match body {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(records)) => records,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Decodes a collection response into typed records.
///
/// # Errors
///
/// Returns an error if any record does not match `T`.
pub fn decode_collection<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, serde_json::Error> {
    collection_records(body)
        .into_iter()
        .map(serde_json::from_value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Row {
        #[serde(with = "string_to_u64")]
        id: u64,
        #[serde(with = "lenient_number", default)]
        harga: f64,
    }

    #[test]
    fn test_id_from_string_or_number() {
        let a: Row = serde_json::from_value(json!({"id": "12", "harga": 1})).unwrap();
        let b: Row = serde_json::from_value(json!({"id": 12, "harga": 1})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_id_rejected() {
        let result: Result<Row, _> = serde_json::from_value(json!({"id": -1, "harga": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_decimal_string_number() {
        let row: Row = serde_json::from_value(json!({"id": 1, "harga": "5000.00"})).unwrap();
        assert!((row.harga - 5000.0).abs() < f64::EPSILON);

        let row: Row = serde_json::from_value(json!({"id": 1, "harga": null})).unwrap();
        assert!(row.harga.abs() < f64::EPSILON);
    }

    #[test]
    fn test_integral_numbers_serialize_as_integers() {
        let row = Row { id: 3, harga: 5000.0 };
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"id":3,"harga":5000}"#);

        let row = Row { id: 3, harga: 2.5 };
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"id":3,"harga":2.5}"#);
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let row = Row {
            id: 3,
            harga: f64::NAN,
        };
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"id":3,"harga":null}"#);
    }

    #[test]
    fn test_collection_envelope() {
        assert_eq!(collection_records(json!([1, 2])).len(), 2);
        assert_eq!(collection_records(json!({"data": [1, 2, 3]})).len(), 3);
        assert!(collection_records(json!({"message": "ok"})).is_empty());
        assert!(collection_records(Value::Null).is_empty());
    }

    #[test]
    fn test_decode_collection_rejects_bad_record() {
        let result = decode_collection::<Row>(json!({"data": [{"id": "x"}]}));
        assert!(result.is_err());
    }
}
