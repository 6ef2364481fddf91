//! Statement values
//!
//! Positional arguments and result cells. Conversions are lenient between
//! text and numbers, the way a loosely typed SQL driver would be.

use chrono::{DateTime, Utc};

use crate::error::{BakeryError, Result};

/// A single argument or column value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Time(DateTime<Utc>),
}

impl Value {
    /// Render as text. NULL becomes the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Text(v) => v.clone(),
            Value::Bytes(v) => String::from_utf8_lossy(v).into_owned(),
            Value::Time(v) => v.to_rfc3339(),
        }
    }

    /// Read as an integer. NULL and empty text are `None`.
    pub fn to_int(&self) -> Result<Option<i64>> {
        match self {
            Value::Null => Ok(None),
            Value::Int(v) => Ok(Some(*v)),
            Value::Float(v) => Ok(Some(v.round() as i64)),
            Value::Text(v) => parse_int(v),
            Value::Bytes(v) => parse_int(&String::from_utf8_lossy(v)),
            Value::Time(_) => Err(BakeryError::InvalidArgument(
                "expected an integer, got a timestamp".to_string(),
            )),
        }
    }

    /// Read as a UTC timestamp. NULL and empty text are `None`.
    ///
    /// Text must be RFC 3339; any offset is normalized to UTC.
    pub fn to_time(&self) -> Result<Option<DateTime<Utc>>> {
        match self {
            Value::Null => Ok(None),
            Value::Time(v) => Ok(Some(*v)),
            Value::Text(v) => parse_time(v),
            Value::Bytes(v) => parse_time(&String::from_utf8_lossy(v)),
            Value::Int(_) | Value::Float(_) => Err(BakeryError::InvalidArgument(
                "unsupported time format".to_string(),
            )),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

fn parse_int(raw: &str) -> Result<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| BakeryError::InvalidArgument(format!("invalid integer: {}", raw)))
}

fn parse_time(raw: &str) -> Result<Option<DateTime<Utc>>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(|e| BakeryError::InvalidArgument(format!("invalid timestamp {}: {}", raw, e)))
}

// =============================================================================
// Conversions
// =============================================================================

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Time(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
