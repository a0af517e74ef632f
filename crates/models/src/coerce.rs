//! Lenient integer coercion shared by JSON payloads and the CSV loader.
//!
//! Values arrive as JSON numbers, numeric strings, or spreadsheet-style
//! floats such as `652230.0`. Anything else is rejected.

use serde::{de::Error as _, Deserialize, Deserializer};

use crate::errors::ModelError;

/// Parse a text cell into an optional integer. Blank cells are null.
pub fn int_from_text(raw: &str) -> Result<Option<i32>, ModelError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if let Ok(v) = s.parse::<i32>() {
        return Ok(Some(v));
    }
    match s.parse::<f64>() {
        Ok(f) => int_from_float(f).map(Some),
        Err(_) => Err(ModelError::Coerce(format!("not an integer: {s:?}"))),
    }
}

fn int_from_float(f: f64) -> Result<i32, ModelError> {
    if f.fract() != 0.0 || f < i32::MIN as f64 || f > i32::MAX as f64 {
        return Err(ModelError::Coerce(format!("not an integer: {f}")));
    }
    Ok(f as i32)
}

fn int_from_i64(v: i64) -> Result<i32, ModelError> {
    i32::try_from(v).map_err(|_| ModelError::Coerce(format!("integer out of range: {v}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntLike {
    Int(i64),
    Float(f64),
    Text(String),
}

impl IntLike {
    fn into_int(self) -> Result<Option<i32>, ModelError> {
        match self {
            IntLike::Int(v) => int_from_i64(v).map(Some),
            IntLike::Float(f) => int_from_float(f).map(Some),
            IntLike::Text(s) => int_from_text(&s),
        }
    }
}

/// `deserialize_with` helper for nullable integer fields.
pub fn opt_int<'de, D>(d: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntLike>::deserialize(d)? {
        Some(v) => v.into_int().map_err(D::Error::custom),
        None => Ok(None),
    }
}

/// Distinguishes an absent key (outer `None`, via `#[serde(default)]`)
/// from an explicit `null` (`Some(None)`).
pub fn patch_int<'de, D>(d: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_int(d).map(Some)
}

/// Same as [`patch_int`] for any deserializable value.
pub fn patch<'de, T, D>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}
