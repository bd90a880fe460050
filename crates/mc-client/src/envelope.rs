//! Tolerant envelope parsing.
//!
//! Every collection and single-resource response goes through these parsers.
//! They never fail: malformed or unexpected payloads degrade to an empty
//! page, missing pagination, or `None`.

use mc_model::PaginationMeta;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Result of parsing a collection envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPage<T> {
    pub data: Vec<T>,
    pub pagination: Option<PaginationMeta>,
}

impl<T> Default for ParsedPage<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: None,
        }
    }
}

/// Extract `{ data: [...], pagination: {...} }` from an arbitrary JSON value.
///
/// Array elements that do not decode into `T` are skipped. `pagination` is
/// `None` unless all three fields coerce to finite, non-negative integers.
pub fn parse_paginated<T: DeserializeOwned>(value: &Value) -> ParsedPage<T> {
    let Some(object) = value.as_object() else {
        return ParsedPage::default();
    };

    let data = object
        .get("data")
        .and_then(Value::as_array)
        .map(|items| decode_items(items))
        .unwrap_or_default();

    let pagination = object
        .get("pagination")
        .and_then(Value::as_object)
        .and_then(|meta| {
            Some(PaginationMeta {
                page: to_unsigned(meta.get("page"))?.try_into().ok()?,
                per_page: to_unsigned(meta.get("per_page"))?.try_into().ok()?,
                total: to_unsigned(meta.get("total"))?,
            })
        });

    ParsedPage { data, pagination }
}

/// Extract `{ data: T }`, returning `None` when the key is absent or does not
/// decode into `T`.
pub fn parse_single<T: DeserializeOwned>(value: &Value) -> Option<T> {
    let data = value.as_object()?.get("data")?;
    match T::deserialize(data) {
        Ok(item) => Some(item),
        Err(err) => {
            tracing::warn!(error = %err, "single-resource payload did not match expected shape");
            None
        }
    }
}

fn decode_items<T: DeserializeOwned>(items: &[Value]) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed collection item");
                None
            }
        })
        .collect()
}

/// Numeric coercion with the same rules as JavaScript's `Number()` for
/// scalars. Missing fields, arrays and objects are not numbers.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // checked integral and in range
fn to_unsigned(value: Option<&Value>) -> Option<u64> {
    let number = coerce_number(value)?;
    #[allow(clippy::cast_precision_loss)]
    let in_range = number >= 0.0 && number <= u64::MAX as f64 && number.fract() == 0.0;
    in_range.then_some(number as u64)
}
