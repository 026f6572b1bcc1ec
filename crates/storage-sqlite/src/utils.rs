//! Conversion helpers shared by the repositories.
//!
//! Decimals are stored as TEXT to keep full precision; enums as their wire
//! names. Reads are tolerant: a malformed value is logged and replaced by a
//! neutral default rather than failing the whole query.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Maximum number of bound parameters used for one `IN (...)` clause,
/// safely under SQLite's SQLITE_MAX_VARIABLE_NUMBER.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits `items` into slices small enough for a single `IN (...)` query.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Parses a stored decimal, falling back to an f64 parse and finally zero.
pub fn parse_decimal_tolerant(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value).ok().and_then(Decimal::from_f64) {
            Some(d) => d,
            None => {
                log::error!(
                    "Failed to parse {} '{}' as Decimal ({}). Falling back to ZERO.",
                    field_name,
                    value,
                    e_decimal
                );
                Decimal::ZERO
            }
        },
    }
}

pub fn parse_optional_decimal(value: Option<&str>, field_name: &str) -> Option<Decimal> {
    value.map(|v| parse_decimal_tolerant(v, field_name))
}

/// Parses an enum column, logging and using `fallback` for unknown values.
pub fn parse_enum_or<T: FromStr>(value: &str, field_name: &str, fallback: T) -> T {
    value.parse().unwrap_or_else(|_| {
        log::warn!(
            "Unknown {} '{}' in database, using fallback",
            field_name,
            value
        );
        fallback
    })
}

/// Parses a JSON object column. Anything that is not an object becomes empty.
pub fn parse_json_object(value: &str, field_name: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(value) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            log::warn!("{} is not a JSON object, ignoring it", field_name);
            Map::new()
        }
    }
}

/// Sector -> percentage map stored as a JSON object of decimal strings.
pub fn encode_allocation(allocation: &BTreeMap<String, Decimal>) -> serde_json::Result<String> {
    let as_text: BTreeMap<&String, String> = allocation
        .iter()
        .map(|(sector, pct)| (sector, pct.to_string()))
        .collect();
    serde_json::to_string(&as_text)
}

pub fn decode_allocation(value: &str) -> BTreeMap<String, Decimal> {
    parse_json_object(value, "target_allocation")
        .into_iter()
        .filter_map(|(sector, pct)| {
            let parsed = match &pct {
                Value::String(s) => Some(parse_decimal_tolerant(s, "target_allocation")),
                Value::Number(n) => n.as_f64().and_then(Decimal::from_f64),
                _ => None,
            };
            parsed.map(|p| (sector, p))
        })
        .collect()
}
