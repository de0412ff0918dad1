//! Default value coercion
//!
//! The walk-through asks a [`DefaultCoercion`] whether a literal `DEFAULT`
//! fits the declared column type. The error text is surfaced unchanged as an
//! `InvalidColumnDefault` violation.

use chrono::{NaiveDate, NaiveDateTime};
use sqlreview_types::mysql::{SqlType, TypeFamily};

use crate::statements::DefaultValue;

/// Decides whether a default literal converts to a column type
pub trait DefaultCoercion {
    fn coerce(&self, value: &DefaultValue, ty: &SqlType) -> Result<(), String>;
}

/// Accepts everything; useful when replaying against an unknown type system
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCoercion;

impl DefaultCoercion for NoCoercion {
    fn coerce(&self, _value: &DefaultValue, _ty: &SqlType) -> Result<(), String> {
        Ok(())
    }
}

/// MySQL strict-mode conversion rules for literal defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlCoercion;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y%m%d%H%M%S",
];

impl DefaultCoercion for MySqlCoercion {
    fn coerce(&self, value: &DefaultValue, ty: &SqlType) -> Result<(), String> {
        let literal = match value {
            DefaultValue::String(s) | DefaultValue::Number(s) => s.as_str(),
            DefaultValue::Null | DefaultValue::Expression(_) => return Ok(()),
        };

        match ty.family() {
            TypeFamily::Integer => coerce_integer(literal, ty),
            TypeFamily::Decimal => coerce_decimal(literal, ty),
            TypeFamily::Float => parse_number(literal, ty).map(|_| ()),
            TypeFamily::Bit => coerce_bit(value, ty),
            TypeFamily::Date => parse_date(literal)
                .map(|_| ())
                .ok_or_else(|| incorrect("date", literal)),
            TypeFamily::DateTime => parse_datetime(literal)
                .map(|_| ())
                .ok_or_else(|| incorrect("datetime", literal)),
            TypeFamily::Timestamp => coerce_timestamp(literal),
            TypeFamily::Time => coerce_time(literal),
            TypeFamily::Year => coerce_year(literal),
            TypeFamily::Char => check_length(literal, literal.chars().count(), ty),
            TypeFamily::Binary => check_length(literal, literal.len(), ty),
            TypeFamily::Enum => coerce_enum(value, ty),
            TypeFamily::Set => coerce_set(value, ty),
            TypeFamily::Text
            | TypeFamily::Blob
            | TypeFamily::Json
            | TypeFamily::Spatial
            | TypeFamily::Other => Ok(()),
        }
    }
}

fn incorrect(kind: &str, literal: &str) -> String {
    format!("Incorrect {kind} value: '{literal}'")
}

fn out_of_range(literal: &str, ty: &SqlType) -> String {
    format!("Out of range value '{literal}' for type {ty}")
}

fn parse_number(literal: &str, ty: &SqlType) -> Result<f64, String> {
    let n: f64 = literal
        .trim()
        .parse()
        .map_err(|_| incorrect(ty.name(), literal))?;
    if n.is_finite() {
        Ok(n)
    } else {
        Err(out_of_range(literal, ty))
    }
}

fn coerce_integer(literal: &str, ty: &SqlType) -> Result<(), String> {
    let trimmed = literal.trim();
    let value = match trimmed.parse::<i128>() {
        Ok(v) => v,
        // MySQL rounds fractional literals for integer columns
        Err(_) => parse_number(trimmed, ty)?.round() as i128,
    };
    match ty.integer_range() {
        Some((min, max)) if value < min || value > max => Err(out_of_range(literal, ty)),
        _ => Ok(()),
    }
}

fn coerce_decimal(literal: &str, ty: &SqlType) -> Result<(), String> {
    parse_number(literal, ty)?;
    let precision = ty.length().unwrap_or(10);
    let scale = ty.scale().unwrap_or(0);
    let digits = literal
        .trim()
        .trim_start_matches(['-', '+'])
        .split('.')
        .next()
        .unwrap_or("")
        .trim_start_matches('0')
        .len();
    if digits as u32 > precision.saturating_sub(scale) {
        return Err(out_of_range(literal, ty));
    }
    Ok(())
}

fn coerce_bit(value: &DefaultValue, ty: &SqlType) -> Result<(), String> {
    let width = ty.length().unwrap_or(1).min(64);
    let fits = match value {
        DefaultValue::Number(n) => n
            .trim()
            .parse::<u64>()
            .is_ok_and(|v| width == 64 || v < (1u64 << width)),
        DefaultValue::String(s) => s.len() as u32 * 8 <= width.div_ceil(8) * 8,
        _ => true,
    };
    if fits {
        Ok(())
    } else {
        Err(format!("Data too long for type {ty}"))
    }
}

fn parse_date(literal: &str) -> Option<NaiveDate> {
    let literal = literal.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(literal, fmt).ok())
}

fn parse_datetime(literal: &str) -> Option<NaiveDateTime> {
    let literal = literal.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(literal, fmt).ok())
        .or_else(|| parse_date(literal).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

fn coerce_timestamp(literal: &str) -> Result<(), String> {
    let value = parse_datetime(literal).ok_or_else(|| incorrect("timestamp", literal))?;
    let min = NaiveDate::from_ymd_opt(1970, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 1));
    let max = NaiveDate::from_ymd_opt(2038, 1, 19).and_then(|d| d.and_hms_opt(3, 14, 7));
    match (min, max) {
        (Some(min), Some(max)) if value >= min && value <= max => Ok(()),
        _ => Err(incorrect("timestamp", literal)),
    }
}

/// TIME spans -838:59:59 to 838:59:59, so chrono's NaiveTime does not cover it
fn coerce_time(literal: &str) -> Result<(), String> {
    let text = literal.trim();
    let text = text.strip_prefix('-').unwrap_or(text);
    let (clock, fraction) = text.split_once('.').unwrap_or((text, ""));
    let parts: Vec<&str> = clock.split(':').collect();
    let numbers: Option<Vec<u32>> = parts.iter().map(|p| p.parse().ok()).collect();
    let valid = fraction.chars().all(|c| c.is_ascii_digit())
        && match numbers.as_deref() {
            Some([h, m, s]) => *h <= 838 && *m < 60 && *s < 60,
            Some([h, m]) => *h <= 838 && *m < 60,
            Some([compact]) => {
                let (h, m, s) = (compact / 10_000, compact / 100 % 100, compact % 100);
                h <= 838 && m < 60 && s < 60
            }
            _ => false,
        };
    if valid {
        Ok(())
    } else {
        Err(incorrect("time", literal))
    }
}

fn coerce_year(literal: &str) -> Result<(), String> {
    match literal.trim().parse::<u32>() {
        Ok(0 | 1..=99 | 1901..=2155) => Ok(()),
        Ok(_) => Err(format!("Out of range value '{literal}' for type year")),
        Err(_) => Err(incorrect("year", literal)),
    }
}

fn check_length(literal: &str, len: usize, ty: &SqlType) -> Result<(), String> {
    let max = ty.length().unwrap_or(1) as usize;
    if len > max {
        return Err(format!("Data too long for type {ty}: '{literal}'"));
    }
    Ok(())
}

fn coerce_enum(value: &DefaultValue, ty: &SqlType) -> Result<(), String> {
    let members = ty.values();
    let ok = match value {
        DefaultValue::Number(n) => n
            .trim()
            .parse::<usize>()
            .is_ok_and(|i| (1..=members.len()).contains(&i)),
        DefaultValue::String(s) => members.iter().any(|m| m.eq_ignore_ascii_case(s)),
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(format!("Value '{}' is not a member of {ty}", literal_of(value)))
    }
}

fn coerce_set(value: &DefaultValue, ty: &SqlType) -> Result<(), String> {
    let members = ty.values();
    let ok = match value {
        DefaultValue::Number(n) => n
            .trim()
            .parse::<u64>()
            .is_ok_and(|mask| members.len() >= 64 || mask < (1u64 << members.len())),
        DefaultValue::String(s) => s
            .split(',')
            .filter(|part| !part.is_empty())
            .all(|part| members.iter().any(|m| m.eq_ignore_ascii_case(part))),
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(format!("Value '{}' is not a member of {ty}", literal_of(value)))
    }
}

fn literal_of(value: &DefaultValue) -> &str {
    match value {
        DefaultValue::String(s) | DefaultValue::Number(s) | DefaultValue::Expression(s) => s,
        DefaultValue::Null => "NULL",
    }
}
