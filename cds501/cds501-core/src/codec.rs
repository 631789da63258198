//! Per-field conversion between raw delimited text and [`Value`].

use rust_decimal::Decimal;

use crate::{
    error::ValueError,
    schema::{FieldDef, PrimitiveType},
    value::Value,
};

/// Decode one raw field against its definition.
///
/// Surrounding whitespace is ignored. An empty value decodes to
/// [`Value::Null`] for nullable fields and fails with [`ValueError::Missing`]
/// otherwise.
pub fn decode_value(raw: &str, field: &FieldDef) -> Result<Value, ValueError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return if field.nullable {
            Ok(Value::Null)
        } else {
            Err(ValueError::Missing)
        };
    }

    match field.primitive {
        PrimitiveType::Integer => decode_integer(raw),
        PrimitiveType::SignedDecimal { precision, scale } => {
            decode_signed_decimal(raw, precision, scale)
        }
        PrimitiveType::FixedWidthText => Ok(Value::text(raw)),
        PrimitiveType::BooleanFlag => decode_flag(raw),
    }
}

/// Encode a value in the extract's canonical text form.
///
/// Decimals are rendered with their sign slot and the integer part padded to
/// `precision - scale` digits, so `-46.00` as `decimal(5,2)` becomes `-046.00`.
pub fn encode_value(value: &Value, field: &FieldDef) -> String {
    match (value, field.primitive) {
        (Value::Null, _) => String::new(),
        (Value::Bool(v), _) => (if *v { "1" } else { "0" }).to_string(),
        (Value::Int(v), _) => v.to_string(),
        (Value::Decimal(v), PrimitiveType::SignedDecimal { precision, scale }) => {
            encode_signed_decimal(*v, precision, scale)
        }
        (Value::Decimal(v), _) => v.to_string(),
        (Value::Text(v), _) => v.to_string(),
    }
}

fn decode_integer(raw: &str) -> Result<Value, ValueError> {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::InvalidInteger);
    }
    raw.parse::<i64>()
        .map(Value::Int)
        .map_err(|_| ValueError::IntegerOverflow)
}

fn decode_flag(raw: &str) -> Result<Value, ValueError> {
    match raw {
        "1" => Ok(Value::Bool(true)),
        "0" => Ok(Value::Bool(false)),
        _ => Err(ValueError::InvalidFlag),
    }
}

fn decode_signed_decimal(raw: &str, precision: u8, scale: u8) -> Result<Value, ValueError> {
    let invalid = ValueError::InvalidDecimal { precision, scale };

    let mut chars = raw.chars();
    let negative = match chars.next() {
        Some('-') => true,
        Some('0' | '+') => false,
        Some(found) => return Err(ValueError::MissingSign { found }),
        None => return Err(ValueError::Missing),
    };
    let body = chars.as_str();

    let (whole, fraction) = match (body.split_once('.'), scale) {
        (Some(_), 0) => return Err(invalid),
        (Some(parts), _) => parts,
        (None, 0) => (body, ""),
        (None, _) => return Err(invalid),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid);
    }
    if fraction.len() > usize::from(scale) {
        return Err(invalid);
    }
    let significant = whole.trim_start_matches('0');
    if significant.len() > usize::from(precision.saturating_sub(scale)) {
        return Err(invalid);
    }

    let mut mantissa_digits = String::with_capacity(significant.len() + usize::from(scale) + 1);
    mantissa_digits.push('0');
    mantissa_digits.push_str(significant);
    mantissa_digits.push_str(fraction);
    for _ in fraction.len()..usize::from(scale) {
        mantissa_digits.push('0');
    }

    let mantissa: i128 = mantissa_digits.parse().map_err(|_| invalid.clone())?;
    let mantissa = if negative { -mantissa } else { mantissa };
    Decimal::try_from_i128_with_scale(mantissa, u32::from(scale))
        .map(Value::Decimal)
        .map_err(|_| invalid)
}

fn encode_signed_decimal(value: Decimal, precision: u8, scale: u8) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        '-'
    } else {
        '0'
    };
    let magnitude = value.abs().round_dp(u32::from(scale));
    let text = format!("{magnitude:.prec$}", prec = usize::from(scale));
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let width = usize::from(precision.saturating_sub(scale));

    let mut out = String::with_capacity(usize::from(precision) + 2);
    out.push(sign);
    out.push_str(&format!("{whole:0>width$}"));
    if scale > 0 {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
