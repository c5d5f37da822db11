//! Built-in scalar types.
//!
//! Every scalar coerces through three functions: `serialize` for resolver
//! output, `parse_value` for variable values and `parse_literal` for values
//! written inline in a document. Each one fails outside of its domain.

use chrono::{DateTime, SecondsFormat};

use crate::{
    ast::InputValue, schema::meta::ScalarMeta, types::coercion::CoercionError, value::Value,
};

/// Largest integer an `Int` represents, shared with JSON number consumers
/// (`2^53 - 1`).
pub const MAX_INT: i64 = 9_007_199_254_740_991;

/// Smallest integer an `Int` represents.
pub const MIN_INT: i64 = -MAX_INT;

/// All the built-in scalars, registered into every schema.
pub fn builtin_scalars() -> [ScalarMeta; 6] {
    [
        int(),
        float(),
        string(),
        boolean(),
        id(),
        date_time(),
    ]
}

/// The `Int` scalar.
pub fn int() -> ScalarMeta {
    ScalarMeta::new("Int")
        .description(
            "The `Int` scalar type represents non-fractional signed whole numeric values \
             between -(2^53) and 2^53 - 1.",
        )
        .serialize(coerce_int)
        .parse_value(coerce_int)
        .parse_literal(parse_int_literal)
}

/// The `Float` scalar.
pub fn float() -> ScalarMeta {
    ScalarMeta::new("Float")
        .description(
            "The `Float` scalar type represents signed double-precision fractional values.",
        )
        .serialize(coerce_float)
        .parse_value(coerce_float)
        .parse_literal(parse_float_literal)
}

/// The `String` scalar.
pub fn string() -> ScalarMeta {
    ScalarMeta::new("String")
        .description("The `String` scalar type represents textual data.")
        .serialize(serialize_string)
        .parse_value(parse_string_value)
        .parse_literal(parse_string_literal)
}

/// The `Boolean` scalar.
pub fn boolean() -> ScalarMeta {
    ScalarMeta::new("Boolean")
        .description("The `Boolean` scalar type represents `true` or `false`.")
        .serialize(coerce_bool)
        .parse_value(coerce_bool)
        .parse_literal(parse_bool_literal)
}

/// The `ID` scalar.
pub fn id() -> ScalarMeta {
    ScalarMeta::new("ID")
        .description(
            "The `ID` scalar type represents a unique identifier. \
             It accepts both string and integer input.",
        )
        .serialize(serialize_string)
        .parse_value(parse_id_value)
        .parse_literal(parse_id_literal)
}

/// The `DateTime` scalar, encoded as RFC 3339 text.
pub fn date_time() -> ScalarMeta {
    ScalarMeta::new("DateTime")
        .description("The `DateTime` scalar type represents a RFC 3339 timestamp.")
        .serialize(serialize_date_time)
        .parse_value(parse_date_time_value)
        .parse_literal(parse_date_time_literal)
}

fn int_in_range(i: i64) -> Result<Value, CoercionError> {
    if (MIN_INT..=MAX_INT).contains(&i) {
        Ok(Value::Int(i))
    } else {
        Err(CoercionError::new(format!(
            "Int cannot represent value out of range: {i}",
        )))
    }
}

fn float_to_int(f: f64) -> Result<Value, CoercionError> {
    if !f.is_finite() {
        return Err(CoercionError::new(format!(
            "Int cannot represent non-finite value: {f}",
        )));
    }
    let truncated = f.trunc();
    if truncated.abs() > MAX_INT as f64 {
        return Err(CoercionError::new(format!(
            "Int cannot represent value out of range: {f}",
        )));
    }
    Ok(Value::Int(truncated as i64))
}

fn coerce_int(v: &Value) -> Result<Value, CoercionError> {
    match v {
        Value::Boolean(b) => Ok(Value::Int((*b).into())),
        Value::Int(i) => int_in_range(*i),
        Value::Float(f) => float_to_int(*f),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| {
                CoercionError::new(format!("Int cannot represent non-integer value: {v}"))
            })
            .and_then(float_to_int),
        _ => Err(CoercionError::new(format!(
            "Int cannot represent non-integer value: {v}",
        ))),
    }
}

fn parse_int_literal(lit: &InputValue) -> Result<Value, CoercionError> {
    match lit {
        InputValue::Int(raw) => raw
            .parse::<i64>()
            .map_err(|_| {
                CoercionError::new(format!("Int cannot represent value out of range: {raw}"))
            })
            .and_then(int_in_range),
        _ => Err(CoercionError::new(format!(
            "Int cannot represent non-integer literal: {lit}",
        ))),
    }
}

fn finite_float(f: f64, v: &Value) -> Result<Value, CoercionError> {
    if f.is_finite() {
        Ok(Value::Float(f))
    } else {
        Err(CoercionError::new(format!(
            "Float cannot represent non-finite value: {v}",
        )))
    }
}

fn coerce_float(v: &Value) -> Result<Value, CoercionError> {
    match v {
        Value::Boolean(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Float(f) => finite_float(*f, v),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| {
                CoercionError::new(format!("Float cannot represent non-numeric value: {v}"))
            })
            .and_then(|f| finite_float(f, v)),
        _ => Err(CoercionError::new(format!(
            "Float cannot represent non-numeric value: {v}",
        ))),
    }
}

fn parse_float_literal(lit: &InputValue) -> Result<Value, CoercionError> {
    match lit {
        InputValue::Int(raw) | InputValue::Float(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
            .ok_or_else(|| {
                CoercionError::new(format!("Float cannot represent value out of range: {raw}"))
            }),
        _ => Err(CoercionError::new(format!(
            "Float cannot represent non-numeric literal: {lit}",
        ))),
    }
}

fn serialize_string(v: &Value) -> Result<Value, CoercionError> {
    Ok(match v {
        Value::Null => Value::Null,
        Value::String(s) => Value::String(s.clone()),
        Value::DateTime(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        other => Value::String(other.to_string()),
    })
}

fn parse_string_value(v: &Value) -> Result<Value, CoercionError> {
    match v {
        Value::String(s) => Ok(Value::String(s.clone())),
        _ => Err(CoercionError::new(format!(
            "String cannot represent a non string value: {v}",
        ))),
    }
}

fn parse_string_literal(lit: &InputValue) -> Result<Value, CoercionError> {
    match lit {
        InputValue::String(s) => Ok(Value::String(s.clone())),
        _ => Err(CoercionError::new(format!(
            "String cannot represent non-string literal: {lit}",
        ))),
    }
}

fn coerce_bool(v: &Value) -> Result<Value, CoercionError> {
    match v {
        Value::Boolean(b) => Ok(Value::Boolean(*b)),
        Value::Int(i) => Ok(Value::Boolean(*i != 0)),
        Value::Float(f) => Ok(Value::Boolean(*f != 0.0)),
        Value::String(s) => Ok(Value::Boolean(!(s.is_empty() || s == "false"))),
        _ => Err(CoercionError::new(format!(
            "Boolean cannot represent value: {v}",
        ))),
    }
}

fn parse_bool_literal(lit: &InputValue) -> Result<Value, CoercionError> {
    match lit {
        InputValue::Boolean(b) => Ok(Value::Boolean(*b)),
        _ => Err(CoercionError::new(format!(
            "Boolean cannot represent non-boolean literal: {lit}",
        ))),
    }
}

fn parse_id_value(v: &Value) -> Result<Value, CoercionError> {
    match v {
        Value::String(s) => Ok(Value::String(s.clone())),
        Value::Int(i) => Ok(Value::String(i.to_string())),
        _ => Err(CoercionError::new(format!("ID cannot represent value: {v}"))),
    }
}

fn parse_id_literal(lit: &InputValue) -> Result<Value, CoercionError> {
    match lit {
        InputValue::String(s) | InputValue::Int(s) => Ok(Value::String(s.clone())),
        _ => Err(CoercionError::new(format!(
            "ID cannot represent non-string and non-integer literal: {lit}",
        ))),
    }
}

fn serialize_date_time(v: &Value) -> Result<Value, CoercionError> {
    match v {
        Value::DateTime(dt) => Ok(Value::String(
            dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )),
        _ => Err(CoercionError::new(format!(
            "DateTime cannot represent value: {v}",
        ))),
    }
}

fn parse_date_time_str(s: &str) -> Result<Value, CoercionError> {
    DateTime::parse_from_rfc3339(s)
        .map(Value::DateTime)
        .map_err(|e| {
            CoercionError::new(format!(
                "DateTime cannot represent an invalid date-time string \"{s}\": {e}",
            ))
        })
}

fn parse_date_time_value(v: &Value) -> Result<Value, CoercionError> {
    match v {
        Value::String(s) => parse_date_time_str(s),
        Value::DateTime(dt) => Ok(Value::DateTime(*dt)),
        _ => Err(CoercionError::new(format!(
            "DateTime cannot represent value: {v}",
        ))),
    }
}

fn parse_date_time_literal(lit: &InputValue) -> Result<Value, CoercionError> {
    match lit {
        InputValue::String(s) => parse_date_time_str(s),
        _ => Err(CoercionError::new(format!(
            "DateTime cannot represent non-string literal: {lit}",
        ))),
    }
}
