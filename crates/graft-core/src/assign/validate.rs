use crate::schema::{Property, ScalarType};
use crate::value::Value;
use crate::{Error, Result};

/// Coerces `value` to the property's declared scalar type.
///
/// Loosely-typed payloads routinely carry numbers as strings and vice
/// versa; lossless coercions are accepted, anything else fails validation
/// naming the entity type, property, and value. Nullability is the
/// caller's check.
pub(super) fn validate_scalar(entity: &str, prop: &Property, value: Value) -> Result<Value> {
    let Some(ty) = prop.scalar_ty else {
        return Ok(value);
    };

    if value.is_null() {
        return Ok(value);
    }

    let original = value.clone();
    let coerced = match (ty, value) {
        (ScalarType::Bool, value @ Value::Bool(_)) => Some(value),
        (ScalarType::Int, value @ Value::I64(_)) => Some(value),
        (ScalarType::Int, Value::String(raw)) => raw.parse::<i64>().ok().map(Value::I64),
        (ScalarType::Int, Value::F64(raw)) if raw.fract() == 0.0 => Some(Value::I64(raw as i64)),
        (ScalarType::Float, value @ Value::F64(_)) => Some(value),
        (ScalarType::Float, Value::I64(raw)) => Some(Value::F64(raw as f64)),
        (ScalarType::Float, Value::String(raw)) => raw.parse::<f64>().ok().map(Value::F64),
        (ScalarType::String, value @ Value::String(_)) => Some(value),
        (ScalarType::String, Value::I64(raw)) => Some(Value::String(raw.to_string())),
        (ScalarType::String, Value::F64(raw)) => Some(Value::String(raw.to_string())),
        _ => None,
    };

    coerced.ok_or_else(|| Error::invalid_scalar(entity, &prop.name, ty.name(), original))
}
