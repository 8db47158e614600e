// ABOUTME: Int/Float/String/Boolean/Null type-cast functions

use crate::error::{ErrorVariant, Thrown};
use crate::position::Position;
use crate::value::Value;

pub fn to_int(value: &Value, position: Position) -> Result<Value, Thrown> {
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(n) => Ok(Value::Int(*n as i64)),
        Value::Bool(b) => Ok(Value::Int(if *b { 1 } else { 0 })),
        Value::Null => Ok(Value::Int(0)),
        Value::String(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            value_error(format!("'{s}' cannot be cast to Int"), position)
        }),
        other => Err(type_error(other, "Int", position)),
    }
}

pub fn to_float(value: &Value, position: Position) -> Result<Value, Thrown> {
    match value {
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Float(n) => Ok(Value::Float(*n)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Null => Ok(Value::Float(0.0)),
        Value::String(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| {
            value_error(format!("'{s}' cannot be cast to Float"), position)
        }),
        other => Err(type_error(other, "Float", position)),
    }
}

pub fn to_string(value: &Value) -> Value {
    Value::String(value.to_string())
}

pub fn to_boolean(value: &Value) -> Value {
    Value::Bool(value.is_truthy())
}

pub fn to_null(_value: &Value) -> Value {
    Value::Null
}

fn value_error(message: String, position: Position) -> Thrown {
    Thrown(Value::error(ErrorVariant::ValueError, message, position, vec![]))
}

fn type_error(value: &Value, target: &str, position: Position) -> Thrown {
    Thrown(Value::error(
        ErrorVariant::TypeError,
        format!("cannot cast a {} to {target}", value.type_tag()),
        position,
        vec![],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_truncates_towards_zero_for_int() {
        assert_eq!(to_int(&Value::Float(3.9), Position::start()).unwrap(), Value::Int(3));
        assert_eq!(to_int(&Value::Float(-3.9), Position::start()).unwrap(), Value::Int(-3));
    }

    #[test]
    fn string_parse_failure_propagates_as_a_value_error() {
        let err = to_int(&Value::String("nope".into()), Position::start()).unwrap_err();
        assert!(matches!(err, Thrown(Value::Error(e)) if e.variant == ErrorVariant::ValueError));
    }

    #[test]
    fn array_to_int_propagates_as_a_type_error() {
        let err = to_int(&Value::array(vec![]), Position::start()).unwrap_err();
        assert!(matches!(err, Thrown(Value::Error(e)) if e.variant == ErrorVariant::TypeError));
    }

    #[test]
    fn float_parse_failure_propagates_as_a_value_error() {
        let err = to_float(&Value::String("nope".into()), Position::start()).unwrap_err();
        assert!(matches!(err, Thrown(Value::Error(e)) if e.variant == ErrorVariant::ValueError));
    }

    #[test]
    fn to_string_uses_display() {
        assert_eq!(to_string(&Value::Int(5)), Value::String("5".into()));
    }
}
