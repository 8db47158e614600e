// ABOUTME: Constructors for the ten built-in Error variants

use crate::error::ErrorVariant;
use crate::position::Position;
use crate::value::Value;

/// Builds an Error value of `variant`. The first argument becomes the
/// message (stringified if it wasn't already a string); any further
/// arguments are collected into the error's `args` array. The throw site
/// position is supplied by the interpreter, not the script.
pub fn construct(variant: ErrorVariant, args: Vec<Value>, position: Position) -> Value {
    let mut args = args.into_iter();
    let message = match args.next() {
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let extra: Vec<Value> = args.collect();
    Value::error(variant, message, position, extra)
}

pub fn name_to_variant(name: &str) -> Option<ErrorVariant> {
    ErrorVariant::from_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_argument_becomes_the_message() {
        let v = construct(ErrorVariant::ValueError, vec![Value::String("bad".into())], Position::start());
        match v {
            Value::Error(e) => assert_eq!(e.message, "bad"),
            _ => panic!("expected an Error value"),
        }
    }

    #[test]
    fn remaining_arguments_become_the_args_array() {
        let v = construct(
            ErrorVariant::ArgumentError,
            vec![Value::String("bad".into()), Value::Int(1), Value::Int(2)],
            Position::start(),
        );
        match v {
            Value::Error(e) => assert_eq!(e.args, vec![Value::Int(1), Value::Int(2)]),
            _ => panic!("expected an Error value"),
        }
    }

    #[test]
    fn missing_message_defaults_to_empty_string() {
        let v = construct(ErrorVariant::RuntimeError, vec![], Position::start());
        match v {
            Value::Error(e) => assert_eq!(e.message, ""),
            _ => panic!("expected an Error value"),
        }
    }
}
