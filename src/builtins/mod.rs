// ABOUTME: Dispatch table for the language's built-in top-level functions

pub mod array_methods;
pub mod casts;
pub mod constructors;
pub mod errors;
pub mod io;

use crate::error::{ErrorVariant, Thrown};
use crate::position::Position;
use crate::value::Value;

const NAMES: &[&str] = &[
    "print",
    "inputString",
    "inputInt",
    "inputFloat",
    "Array",
    "Student",
    "Int",
    "Float",
    "String",
    "Boolean",
    "Null",
    "Error",
    "ArgumentError",
    "TypeError",
    "ExpressionError",
    "VariableError",
    "RuntimeError",
    "PropertyError",
    "FunctionError",
    "StackOverflowError",
    "ValueError",
];

pub fn is_builtin_name(name: &str) -> bool {
    NAMES.contains(&name)
}

/// The maximum argument count each bounded-arity built-in accepts, mirroring
/// the original's `node.argc` check. `None` means unbounded (`print`, the
/// `Array` constructor, and the error constructors all take any number).
fn max_arity(name: &str) -> Option<usize> {
    match name {
        "inputString" | "inputInt" | "inputFloat" => Some(0),
        "Student" => Some(3),
        "Int" | "Float" | "String" | "Boolean" | "Null" => Some(1),
        _ => None,
    }
}

/// Calls the built-in `name` with the already-evaluated `args`. Returns
/// `None` if `name` doesn't name a built-in, so the interpreter can then
/// look for a user-defined function.
pub fn call(name: &str, args: Vec<Value>, position: Position) -> Option<Result<Value, Thrown>> {
    if let Some(variant) = errors::name_to_variant(name) {
        return Some(Ok(errors::construct(variant, args, position)));
    }

    if !NAMES.contains(&name) {
        return None;
    }

    if let Some(max) = max_arity(name) {
        if args.len() > max {
            return Some(Err(Thrown(Value::error(
                ErrorVariant::ArgumentError,
                format!("'{name}' takes at most {max} argument(s), got {}", args.len()),
                position,
                vec![],
            ))));
        }
    }

    let result = match name {
        "print" => {
            io::print(&args);
            Ok(Value::Null)
        }
        "inputString" => Ok(io::input_string()),
        "inputInt" => io::input_int(position),
        "inputFloat" => io::input_float(position),
        "Array" => Ok(constructors::array(args)),
        "Student" => Ok(constructors::student(args)),
        "Int" => casts::to_int(args.first().unwrap_or(&Value::Null), position),
        "Float" => casts::to_float(args.first().unwrap_or(&Value::Null), position),
        "String" => Ok(casts::to_string(args.first().unwrap_or(&Value::Null))),
        "Boolean" => Ok(casts::to_boolean(args.first().unwrap_or(&Value::Null))),
        "Null" => Ok(casts::to_null(args.first().unwrap_or(&Value::Null))),
        _ => unreachable!("NAMES and this match must agree"),
    };
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_returns_none() {
        assert!(call("notAFunction", vec![], Position::start()).is_none());
    }

    #[test]
    fn print_returns_null() {
        let result = call("print", vec![Value::Int(1)], Position::start()).unwrap();
        assert_eq!(result.unwrap(), Value::Null);
    }

    #[test]
    fn error_constructor_is_dispatched_by_name() {
        let result = call("TypeError", vec![Value::String("bad".into())], Position::start()).unwrap();
        match result.unwrap() {
            Value::Error(e) => assert_eq!(e.message, "bad"),
            _ => panic!("expected an Error value"),
        }
    }

    #[test]
    fn excess_arguments_to_a_bounded_builtin_are_an_argument_error() {
        let result = call("Int", vec![Value::Int(1), Value::Int(2)], Position::start()).unwrap();
        assert!(matches!(result, Err(Thrown(Value::Error(e))) if e.variant == ErrorVariant::ArgumentError));
    }

    #[test]
    fn student_accepts_exactly_three_arguments_and_rejects_a_fourth() {
        let result = call(
            "Student",
            vec![Value::Null, Value::Null, Value::Null, Value::Null],
            Position::start(),
        )
        .unwrap();
        assert!(matches!(result, Err(Thrown(Value::Error(e))) if e.variant == ErrorVariant::ArgumentError));
    }

    #[test]
    fn int_cast_failure_propagates_rather_than_returning_an_inert_error_value() {
        let result = call("Int", vec![Value::String("nope".into())], Position::start()).unwrap();
        assert!(matches!(result, Err(Thrown(Value::Error(e))) if e.variant == ErrorVariant::ValueError));
    }
}
