// ABOUTME: Methods callable on an Array value through property access (arr.add(x), ...)

use crate::error::{ErrorVariant, Thrown};
use crate::position::Position;
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Dispatches `method` on `items`. Returns `None` if `method` isn't a
/// recognized Array method, so the caller can fall through to a
/// `PropertyError` for an unknown member.
pub fn call(
    items: &Rc<RefCell<Vec<Value>>>,
    method: &str,
    args: Vec<Value>,
    position: Position,
) -> Option<Result<Value, Thrown>> {
    let result = match method {
        "add" => {
            items.borrow_mut().extend(args);
            Ok(Value::Null)
        }
        "remove" => {
            let target = args.into_iter().next().unwrap_or(Value::Null);
            let mut items = items.borrow_mut();
            if let Some(idx) = items.iter().position(|v| *v == target) {
                items.remove(idx);
            }
            Ok(Value::Null)
        }
        "removeAt" => {
            let index = match index_arg(&args, position) {
                Ok(i) => i,
                Err(e) => return Some(Err(e)),
            };
            let mut items = items.borrow_mut();
            if index >= items.len() {
                Err(out_of_range(index, items.len(), position))
            } else {
                Ok(items.remove(index))
            }
        }
        "clear" => {
            items.borrow_mut().clear();
            Ok(Value::Null)
        }
        "get" => {
            let index = match index_arg(&args, position) {
                Ok(i) => i,
                Err(e) => return Some(Err(e)),
            };
            let items = items.borrow();
            if index >= items.len() {
                Err(out_of_range(index, items.len(), position))
            } else {
                Ok(items[index].clone())
            }
        }
        "set" => {
            let index = match index_arg(&args, position) {
                Ok(i) => i,
                Err(e) => return Some(Err(e)),
            };
            let value = args.into_iter().nth(1).unwrap_or(Value::Null);
            let mut items = items.borrow_mut();
            if index >= items.len() {
                Err(out_of_range(index, items.len(), position))
            } else {
                items[index] = value;
                Ok(Value::Null)
            }
        }
        "size" => Ok(Value::Int(items.borrow().len() as i64)),
        "contains" => {
            let target = args.into_iter().next().unwrap_or(Value::Null);
            Ok(Value::Bool(items.borrow().iter().any(|v| *v == target)))
        }
        "indexOf" => {
            let target = args.into_iter().next().unwrap_or(Value::Null);
            let idx = items.borrow().iter().position(|v| *v == target);
            Ok(Value::Int(idx.map(|i| i as i64).unwrap_or(-1)))
        }
        _ => return None,
    };
    Some(result)
}

fn index_arg(args: &[Value], position: Position) -> Result<usize, Thrown> {
    match args.first() {
        Some(Value::Int(n)) if *n >= 0 => Ok(*n as usize),
        _ => Err(Thrown(Value::error(
            ErrorVariant::PropertyError,
            "expected a non-negative Int index".to_string(),
            position,
            vec![],
        ))),
    }
}

fn out_of_range(index: usize, len: usize, position: Position) -> Thrown {
    Thrown(Value::error(
        ErrorVariant::PropertyError,
        format!("index {index} out of range for an array of length {len}"),
        position,
        vec![],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr(items: Vec<Value>) -> Rc<RefCell<Vec<Value>>> {
        Rc::new(RefCell::new(items))
    }

    #[test]
    fn add_appends_all_arguments() {
        let a = arr(vec![Value::Int(1)]);
        call(&a, "add", vec![Value::Int(2), Value::Int(3)], Position::start());
        assert_eq!(*a.borrow(), vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn get_out_of_range_is_a_property_error() {
        let a = arr(vec![Value::Int(1)]);
        let result = call(&a, "get", vec![Value::Int(5)], Position::start()).unwrap();
        assert!(matches!(result, Err(Thrown(Value::Error(e))) if e.variant == ErrorVariant::PropertyError));
    }

    #[test]
    fn index_of_missing_value_is_negative_one() {
        let a = arr(vec![Value::Int(1)]);
        let result = call(&a, "indexOf", vec![Value::Int(9)], Position::start()).unwrap();
        assert_eq!(result.unwrap(), Value::Int(-1));
    }

    #[test]
    fn unknown_method_returns_none() {
        let a = arr(vec![]);
        assert!(call(&a, "bogus", vec![], Position::start()).is_none());
    }
}
