// ABOUTME: Runtime value types for the scripting language

use crate::error::ErrorVariant;
use crate::position::Position;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub name: Value,
    pub surname: Value,
    pub age: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    pub variant: ErrorVariant,
    pub message: String,
    pub position: Position,
    pub args: Vec<Value>,
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {} ", self.variant.name(), self.message)?;
        if !self.args.is_empty() {
            let rendered: Vec<String> = self.args.iter().map(|v| v.to_string()).collect();
            write!(f, "{} ", rendered.join(", "))?;
        }
        write!(f, "at {}", self.position)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
    Array(Rc<RefCell<Vec<Value>>>),
    Student(Rc<RefCell<Student>>),
    Error(Rc<ErrorValue>),
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn student(name: Value, surname: Value, age: Value) -> Self {
        Value::Student(Rc::new(RefCell::new(Student { name, surname, age })))
    }

    pub fn error(variant: ErrorVariant, message: String, position: Position, args: Vec<Value>) -> Self {
        Value::Error(Rc::new(ErrorValue {
            variant,
            message,
            position,
            args,
        }))
    }

    pub fn type_tag(&self) -> &str {
        match self {
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bool(_) => "Boolean",
            Value::Null => "Null",
            Value::Array(_) => "Array",
            Value::Student(_) => "Student",
            Value::Error(e) => e.variant.name(),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null => false,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.borrow().is_empty(),
            Value::Student(_) | Value::Error(_) => true,
        }
    }

    /// Independent copy: composites get a fresh `Rc<RefCell<_>>`, so mutating
    /// the clone never mutates the original. Used when binding a function
    /// argument that was not passed by `@`-reference.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Array(items) => Value::Array(Rc::new(RefCell::new(
                items.borrow().iter().map(Value::deep_clone).collect(),
            ))),
            Value::Student(s) => {
                let s = s.borrow();
                Value::student(s.name.deep_clone(), s.surname.deep_clone(), s.age.deep_clone())
            }
            other => other.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Null => write!(f, "null"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Student(s) => {
                let s = s.borrow();
                write!(f, "Student({}, {}, {})", s.name, s.surname, s.age)
            }
            Value::Error(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_and_float_display_plainly() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(3.0).to_string(), "3");
    }

    #[test]
    fn array_display_is_bracketed_and_comma_joined() {
        let arr = Value::array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(arr.to_string(), "[1, 2, 3]");
    }

    #[test]
    fn deep_clone_of_array_does_not_alias() {
        let original = Value::array(vec![Value::Int(1)]);
        let cloned = original.deep_clone();
        if let (Value::Array(a), Value::Array(b)) = (&original, &cloned) {
            b.borrow_mut().push(Value::Int(2));
            assert_eq!(a.borrow().len(), 1);
            assert_eq!(b.borrow().len(), 2);
        } else {
            panic!("expected arrays");
        }
    }

    #[test]
    fn plain_clone_of_array_aliases() {
        let original = Value::array(vec![Value::Int(1)]);
        let shared = original.clone();
        if let (Value::Array(a), Value::Array(b)) = (&original, &shared) {
            b.borrow_mut().push(Value::Int(2));
            assert_eq!(a.borrow().len(), 2);
        } else {
            panic!("expected arrays");
        }
    }

    #[test]
    fn truthiness_matches_common_dynamic_language_rules() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::Int(1).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
    }

    #[test]
    fn error_display_matches_bracketed_format() {
        let e = Value::error(
            ErrorVariant::ValueError,
            "division by zero".to_string(),
            Position::new(4, 2),
            vec![],
        );
        assert_eq!(e.to_string(), "[ValueError]: division by zero at line 4 column 2");
    }
}
