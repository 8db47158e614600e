// ABOUTME: Array and Student constructors

use crate::value::Value;

pub fn array(args: Vec<Value>) -> Value {
    Value::array(args)
}

/// All three fields are optional and default to `Null`.
pub fn student(mut args: Vec<Value>) -> Value {
    args.resize(3, Value::Null);
    let mut args = args.into_iter();
    Value::student(args.next().unwrap(), args.next().unwrap(), args.next().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_defaults_missing_fields_to_null() {
        let v = student(vec![Value::String("Ada".into())]);
        match v {
            Value::Student(s) => {
                let s = s.borrow();
                assert_eq!(s.name, Value::String("Ada".into()));
                assert_eq!(s.surname, Value::Null);
                assert_eq!(s.age, Value::Null);
            }
            _ => panic!("expected a Student value"),
        }
    }
}
