// ABOUTME: print and the blocking inputString/inputInt/inputFloat readers

use crate::error::{ErrorVariant, Thrown};
use crate::position::Position;
use crate::value::Value;
use std::io::{self, Write};

/// Writes every argument's display form back to back, with no separator
/// and no trailing newline.
pub fn print(args: &[Value]) {
    let mut out = io::stdout();
    for arg in args {
        let _ = write!(out, "{arg}");
    }
    let _ = out.flush();
}

pub fn input_string() -> Value {
    Value::String(read_line())
}

pub fn input_int(position: Position) -> Result<Value, Thrown> {
    let line = read_line();
    line.trim().parse::<i64>().map(Value::Int).map_err(|_| {
        Thrown(Value::error(
            ErrorVariant::ValueError,
            format!("'{}' is not a valid integer", line.trim()),
            position,
            vec![],
        ))
    })
}

pub fn input_float(position: Position) -> Result<Value, Thrown> {
    let line = read_line();
    line.trim().parse::<f64>().map(Value::Float).map_err(|_| {
        Thrown(Value::error(
            ErrorVariant::ValueError,
            format!("'{}' is not a valid float", line.trim()),
            position,
            vec![],
        ))
    })
}

fn read_line() -> String {
    let mut buf = String::new();
    let _ = io::stdin().read_line(&mut buf);
    while buf.ends_with('\n') || buf.ends_with('\r') {
        buf.pop();
    }
    buf
}
