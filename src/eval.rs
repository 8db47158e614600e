// ABOUTME: Tree-walking evaluator that executes a parsed Program

use crate::ast::{Argument, AssignOp, BinOp, Block, CatchClause, ElifClause, Expr, Program, Stmt};
use crate::builtins;
use crate::config::MAX_CALL_STACK_SIZE;
use crate::env::FunctionScope;
use crate::error::{ErrorVariant, Thrown};
use crate::position::Position;
use crate::value::Value;

/// What a statement or block handed control back with.
#[derive(Debug, Clone)]
enum Signal {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// Runs `program`'s `main` with no arguments. The error returned is whatever
/// escaped unhandled -- the caller is responsible for reporting it.
pub fn run(program: &Program) -> Result<(), Thrown> {
    if !program.functions.contains_key("main") {
        return Err(Thrown(Value::error(
            ErrorVariant::RuntimeError,
            "Program does not contain a main function".to_string(),
            Position::start(),
            vec![],
        )));
    }
    let mut interpreter = Interpreter::new(program);
    interpreter.call_user_function("main", Vec::new(), Vec::new(), Position::start())?;
    Ok(())
}

struct Interpreter<'p> {
    program: &'p Program,
    scope: FunctionScope,
    call_depth: usize,
    loop_depth: usize,
}

impl<'p> Interpreter<'p> {
    fn new(program: &'p Program) -> Self {
        Interpreter {
            program,
            scope: FunctionScope::new(),
            call_depth: 0,
            loop_depth: 0,
        }
    }

    fn execute_block(&mut self, block: &Block) -> Result<Signal, Thrown> {
        self.scope.push_block();
        let result = self.execute_statements(&block.statements);
        self.scope.pop_block();
        result
    }

    fn execute_statements(&mut self, statements: &[Stmt]) -> Result<Signal, Thrown> {
        for stmt in statements {
            match self.execute_stmt(stmt)? {
                Signal::Normal => continue,
                other => return Ok(other),
            }
        }
        Ok(Signal::Normal)
    }

    fn execute_stmt(&mut self, stmt: &Stmt) -> Result<Signal, Thrown> {
        match stmt {
            Stmt::Expr(expr) => {
                self.evaluate_expr(expr)?;
                Ok(Signal::Normal)
            }
            Stmt::Assign { target, op, value, position } => {
                self.execute_assign(target, *op, value, *position)?;
                Ok(Signal::Normal)
            }
            Stmt::If { condition, block, elifs, else_block, .. } => {
                self.execute_if(condition, block, elifs, else_block)
            }
            Stmt::While { condition, block, .. } => self.execute_while(condition, block),
            Stmt::For { variable, iterable, block, position } => {
                self.execute_for(variable, iterable, block, *position)
            }
            Stmt::Return { value, .. } => {
                let result = match value {
                    Some(expr) => self.evaluate_expr(expr)?,
                    None => Value::Null,
                };
                Ok(Signal::Return(result))
            }
            Stmt::Break(position) => {
                if self.loop_depth == 0 {
                    return Err(expression_error("'break' used outside a loop", *position));
                }
                Ok(Signal::Break)
            }
            Stmt::Continue(position) => {
                if self.loop_depth == 0 {
                    return Err(expression_error("'continue' used outside a loop", *position));
                }
                Ok(Signal::Continue)
            }
            Stmt::TryCatch { try_block, catches, position } => {
                self.execute_try(try_block, catches, *position)
            }
            Stmt::Throw { value, position } => self.execute_throw(value, *position),
        }
    }

    fn execute_if(
        &mut self,
        condition: &Expr,
        block: &Block,
        elifs: &[ElifClause],
        else_block: &Option<Block>,
    ) -> Result<Signal, Thrown> {
        if self.evaluate_expr(condition)?.is_truthy() {
            return self.execute_block(block);
        }
        for elif in elifs {
            if self.evaluate_expr(&elif.condition)?.is_truthy() {
                return self.execute_block(&elif.block);
            }
        }
        match else_block {
            Some(block) => self.execute_block(block),
            None => Ok(Signal::Normal),
        }
    }

    fn execute_while(&mut self, condition: &Expr, block: &Block) -> Result<Signal, Thrown> {
        self.loop_depth += 1;
        let outcome = self.run_while_body(condition, block);
        self.loop_depth -= 1;
        outcome
    }

    fn run_while_body(&mut self, condition: &Expr, block: &Block) -> Result<Signal, Thrown> {
        while self.evaluate_expr(condition)?.is_truthy() {
            match self.execute_block(block)? {
                Signal::Break => break,
                Signal::Return(value) => return Ok(Signal::Return(value)),
                Signal::Continue | Signal::Normal => {}
            }
        }
        Ok(Signal::Normal)
    }

    fn execute_for(
        &mut self,
        variable: &str,
        iterable: &Expr,
        block: &Block,
        position: Position,
    ) -> Result<Signal, Thrown> {
        if self.scope.exists(variable) {
            return Err(Thrown(Value::error(
                ErrorVariant::VariableError,
                format!("loop variable '{variable}' shadows a binding in an enclosing scope"),
                position,
                vec![],
            )));
        }
        if let Expr::Identifier { name, .. } = iterable {
            if name == variable {
                return Err(Thrown(Value::error(
                    ErrorVariant::VariableError,
                    format!("loop variable '{variable}' cannot share a name with the iterable"),
                    position,
                    vec![],
                )));
            }
        }

        let iterable_value = self.evaluate_expr(iterable)?;
        let items = match iterable_value {
            Value::Array(items) => items,
            other => {
                return Err(Thrown(Value::error(
                    ErrorVariant::TypeError,
                    format!("cannot iterate over a {}", other.type_tag()),
                    position,
                    vec![],
                )))
            }
        };

        self.loop_depth += 1;
        let outcome = self.run_for_body(variable, &items, block);
        self.loop_depth -= 1;
        outcome
    }

    fn run_for_body(
        &mut self,
        variable: &str,
        items: &std::rc::Rc<std::cell::RefCell<Vec<Value>>>,
        block: &Block,
    ) -> Result<Signal, Thrown> {
        let snapshot: Vec<Value> = items.borrow().clone();
        for item in snapshot {
            self.scope.push_block();
            self.scope.set(variable, item);
            let signal = self.execute_statements(&block.statements);
            self.scope.pop_block();
            match signal? {
                Signal::Break => break,
                Signal::Return(value) => return Ok(Signal::Return(value)),
                Signal::Continue | Signal::Normal => {}
            }
        }
        Ok(Signal::Normal)
    }

    fn execute_try(
        &mut self,
        try_block: &Block,
        catches: &[CatchClause],
        _position: Position,
    ) -> Result<Signal, Thrown> {
        match self.execute_block(try_block) {
            Ok(signal) => Ok(signal),
            Err(Thrown(error_value)) => {
                let variant = match &error_value {
                    Value::Error(e) => e.variant,
                    _ => return Err(Thrown(error_value)),
                };
                for clause in catches {
                    let matches = clause.error_types.is_empty()
                        || clause.error_types.iter().any(|t| variant.matches(t));
                    if !matches {
                        continue;
                    }
                    self.scope.push_block();
                    if let Some(var_name) = &clause.error_var {
                        self.scope.set(var_name, error_value.clone());
                    }
                    let result = self.execute_statements(&clause.block.statements);
                    self.scope.pop_block();
                    return result;
                }
                Err(Thrown(error_value))
            }
        }
    }

    fn execute_throw(&mut self, expr: &Expr, position: Position) -> Result<Signal, Thrown> {
        let value = self.evaluate_expr(expr)?;
        let error = match value {
            Value::Error(e) => Value::error(e.variant, e.message.clone(), position, e.args.clone()),
            other => Value::error(
                ErrorVariant::TypeError,
                format!("cannot throw a {}, only an Error", other.type_tag()),
                position,
                vec![],
            ),
        };
        Err(Thrown(error))
    }

    fn execute_assign(
        &mut self,
        target: &Expr,
        op: AssignOp,
        value_expr: &Expr,
        position: Position,
    ) -> Result<(), Thrown> {
        let rhs = self.evaluate_expr(value_expr)?;
        match target {
            Expr::Identifier { name, .. } => {
                let current = self.scope.get(name);
                let new_value = combine(op, current, rhs, position)?;
                self.scope.set(name, new_value);
                Ok(())
            }
            Expr::PropertyAccess { target: inner, property, position: prop_pos, .. } => {
                let target_value = self.evaluate_expr(inner)?;
                let field_name = match property.as_ref() {
                    Expr::Identifier { name, .. } => name.clone(),
                    _ => {
                        return Err(Thrown(Value::error(
                            ErrorVariant::PropertyError,
                            "cannot assign to a method call".to_string(),
                            *prop_pos,
                            vec![],
                        )))
                    }
                };
                let current = read_field(&target_value, &field_name, *prop_pos)?;
                let new_value = combine(op, current, rhs, position)?;
                write_field(&target_value, &field_name, new_value, *prop_pos)
            }
            _ => Err(Thrown(Value::error(
                ErrorVariant::ExpressionError,
                "invalid assignment target".to_string(),
                position,
                vec![],
            ))),
        }
    }

    fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value, Thrown> {
        match expr {
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Float(n) => Ok(Value::Float(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Null => Ok(Value::Null),
            Expr::Identifier { name, .. } => Ok(self.scope.get(name)),
            Expr::FunctionCall { name, args, position } => {
                self.evaluate_function_call(name, args, *position)
            }
            Expr::PropertyAccess { target, property, optional, position } => {
                self.evaluate_property_access(target, property, *optional, *position)
            }
            Expr::Binary { op, left, right, position } => {
                let l = self.evaluate_expr(left)?;
                let r = self.evaluate_expr(right)?;
                evaluate_binary(*op, l, r, *position)
            }
            Expr::BitwiseNegation { expr, position } => {
                let value = self.evaluate_expr(expr)?;
                match value {
                    Value::Bool(b) => Ok(Value::Bool(!b)),
                    other => Err(type_error_unary("!", &other, *position)),
                }
            }
            Expr::NumericNegation { expr, position } => {
                let value = self.evaluate_expr(expr)?;
                match value {
                    Value::Int(n) => Ok(Value::Int(-n)),
                    Value::Float(n) => Ok(Value::Float(-n)),
                    other => Err(type_error_unary("-", &other, *position)),
                }
            }
            Expr::TypeCheck { expr, type_name, .. } => {
                let value = self.evaluate_expr(expr)?;
                Ok(Value::Bool(value.type_tag() == type_name))
            }
        }
    }

    fn evaluate_function_call(
        &mut self,
        name: &str,
        args: &[Argument],
        position: Position,
    ) -> Result<Value, Thrown> {
        let mut values = Vec::with_capacity(args.len());
        let mut ref_names = Vec::with_capacity(args.len());
        for arg in args {
            let value = self.evaluate_expr(&arg.value)?;
            let caller_name = if arg.is_reference {
                match &arg.value {
                    Expr::Identifier { name, .. } => Some(name.clone()),
                    _ => None,
                }
            } else {
                None
            };
            values.push(if caller_name.is_some() { value } else { value.deep_clone() });
            ref_names.push(caller_name);
        }

        if builtins::is_builtin_name(name) {
            return builtins::call(name, values, position)
                .expect("is_builtin_name and call must agree");
        }

        self.call_user_function(name, values, ref_names, position)
    }

    fn call_user_function(
        &mut self,
        name: &str,
        values: Vec<Value>,
        ref_names: Vec<Option<String>>,
        position: Position,
    ) -> Result<Value, Thrown> {
        let program = self.program;
        let func = program.functions.get(name).ok_or_else(|| {
            Thrown(Value::error(
                ErrorVariant::FunctionError,
                format!("function '{name}' is not defined"),
                position,
                vec![],
            ))
        })?;

        if values.len() > func.parameters.len() {
            return Err(Thrown(Value::error(
                ErrorVariant::ArgumentError,
                format!(
                    "'{name}' takes at most {} argument(s), got {}",
                    func.parameters.len(),
                    values.len()
                ),
                position,
                vec![],
            )));
        }

        if self.call_depth >= MAX_CALL_STACK_SIZE {
            return Err(Thrown(Value::error(
                ErrorVariant::StackOverflowError,
                format!("call stack exceeded calling '{name}'"),
                position,
                vec![],
            )));
        }

        let mut bindings = Vec::with_capacity(func.parameters.len());
        for (i, param) in func.parameters.iter().enumerate() {
            let value = match values.get(i) {
                Some(v) => v.clone(),
                None if param.is_optional => match &param.default {
                    Some(expr) => self.evaluate_expr(expr)?,
                    None => Value::Null,
                },
                None => {
                    return Err(Thrown(Value::error(
                        ErrorVariant::ArgumentError,
                        format!("missing required argument '{}' to '{name}'", param.name),
                        position,
                        vec![],
                    )))
                }
            };
            bindings.push((param.name.clone(), value));
        }

        let mut new_scope = FunctionScope::new();
        for (i, (param_name, value)) in bindings.into_iter().enumerate() {
            new_scope.bind_parameter(param_name.clone(), value);
            if let Some(Some(caller_name)) = ref_names.get(i) {
                new_scope.add_reference(param_name, caller_name.clone());
            }
        }

        let old_scope = std::mem::replace(&mut self.scope, new_scope);
        let old_loop_depth = std::mem::replace(&mut self.loop_depth, 0);
        self.call_depth += 1;

        let result = self.execute_block(&func.block);

        self.call_depth -= 1;
        self.loop_depth = old_loop_depth;
        let mut callee_scope = std::mem::replace(&mut self.scope, old_scope);

        match result {
            Ok(signal) => {
                let references = callee_scope.references().clone();
                for (param_name, caller_name) in references {
                    let value = callee_scope.get(&param_name);
                    self.scope.set(&caller_name, value);
                }
                Ok(match signal {
                    Signal::Return(value) => value,
                    _ => Value::Null,
                })
            }
            Err(thrown) => Err(thrown),
        }
    }

    fn evaluate_property_access(
        &mut self,
        target: &Expr,
        property: &Expr,
        optional: bool,
        position: Position,
    ) -> Result<Value, Thrown> {
        let target_value = self.evaluate_expr(target)?;
        if optional && matches!(target_value, Value::Null) {
            return Ok(Value::Null);
        }
        match self.read_property(&target_value, property, position) {
            Ok(value) => Ok(value),
            Err(thrown) if optional && is_property_error(&thrown) => Ok(Value::Null),
            Err(thrown) => Err(thrown),
        }
    }

    fn read_property(&mut self, target: &Value, property: &Expr, position: Position) -> Result<Value, Thrown> {
        match property {
            Expr::Identifier { name, .. } => read_field(target, name, position),
            Expr::FunctionCall { name, args, .. } => self.call_method(target, name, args, position),
            _ => Err(Thrown(Value::error(
                ErrorVariant::PropertyError,
                "invalid property access".to_string(),
                position,
                vec![],
            ))),
        }
    }

    fn call_method(
        &mut self,
        target: &Value,
        name: &str,
        args: &[Argument],
        position: Position,
    ) -> Result<Value, Thrown> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            let value = self.evaluate_expr(&arg.value)?;
            values.push(if arg.is_reference { value } else { value.deep_clone() });
        }
        match target {
            Value::Array(items) => builtins::array_methods::call(items, name, values, position)
                .unwrap_or_else(|| Err(unknown_property(target, name, position))),
            _ => Err(unknown_property(target, name, position)),
        }
    }
}

fn combine(op: AssignOp, current: Value, rhs: Value, position: Position) -> Result<Value, Thrown> {
    match op {
        AssignOp::Assign => Ok(rhs),
        AssignOp::AddAssign => evaluate_binary(BinOp::Add, current, rhs, position),
        AssignOp::SubAssign => evaluate_binary(BinOp::Sub, current, rhs, position),
        AssignOp::MulAssign => evaluate_binary(BinOp::Mul, current, rhs, position),
        AssignOp::DivAssign => evaluate_binary(BinOp::Div, current, rhs, position),
        AssignOp::ModAssign => evaluate_binary(BinOp::Mod, current, rhs, position),
    }
}

fn evaluate_binary(op: BinOp, l: Value, r: Value, position: Position) -> Result<Value, Thrown> {
    match op {
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => arithmetic(op, l, r, position),
        BinOp::Eq => Ok(Value::Bool(l == r)),
        BinOp::NotEq => Ok(Value::Bool(l != r)),
        BinOp::Gt | BinOp::GtEq | BinOp::Lt | BinOp::LtEq => comparison(op, l, r, position),
        BinOp::And | BinOp::Or => boolean_op(op, l, r, position),
    }
}

fn arithmetic(op: BinOp, l: Value, r: Value, position: Position) -> Result<Value, Thrown> {
    match (l, r) {
        (Value::Int(x), Value::Int(y)) => int_arith(op, x, y, position),
        (l @ (Value::Int(_) | Value::Float(_)), r @ (Value::Int(_) | Value::Float(_))) => {
            float_arith(op, to_f64(&l), to_f64(&r), position)
        }
        (l, r) => Err(type_error_binary(&l, &r, position)),
    }
}

fn int_arith(op: BinOp, x: i64, y: i64, position: Position) -> Result<Value, Thrown> {
    match op {
        BinOp::Add => Ok(Value::Int(x.wrapping_add(y))),
        BinOp::Sub => Ok(Value::Int(x.wrapping_sub(y))),
        BinOp::Mul => Ok(Value::Int(x.wrapping_mul(y))),
        BinOp::Div => {
            if y == 0 {
                Err(value_error("division by zero", position))
            } else {
                Ok(Value::Int(x / y))
            }
        }
        BinOp::Mod => {
            if y == 0 {
                Err(value_error("modulo by zero", position))
            } else {
                Ok(Value::Int(x % y))
            }
        }
        _ => unreachable!("int_arith only handles arithmetic operators"),
    }
}

fn float_arith(op: BinOp, x: f64, y: f64, position: Position) -> Result<Value, Thrown> {
    match op {
        BinOp::Add => Ok(Value::Float(x + y)),
        BinOp::Sub => Ok(Value::Float(x - y)),
        BinOp::Mul => Ok(Value::Float(x * y)),
        BinOp::Div => {
            if y == 0.0 {
                Err(value_error("division by zero", position))
            } else {
                Ok(Value::Float(x / y))
            }
        }
        BinOp::Mod => {
            if y == 0.0 {
                Err(value_error("modulo by zero", position))
            } else {
                Ok(Value::Float(x % y))
            }
        }
        _ => unreachable!("float_arith only handles arithmetic operators"),
    }
}

fn comparison(op: BinOp, l: Value, r: Value, position: Position) -> Result<Value, Thrown> {
    let (a, b) = match (numeric_f64(&l), numeric_f64(&r)) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(type_error_binary(&l, &r, position)),
    };
    let result = match op {
        BinOp::Gt => a > b,
        BinOp::GtEq => a >= b,
        BinOp::Lt => a < b,
        BinOp::LtEq => a <= b,
        _ => unreachable!("comparison only handles ordering operators"),
    };
    Ok(Value::Bool(result))
}

fn boolean_op(op: BinOp, l: Value, r: Value, position: Position) -> Result<Value, Thrown> {
    match (l, r) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(match op {
            BinOp::And => a && b,
            BinOp::Or => a || b,
            _ => unreachable!("boolean_op only handles & and |"),
        })),
        (l, r) => Err(type_error_binary(&l, &r, position)),
    }
}

fn numeric_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Int(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        _ => None,
    }
}

fn to_f64(v: &Value) -> f64 {
    numeric_f64(v).expect("caller already verified a numeric operand")
}

fn read_field(target: &Value, name: &str, position: Position) -> Result<Value, Thrown> {
    match target {
        Value::Student(s) => {
            let s = s.borrow();
            match name {
                "name" => Ok(s.name.clone()),
                "surname" => Ok(s.surname.clone()),
                "age" => Ok(s.age.clone()),
                _ => Err(unknown_property(target, name, position)),
            }
        }
        Value::Error(e) => match name {
            "message" => Ok(Value::String(e.message.clone())),
            "args" => Ok(Value::array(e.args.clone())),
            "position" => Ok(Value::String(e.position.to_string())),
            _ => Err(unknown_property(target, name, position)),
        },
        _ => Err(unknown_property(target, name, position)),
    }
}

fn write_field(target: &Value, name: &str, value: Value, position: Position) -> Result<(), Thrown> {
    match target {
        Value::Student(s) => {
            let mut s = s.borrow_mut();
            match name {
                "name" => s.name = value,
                "surname" => s.surname = value,
                "age" => s.age = value,
                _ => return Err(unknown_property(target, name, position)),
            }
            Ok(())
        }
        _ => Err(unknown_property(target, name, position)),
    }
}

fn unknown_property(target: &Value, name: &str, position: Position) -> Thrown {
    Thrown(Value::error(
        ErrorVariant::PropertyError,
        format!("a {} has no property '{name}'", target.type_tag()),
        position,
        vec![],
    ))
}

fn is_property_error(thrown: &Thrown) -> bool {
    matches!(&thrown.0, Value::Error(e) if e.variant == ErrorVariant::PropertyError)
}

fn type_error_binary(l: &Value, r: &Value, position: Position) -> Thrown {
    Thrown(Value::error(
        ErrorVariant::TypeError,
        format!("unsupported operand types: {} and {}", l.type_tag(), r.type_tag()),
        position,
        vec![],
    ))
}

fn type_error_unary(op: &str, v: &Value, position: Position) -> Thrown {
    Thrown(Value::error(
        ErrorVariant::TypeError,
        format!("cannot apply '{op}' to a {}", v.type_tag()),
        position,
        vec![],
    ))
}

fn value_error(message: &str, position: Position) -> Thrown {
    Thrown(Value::error(ErrorVariant::ValueError, message.to_string(), position, vec![]))
}

fn expression_error(message: &str, position: Position) -> Thrown {
    Thrown(Value::error(ErrorVariant::ExpressionError, message.to_string(), position, vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::ErrorHandler;
    use crate::parser;

    fn run_source(source: &str) -> Result<(), Thrown> {
        let mut handler = ErrorHandler::new();
        let program = parser::parse(source, &mut handler);
        assert!(!handler.has_errors(), "unexpected parse errors: {:?}", handler.errors());
        run(&program)
    }

    #[test]
    fn addition_runs_without_error() {
        assert!(run_source("main() { print(1+2); }").is_ok());
    }

    #[test]
    fn array_removeat_mutates_in_place() {
        let mut handler = ErrorHandler::new();
        let program = parser::parse("main() { a=Array(3,2,1); a.removeAt(0); }", &mut handler);
        assert!(run(&program).is_ok());
    }

    #[test]
    fn reference_argument_writes_back_to_the_caller() {
        let source = "test(x) { x+=1; } main() { a=1; test(@a); if (a != 2) { throw ValueError(\"bad\"); } }";
        assert!(run_source(source).is_ok());
    }

    #[test]
    fn non_reference_argument_does_not_write_back() {
        let source = "test(x) { x+=1; } main() { a=1; test(a); if (a != 1) { throw ValueError(\"bad\"); } }";
        assert!(run_source(source).is_ok());
    }

    #[test]
    fn division_by_zero_is_a_value_error() {
        let mut handler = ErrorHandler::new();
        let program = parser::parse("main() { print(1/0); }", &mut handler);
        let result = run(&program);
        assert!(matches!(result, Err(Thrown(Value::Error(e))) if e.variant == ErrorVariant::ValueError));
    }

    #[test]
    fn caught_error_exposes_its_message() {
        let source = r#"main() { try { throw Error("boom"); } catch (Error e) { if (e.message != "boom") { throw ValueError("wrong message"); } } }"#;
        assert!(run_source(source).is_ok());
    }

    #[test]
    fn unbounded_recursion_overflows_exactly_once() {
        let mut handler = ErrorHandler::new();
        let program = parser::parse("rec() { rec(); } main() { rec(); }", &mut handler);
        let result = run(&program);
        assert!(matches!(result, Err(Thrown(Value::Error(e))) if e.variant == ErrorVariant::StackOverflowError));
    }

    #[test]
    fn break_outside_a_loop_is_an_expression_error() {
        let mut handler = ErrorHandler::new();
        let program = parser::parse("main() { break; }", &mut handler);
        let result = run(&program);
        assert!(matches!(result, Err(Thrown(Value::Error(e))) if e.variant == ErrorVariant::ExpressionError));
    }

    #[test]
    fn optional_chaining_never_raises_a_property_error() {
        let source = "main() { a=null; if (a?.missing != null) { throw ValueError(\"bad\"); } }";
        assert!(run_source(source).is_ok());
    }

    #[test]
    fn for_loop_rejects_a_shadowed_loop_variable() {
        let mut handler = ErrorHandler::new();
        let program = parser::parse("main() { a=Array(1); for (a : a) { print(a); } }", &mut handler);
        let result = run(&program);
        assert!(matches!(result, Err(Thrown(Value::Error(e))) if e.variant == ErrorVariant::VariableError));
    }
}
