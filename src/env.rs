// ABOUTME: Per-call variable scope: a stack of block frames plus call-by-reference bookkeeping

use crate::value::Value;
use std::collections::HashMap;

/// One function activation's variable storage. A `Block` pushes a fresh
/// frame and pops it on exit; a read that misses in every frame creates a
/// `Null` binding in the innermost one, and a write mutates whichever
/// frame already holds the name, or creates it in the innermost frame.
#[derive(Debug)]
pub struct FunctionScope {
    frames: Vec<HashMap<String, Value>>,
    /// Maps a callee parameter name bound with `@` back to the caller's
    /// variable name, so the call protocol can write the final value back
    /// on return.
    references: HashMap<String, String>,
}

impl FunctionScope {
    pub fn new() -> Self {
        FunctionScope {
            frames: vec![HashMap::new()],
            references: HashMap::new(),
        }
    }

    pub fn push_block(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub fn pop_block(&mut self) {
        self.frames.pop();
        debug_assert!(!self.frames.is_empty(), "popped the parameter frame");
    }

    /// Binds a parameter in the outermost (call) frame, before the body's
    /// own block frame is pushed.
    pub fn bind_parameter(&mut self, name: String, value: Value) {
        self.frames[0].insert(name, value);
    }

    pub fn add_reference(&mut self, param_name: String, caller_name: String) {
        self.references.insert(param_name, caller_name);
    }

    pub fn references(&self) -> &HashMap<String, String> {
        &self.references
    }

    /// Reads a variable, walking frames innermost-first. A miss creates a
    /// `Null` binding in the innermost frame rather than failing.
    pub fn get(&mut self, name: &str) -> Value {
        for frame in self.frames.iter().rev() {
            if let Some(value) = frame.get(name) {
                return value.clone();
            }
        }
        self.frames
            .last_mut()
            .expect("at least one frame")
            .insert(name.to_string(), Value::Null);
        Value::Null
    }

    /// Whether `name` is bound in any frame, without creating it.
    pub fn exists(&self, name: &str) -> bool {
        self.frames.iter().any(|frame| frame.contains_key(name))
    }

    /// Writes to whichever frame already holds `name`, innermost-first, or
    /// creates it in the innermost frame if it's new.
    pub fn set(&mut self, name: &str, value: Value) {
        for frame in self.frames.iter_mut().rev() {
            if frame.contains_key(name) {
                frame.insert(name.to_string(), value);
                return;
            }
        }
        self.frames
            .last_mut()
            .expect("at least one frame")
            .insert(name.to_string(), value);
    }
}

impl Default for FunctionScope {
    fn default() -> Self {
        FunctionScope::new()
    }
}
