use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// Variable storage for a running program.
///
/// Frame 0 holds globals and is never popped. Each function call pushes a
/// frame for its parameters and locals. Blocks do not open frames, so a
/// variable declared inside a loop body stays visible after the loop.
///
/// Name resolution looks at the innermost frame, then at globals; frames of
/// callers further down the stack are not visible.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<HashMap<String, Value>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only an empty global frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![HashMap::new()] }
    }

    /// Pushes a new frame for a function call.
    pub fn push_frame(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Pops the innermost call frame. The global frame is never removed.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// The number of active call frames, excluding globals.
    #[must_use]
    pub fn call_depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Looks up a variable in the innermost frame, then in globals.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::{evaluator::environment::Environment, value::core::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define("x", Value::int(1));
    /// env.push_frame();
    /// env.define("y", Value::int(2));
    ///
    /// assert_eq!(env.get("x"), Some(&Value::int(1)));
    /// assert_eq!(env.get("y"), Some(&Value::int(2)));
    ///
    /// env.pop_frame();
    /// assert_eq!(env.get("y"), None);
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let innermost = self.frames.last()?;

        innermost.get(name)
                 .or_else(|| self.frames.first().and_then(|globals| globals.get(name)))
    }

    /// Binds `name` in the innermost frame, replacing any previous binding
    /// there.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), value);
        }
    }

    /// Binds `name` in the global frame.
    pub fn define_global(&mut self, name: &str, value: Value) {
        if let Some(globals) = self.frames.first_mut() {
            globals.insert(name.to_string(), value);
        }
    }

    /// Assigns to an existing variable.
    ///
    /// Updates the innermost frame if it binds `name`, else globals if they
    /// bind it; otherwise creates the binding in the innermost frame.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::{evaluator::environment::Environment, value::core::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define("count", Value::int(0));
    ///
    /// env.push_frame();
    /// env.assign("count", Value::int(1));
    /// env.assign("local", Value::int(2));
    /// env.pop_frame();
    ///
    /// assert_eq!(env.get("count"), Some(&Value::int(1)));
    /// assert_eq!(env.get("local"), None);
    /// ```
    pub fn assign(&mut self, name: &str, value: Value) {
        let last = self.frames.len() - 1;

        let target = if self.frames[last].contains_key(name) {
            last
        } else if self.frames[0].contains_key(name) {
            0
        } else {
            last
        };

        self.frames[target].insert(name.to_string(), value);
    }
}
