use crate::{
    ast::{BinaryOperator, Expr, Stmt},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, Signal},
        value::core::Value,
    },
};

impl Interpreter {
    /// Executes `cruise (variable in iterable) body`.
    ///
    /// Three kinds of iterable are supported:
    ///
    /// 1. **Range:** `a..b` with integer bounds iterates the half-open range
    ///    `a, a + 1, ..., b - 1`. The bounds are evaluated once.
    /// 2. **Array:** iterates over a snapshot of the elements taken when the
    ///    loop starts, so pushing inside the body does not extend the loop.
    /// 3. **String:** iterates over its characters as one-character strings.
    ///
    /// Anything else performs no iteration. The loop variable is bound in the
    /// current frame and keeps its last value after the loop. `break` ends
    /// the loop, `continue` moves to the next element, and `return` or
    /// `throw` propagate.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::{
    ///     evaluator::{core::Interpreter, output::OutputBuffer},
    ///     parser::parse_source,
    /// };
    ///
    /// let buffer = OutputBuffer::new();
    /// let mut interpreter = Interpreter::new().with_output(buffer.clone());
    /// let program = parse_source("cruise (c in \"ab\") { echo c; }").unwrap();
    ///
    /// interpreter.interpret(&program).unwrap();
    /// assert_eq!(buffer.contents(), "a\nb\n");
    /// ```
    ///
    /// # Errors
    /// Propagates any failure of the iterable or the body.
    pub fn execute_cruise(&mut self,
                          variable: &str,
                          iterable: &Expr,
                          body: &Stmt)
                          -> EvalResult<Signal> {
        if let Expr::Binary { left,
                              op: BinaryOperator::Range,
                              right,
                              .. } = iterable
        {
            let start = self.evaluate(left)?;
            let end = self.evaluate(right)?;

            let (Value::Int(start), Value::Int(end)) = (start, end) else {
                return Ok(Signal::Ok);
            };

            return self.iterate(variable, (start..end).map(Value::Int), body);
        }

        match self.evaluate(iterable)? {
            Value::Array(items) => {
                let snapshot = items.borrow().clone();
                self.iterate(variable, snapshot, body)
            },
            Value::Str(text) => {
                let chars = text.chars().map(Value::string).collect::<Vec<_>>();
                self.iterate(variable, chars, body)
            },
            _ => Ok(Signal::Ok),
        }
    }

    /// Binds each item to `variable` in turn and runs `body`.
    fn iterate(&mut self,
               variable: &str,
               items: impl IntoIterator<Item = Value>,
               body: &Stmt)
               -> EvalResult<Signal> {
        for item in items {
            self.env.define(variable, item);

            match self.execute(body)? {
                Signal::Break => break,
                Signal::Ok | Signal::Continue => {},
                signal => return Ok(signal),
            }
        }

        Ok(Signal::Ok)
    }
}
