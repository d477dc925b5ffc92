use std::{io::Write, rc::Rc};

use tracing::debug;

use crate::{
    ast::{EnumDecl, Expr, Pattern, PatternElement, Stmt},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, Signal},
        value::{core::Value, instance::StructInstance},
    },
    util::stack::ensure_sufficient_stack,
};

impl Interpreter {
    /// Executes a statement and reports how it finished.
    ///
    /// A thrown value unwinding out of a function call called somewhere in
    /// the statement is turned back into [`Signal::Throw`] here, so `try`
    /// only has to look at signals.
    ///
    /// # Errors
    /// Returns host-level failures: output errors and call depth overflow.
    pub fn execute(&mut self, statement: &Stmt) -> EvalResult<Signal> {
        match ensure_sufficient_stack(|| self.execute_inner(statement)) {
            Err(RuntimeError::Thrown { value, line }) => Ok(Signal::Throw(value, line)),
            other => other,
        }
    }

    fn execute_inner(&mut self, statement: &Stmt) -> EvalResult<Signal> {
        match statement {
            Stmt::Expression { expr, .. } => {
                self.evaluate(expr)?;
                Ok(Signal::Ok)
            },
            Stmt::Echo { values, .. } => self.execute_echo(values),
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Null,
                };
                Ok(Signal::Return(value))
            },
            Stmt::Break { .. } => Ok(Signal::Break),
            Stmt::Continue { .. } => Ok(Signal::Continue),
            Stmt::Block { statements, .. } => self.execute_block(statements),
            Stmt::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Signal::Ok)
                }
            },
            Stmt::Loop { condition, body, .. } => self.execute_loop(condition.as_ref(), body),
            Stmt::Cruise { variable,
                           iterable,
                           body,
                           .. } => self.execute_cruise(variable, iterable, body),
            Stmt::Try { body,
                        catch_name,
                        catch_body,
                        finally_body,
                        .. } => self.execute_try(body,
                                                 catch_name.as_deref(),
                                                 catch_body.as_deref(),
                                                 finally_body.as_deref()),
            Stmt::Throw { value, span } => Ok(Signal::Throw(self.evaluate(value)?, span.line)),
            Stmt::VarDecl { target,
                            initializer,
                            .. } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Null,
                };
                self.bind_pattern(target, value);
                Ok(Signal::Ok)
            },
            Stmt::Function(decl) => {
                if let Some(name) = &decl.name {
                    self.env.define(name, Value::Function(Rc::clone(decl)));
                }
                Ok(Signal::Ok)
            },
            Stmt::Struct(decl) => {
                self.env.define(&decl.name, Value::StructDef(Rc::clone(decl)));
                Ok(Signal::Ok)
            },
            Stmt::Enum(decl) => {
                self.env.define(&decl.name, Self::enum_value(decl));
                Ok(Signal::Ok)
            },
            Stmt::Import { path, .. } => {
                debug!(%path, "import has no effect");
                Ok(Signal::Ok)
            },
        }
    }

    /// Executes statements in order, stopping at the first non-`Ok` signal.
    ///
    /// # Errors
    /// Propagates any failure of the statements.
    pub fn execute_block(&mut self, statements: &[Stmt]) -> EvalResult<Signal> {
        for statement in statements {
            let signal = self.execute(statement)?;
            if signal != Signal::Ok {
                return Ok(signal);
            }
        }
        Ok(Signal::Ok)
    }

    /// Prints the values separated by single spaces, followed by a newline.
    fn execute_echo(&mut self, values: &[Expr]) -> EvalResult<Signal> {
        let mut line = String::new();

        for (index, expr) in values.iter().enumerate() {
            if index > 0 {
                line.push(' ');
            }
            line.push_str(&self.evaluate(expr)?.to_string());
        }

        writeln!(self.out, "{line}")?;
        Ok(Signal::Ok)
    }

    /// Runs a `loop` until its condition is falsy, `break`, or a `return` or
    /// `throw` leaves it.
    fn execute_loop(&mut self, condition: Option<&Expr>, body: &Stmt) -> EvalResult<Signal> {
        loop {
            if let Some(condition) = condition
               && !self.evaluate(condition)?.is_truthy()
            {
                return Ok(Signal::Ok);
            }

            match self.execute(body)? {
                Signal::Break => return Ok(Signal::Ok),
                Signal::Ok | Signal::Continue => {},
                signal => return Ok(signal),
            }
        }
    }

    /// Runs `try`/`catch`/`finally`.
    ///
    /// A throw from the body is handed to the catch block, bound to its name
    /// in the current frame. `finally` always runs last; if it finishes with
    /// anything but `Ok`, that signal replaces the pending one.
    fn execute_try(&mut self,
                   body: &Stmt,
                   catch_name: Option<&str>,
                   catch_body: Option<&Stmt>,
                   finally_body: Option<&Stmt>)
                   -> EvalResult<Signal> {
        let mut signal = self.execute(body)?;

        if let Signal::Throw(value, _) = &signal
           && let Some(catch_body) = catch_body
        {
            if let Some(name) = catch_name {
                self.env.define(name, value.clone());
            }
            signal = self.execute(catch_body)?;
        }

        if let Some(finally_body) = finally_body {
            let finally_signal = self.execute(finally_body)?;
            if finally_signal != Signal::Ok {
                return Ok(finally_signal);
            }
        }

        Ok(signal)
    }

    /// Binds a declaration target.
    ///
    /// Array patterns bind by position, with missing elements becoming
    /// `null`; struct patterns bind fields by name. A value of the wrong
    /// kind binds every name to `null`.
    pub(in crate::interpreter) fn bind_pattern(&mut self, pattern: &Pattern, value: Value) {
        match pattern {
            Pattern::Identifier(name) => self.env.define(name, value),
            Pattern::Array(elements) => {
                let items = value.as_array()
                                 .map(|items| items.borrow().clone())
                                 .unwrap_or_default();
                let mut position = 0;

                for element in elements {
                    match element {
                        PatternElement::Bind(name) => {
                            let item = items.get(position).cloned().unwrap_or_default();
                            self.env.define(name, item);
                            position += 1;
                        },
                        PatternElement::Skip => position += 1,
                        PatternElement::Rest(name) => {
                            let rest = items.get(position..).unwrap_or_default().to_vec();
                            self.env.define(name, Value::from(rest));
                            position = items.len();
                        },
                    }
                }
            },
            Pattern::Struct(fields) => {
                for field in fields {
                    let item = match &value {
                        Value::Instance(instance) => instance.get(field).unwrap_or_default(),
                        _ => Value::Null,
                    };
                    self.env.define(field, item);
                }
            },
        }
    }

    /// Builds the namespace value an enum declaration binds: an instance
    /// whose fields are the variants' ordinals.
    ///
    /// Ordinals count up from zero; an explicit `= N` restarts the count at
    /// `N`.
    #[must_use]
    pub fn enum_value(decl: &EnumDecl) -> Value {
        let mut next = 0_i64;
        let mut fields = Vec::with_capacity(decl.variants.len());

        for (name, explicit) in &decl.variants {
            let ordinal = explicit.unwrap_or(next);
            fields.push((name.clone(), Value::Int(ordinal)));
            next = ordinal.wrapping_add(1);
        }

        Value::Instance(Rc::new(StructInstance::new(decl.name.clone(), fields)))
    }
}
