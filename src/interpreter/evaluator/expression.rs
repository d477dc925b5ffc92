use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, ChainAccess, Expr},
    interpreter::{
        evaluator::{
            binary::apply_binary,
            core::{EvalResult, Interpreter},
            unary::apply_unary,
        },
        value::{core::Value, instance::StructInstance},
    },
    util::{
        num::{checked_index, usize_to_i64},
        stack::ensure_sufficient_stack,
    },
};

impl Interpreter {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Type
    /// mismatches, unbound names and out-of-range accesses evaluate to
    /// `null`; only host-level failures are errors.
    ///
    /// # Errors
    /// Returns a [`crate::error::RuntimeError`] when a call inside the
    /// expression fails at host level or throws.
    ///
    /// # Example
    /// ```
    /// use blast::{
    ///     ast::{BinaryOperator, Expr, Span},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let mut interpreter = Interpreter::new();
    /// let span = Span::new(1, 1);
    /// let expr = Expr::Binary { left: Box::new(Expr::Literal { value: "a".into(),
    ///                                                          span }),
    ///                           op: BinaryOperator::Add,
    ///                           right: Box::new(Expr::Literal { value: 1.into(),
    ///                                                           span }),
    ///                           span };
    ///
    /// assert_eq!(interpreter.evaluate(&expr).unwrap(), Value::Null);
    /// ```
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.evaluate_expr(expr))
    }

    fn evaluate_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, .. } => Ok(self.env.get(name).cloned().unwrap_or_default()),
            Expr::Binary { left, op, right, .. } => self.evaluate_binary(left, *op, right),
            Expr::Unary { op, operand, .. } => {
                let operand = self.evaluate(operand)?;
                Ok(apply_unary(*op, &operand))
            },
            Expr::TypeOf { operand, .. } => {
                let operand = self.evaluate(operand)?;
                Ok(Value::string(operand.type_name()))
            },
            Expr::Call { callee,
                         arguments,
                         span, } => self.evaluate_call(callee, arguments, span.line),
            Expr::Assign { target, value, .. } => self.evaluate_assign(target, value),
            Expr::Index { object, index, .. } => {
                let object = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                Ok(index_value(&object, &index))
            },
            Expr::Member { object, name, .. } => {
                let object = self.evaluate(object)?;
                Ok(member_value(&object, name))
            },
            Expr::StructLiteral { name, fields, .. } => self.evaluate_struct_literal(name, fields),
            Expr::ArrayLiteral { elements, .. } => Ok(Value::from(self.evaluate_elements(elements)?)),
            Expr::Spread { operand, .. } => self.evaluate(operand),
            Expr::OptionalChain { object, access, .. } => {
                let object = self.evaluate(object)?;
                if object.is_null() {
                    return Ok(Value::Null);
                }
                match access {
                    ChainAccess::Member(name) => Ok(member_value(&object, name)),
                    ChainAccess::Index(index) => {
                        let index = self.evaluate(index)?;
                        Ok(index_value(&object, &index))
                    },
                }
            },
            Expr::NullishCoalescing { left, right, .. } => {
                let left = self.evaluate(left)?;
                if left.is_null() {
                    self.evaluate(right)
                } else {
                    Ok(left)
                }
            },
            Expr::Function { decl, .. } => Ok(Value::Function(Rc::clone(decl))),
        }
    }

    /// Evaluates a binary operation. `&&` and `||` short-circuit and yield
    /// booleans; a range outside a `cruise` header is `null`.
    fn evaluate_binary(&mut self,
                       left: &Expr,
                       op: BinaryOperator,
                       right: &Expr)
                       -> EvalResult<Value> {
        match op {
            BinaryOperator::And => {
                let result = self.evaluate(left)?.is_truthy() && self.evaluate(right)?.is_truthy();
                Ok(Value::Bool(result))
            },
            BinaryOperator::Or => {
                let result = self.evaluate(left)?.is_truthy() || self.evaluate(right)?.is_truthy();
                Ok(Value::Bool(result))
            },
            BinaryOperator::Range => Ok(Value::Null),
            _ => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(apply_binary(op, &left, &right))
            },
        }
    }

    /// Evaluates list elements in order, splicing the items of spread arrays.
    ///
    /// Used by array literals and call arguments.
    pub(in crate::interpreter) fn evaluate_elements(&mut self,
                                                    elements: &[Expr])
                                                    -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(elements.len());

        for element in elements {
            if let Expr::Spread { operand, .. } = element {
                match self.evaluate(operand)? {
                    Value::Array(items) => values.extend(items.borrow().iter().cloned()),
                    other => values.push(other),
                }
            } else {
                values.push(self.evaluate(element)?);
            }
        }

        Ok(values)
    }

    /// Builds a struct instance.
    ///
    /// Declared fields start as `null` in declaration order, then the listed
    /// initialisers are evaluated and stored in source order. Naming something
    /// other than a struct builds an instance with only the listed fields.
    fn evaluate_struct_literal(&mut self,
                               name: &str,
                               fields: &[(String, Expr)])
                               -> EvalResult<Value> {
        let declared = match self.env.get(name) {
            Some(Value::StructDef(decl)) => {
                decl.fields
                    .iter()
                    .map(|field| (field.name.clone(), Value::Null))
                    .collect()
            },
            _ => Vec::new(),
        };

        let instance = StructInstance::new(name, declared);
        for (field, expr) in fields {
            let value = self.evaluate(expr)?;
            instance.set(field, value);
        }

        Ok(Value::Instance(Rc::new(instance)))
    }

    /// Evaluates an assignment and returns the assigned value.
    ///
    /// Identifier targets follow [`crate::interpreter::evaluator::environment::Environment::assign`].
    /// `a[i] = v` writes in place for `0 <= i < len` and appends for
    /// `i == len`; `s.f = v` sets or adds a field on an instance. Any other
    /// target is left untouched.
    fn evaluate_assign(&mut self, target: &Expr, value: &Expr) -> EvalResult<Value> {
        match target {
            Expr::Identifier { name, .. } => {
                let value = self.evaluate(value)?;
                self.env.assign(name, value.clone());
                Ok(value)
            },
            Expr::Index { object, index, .. } => {
                let object = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                let value = self.evaluate(value)?;

                match (&object, &index) {
                    (Value::Array(items), Value::Int(i)) => {
                        let mut items = items.borrow_mut();
                        if let Some(slot) = checked_index(*i, items.len()) {
                            items[slot] = value.clone();
                        } else if *i == usize_to_i64(items.len()) {
                            items.push(value.clone());
                        }
                    },
                    (Value::Instance(instance), Value::Str(field)) => {
                        instance.set(field, value.clone());
                    },
                    _ => {},
                }

                Ok(value)
            },
            Expr::Member { object, name, .. } => {
                let object = self.evaluate(object)?;
                let value = self.evaluate(value)?;

                if let Value::Instance(instance) = &object {
                    instance.set(name, value.clone());
                }

                Ok(value)
            },
            _ => self.evaluate(value),
        }
    }
}

/// Reads `object[index]`.
///
/// Arrays take integer indices, strings yield one-character strings, and
/// instances accept field names. Everything else is `null`.
#[must_use]
pub fn index_value(object: &Value, index: &Value) -> Value {
    match (object, index) {
        (Value::Array(items), Value::Int(i)) => {
            let items = items.borrow();
            checked_index(*i, items.len()).map_or(Value::Null, |slot| items[slot].clone())
        },
        (Value::Str(s), Value::Int(i)) => {
            usize::try_from(*i).ok()
                               .and_then(|i| s.chars().nth(i))
                               .map_or(Value::Null, |c| Value::string(c))
        },
        (Value::Instance(instance), Value::Str(field)) => instance.get(field).unwrap_or_default(),
        _ => Value::Null,
    }
}

/// Reads `object.name`: a field of an instance, or `null`.
#[must_use]
pub fn member_value(object: &Value, name: &str) -> Value {
    match object {
        Value::Instance(instance) => instance.get(name).unwrap_or_default(),
        _ => Value::Null,
    }
}
