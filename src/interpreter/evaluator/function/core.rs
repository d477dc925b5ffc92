use std::{collections::HashMap, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::{Expr, FunctionDecl},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter, Signal},
            function::{array, math, string},
        },
        value::core::Value,
    },
};

/// Signature of a host-provided function.
///
/// A native receives the interpreter, so it can call back into language
/// functions through [`Interpreter::execute_callback`], and the evaluated
/// arguments. It borrows the arguments only for the duration of the call.
/// Missing arguments are simply absent; natives treat them as `null`.
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> EvalResult<Value>;

/// Defines the natives every interpreter starts with.
///
/// Each entry maps a registry key to a [`NativeFn`]. Dotted keys such as
/// `"math.sqrt"` are plain strings, not namespaces.
///
/// The macro produces `CORE_NATIVES`, the static table loaded by
/// [`NativeRegistry::with_core`].
macro_rules! native_functions {
    (
        $(
            $name:literal => $func:path
        ),* $(,)?
    ) => {
        /// The natives registered in every new interpreter.
        pub const CORE_NATIVES: &[(&str, NativeFn)] = &[
            $(
                ($name, $func as NativeFn),
            )*
        ];
    };
}

native_functions! {
    "array.push"      => array::push,
    "array.pop"       => array::pop,
    "array.length"    => array::length,
    "array.reverse"   => array::reverse,
    "array.sort"      => array::sort,
    "array.map"       => array::map,
    "array.filter"    => array::filter,
    "array.reduce"    => array::reduce,
    "array.find"      => array::find,
    "array.some"      => array::some,
    "array.every"     => array::every,
    "math.sqrt"       => math::sqrt,
    "math.abs"        => math::abs,
    "math.floor"      => math::floor,
    "math.ceil"       => math::ceil,
    "math.pow"        => math::pow,
    "math.min"        => math::min,
    "math.max"        => math::max,
    "string.length"   => string::length,
    "string.upper"    => string::upper,
    "string.lower"    => string::lower,
    "string.contains" => string::contains,
    "string.split"    => string::split,
    "str"             => string::str,
    "len"             => string::len,
}

/// Lookup table from names to native functions.
///
/// Owned by one [`Interpreter`]. Registering a name that already exists
/// replaces the earlier function.
#[derive(Clone, Default)]
pub struct NativeRegistry {
    functions: HashMap<String, NativeFn>,
}

impl NativeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding [`CORE_NATIVES`].
    #[must_use]
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        for (name, func) in CORE_NATIVES {
            registry.register(*name, *func);
        }
        registry
    }

    /// Registers `func` under `name`, replacing any earlier registration.
    pub fn register(&mut self, name: impl Into<String>, func: NativeFn) {
        let name = name.into();
        trace!(%name, "register native");
        self.functions.insert(name, func);
    }

    /// Finds the native registered under exactly `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<NativeFn> {
        self.functions.get(name).copied()
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// The number of registered natives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Returns argument `index`, or `null` if it was not supplied.
#[must_use]
pub fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

impl Interpreter {
    /// Registers a native function, replacing any earlier one with the same
    /// name.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::{
    ///     evaluator::{core::Interpreter, output::OutputBuffer},
    ///     parser::parse_source,
    ///     value::core::Value,
    /// };
    ///
    /// let buffer = OutputBuffer::new();
    /// let mut interpreter = Interpreter::new().with_output(buffer.clone());
    /// interpreter.register_native("host.answer", |_, _| Ok(Value::int(42)));
    ///
    /// let program = parse_source("echo(host.answer());").unwrap();
    /// interpreter.interpret(&program).unwrap();
    ///
    /// assert_eq!(buffer.contents(), "42\n");
    /// ```
    pub fn register_native(&mut self, name: impl Into<String>, func: NativeFn) {
        self.natives.register(name, func);
    }

    /// Returns `true` if a native is registered under `name`.
    #[must_use]
    pub fn has_native(&self, name: &str) -> bool {
        self.natives.contains(name)
    }

    /// Calls the native registered under `name`.
    ///
    /// Returns `Ok(None)` if nothing is registered under that name.
    ///
    /// # Errors
    /// Propagates failures raised by the native.
    pub fn call_native(&mut self, name: &str, args: &[Value]) -> EvalResult<Option<Value>> {
        let Some(func) = self.natives.get(name) else {
            return Ok(None);
        };

        trace!(name, argc = args.len(), "native call");
        func(self, args).map(Some)
    }

    /// Calls a language-level function value from native code.
    ///
    /// The function runs in a fresh frame with its parameters bound to
    /// `args`, so callbacks never see or clobber the caller's variables.
    /// Missing arguments are `null`; extra arguments are ignored. Calling
    /// anything other than a function yields `null`.
    ///
    /// # Errors
    /// Propagates a throw escaping the callback and host-level failures.
    pub fn execute_callback(&mut self, function: &Value, args: &[Value]) -> EvalResult<Value> {
        match function {
            Value::Function(decl) => self.call_function(decl, args.to_vec(), decl.span.line),
            _ => Ok(Value::Null),
        }
    }

    /// Invokes a user-defined function.
    ///
    /// Parameters are bound in a new frame that is removed again however the
    /// body finishes. A `return` supplies the result; falling off the end
    /// yields `null`, and a `throw` unwinds as [`RuntimeError::Thrown`].
    ///
    /// # Errors
    /// - [`RuntimeError::StackOverflow`] when the call would exceed the
    ///   configured depth.
    /// - Any failure of the body.
    pub fn call_function(&mut self,
                         decl: &Rc<FunctionDecl>,
                         args: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        let depth = self.config.max_call_depth;
        if self.env.call_depth() >= depth {
            debug!(depth, line, "call depth exceeded");
            return Err(RuntimeError::StackOverflow { depth, line });
        }

        self.env.push_frame();

        let mut args = args.into_iter();
        for param in &decl.params {
            self.env.define(&param.name, args.next().unwrap_or_default());
        }

        let signal = self.execute_block(&decl.body);
        self.env.pop_frame();

        match signal? {
            Signal::Return(value) => Ok(value),
            Signal::Throw(value, line) => Err(RuntimeError::Thrown { value, line }),
            Signal::Ok | Signal::Break | Signal::Continue => Ok(Value::Null),
        }
    }

    /// Evaluates a call expression.
    ///
    /// Dispatch order:
    ///
    /// 1. `receiver.member(...)` where the receiver is a string: the native
    ///    `"net." + member`, with the receiver prepended to the arguments.
    /// 2. `namespace.member(...)`: the native registered under the dotted
    ///    name, such as `math.sqrt`.
    /// 3. Method sugar on values: `xs.push(v)` calls `array.push(xs, v)` and
    ///    `s.upper()` calls `string.upper(s)`; a struct field holding a
    ///    function is called with the given arguments.
    /// 4. `name(...)`: the native registered under `name`, else a function
    ///    bound to `name`.
    /// 5. Any other callee is evaluated and called if it is a function.
    ///
    /// A call that resolves to nothing evaluates to `null`.
    pub(in crate::interpreter) fn evaluate_call(&mut self,
                                                callee: &Expr,
                                                arguments: &[Expr],
                                                line: usize)
                                                -> EvalResult<Value> {
        match callee {
            Expr::Member { object, name, .. } => {
                let namespace = match object.as_ref() {
                    Expr::Identifier { name, .. } => Some(name.as_str()),
                    _ => None,
                };

                // An unbound identifier names a native namespace, not a value.
                let receiver = match namespace {
                    Some(namespace) if self.env.get(namespace).is_none() => Value::Null,
                    _ => self.evaluate(object)?,
                };
                let args = self.evaluate_elements(arguments)?;

                self.call_member(receiver, namespace, name, args, line)
            },
            Expr::Identifier { name, .. } => {
                let args = self.evaluate_elements(arguments)?;

                if let Some(result) = self.call_native(name, &args)? {
                    return Ok(result);
                }

                match self.env.get(name).cloned() {
                    Some(Value::Function(decl)) => self.call_function(&decl, args, line),
                    _ => {
                        debug!(%name, line, "call to undefined function");
                        Ok(Value::Null)
                    },
                }
            },
            _ => {
                let function = self.evaluate(callee)?;
                let args = self.evaluate_elements(arguments)?;

                match function {
                    Value::Function(decl) => self.call_function(&decl, args, line),
                    _ => Ok(Value::Null),
                }
            },
        }
    }

    /// Resolves `receiver.member(args)` per the dispatch order of
    /// [`Self::evaluate_call`].
    fn call_member(&mut self,
                   receiver: Value,
                   namespace: Option<&str>,
                   member: &str,
                   args: Vec<Value>,
                   line: usize)
                   -> EvalResult<Value> {
        if matches!(receiver, Value::Str(_))
           && let Some(result) = self.call_with_receiver(&format!("net.{member}"), &receiver, &args)?
        {
            return Ok(result);
        }

        if let Some(namespace) = namespace
           && let Some(result) = self.call_native(&format!("{namespace}.{member}"), &args)?
        {
            return Ok(result);
        }

        let sugar = match &receiver {
            Value::Array(_) => Some("array"),
            Value::Str(_) => Some("string"),
            _ => None,
        };
        if let Some(sugar) = sugar
           && let Some(result) = self.call_with_receiver(&format!("{sugar}.{member}"), &receiver, &args)?
        {
            return Ok(result);
        }

        if let Value::Instance(instance) = &receiver
           && let Some(Value::Function(decl)) = instance.get(member)
        {
            return self.call_function(&decl, args, line);
        }

        debug!(member, line, "call to undefined method");
        Ok(Value::Null)
    }

    /// Calls a native with `receiver` prepended to `args`.
    fn call_with_receiver(&mut self,
                          name: &str,
                          receiver: &Value,
                          args: &[Value])
                          -> EvalResult<Option<Value>> {
        if !self.natives.contains(name) {
            return Ok(None);
        }

        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(receiver.clone());
        full.extend_from_slice(args);

        self.call_native(name, &full)
    }
}
