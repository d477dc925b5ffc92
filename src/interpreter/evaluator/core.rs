use std::{io::Write, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Program, Stmt},
    error::RuntimeError,
    interpreter::{
        evaluator::{environment::Environment, function::core::NativeRegistry},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing a host-level failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// How a statement finished.
///
/// Blocks forward any signal other than `Ok`; loops absorb `Break` and
/// `Continue`; function calls absorb `Return`; `try` absorbs `Throw`.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Execution continues with the next statement.
    Ok,
    /// `break` was executed.
    Break,
    /// `continue` was executed.
    Continue,
    /// `return` was executed with this value.
    Return(Value),
    /// `throw` was executed with this value on the given line.
    Throw(Value, usize),
}

/// Library-level interpreter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Calls nested deeper than this fail with
    /// [`RuntimeError::StackOverflow`].
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH }
    }
}

/// A tree-walking interpreter.
///
/// Owns the variable environment, the native function registry and the
/// output sink. One interpreter runs one program, or a REPL session one
/// statement at a time.
pub struct Interpreter {
    /// Variable storage.
    pub env:                        Environment,
    pub(in crate::interpreter) natives: NativeRegistry,
    pub(in crate::interpreter) config:  InterpreterConfig,
    pub(in crate::interpreter) out:     Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter writing to stdout, with the default
    /// configuration and the core natives registered.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    /// Creates an interpreter with the given configuration.
    #[must_use]
    pub fn with_config(config: InterpreterConfig) -> Self {
        Self { env: Environment::new(),
               natives: NativeRegistry::with_core(),
               config,
               out: Box::new(std::io::stdout()) }
    }

    /// Redirects `echo` output to `out`.
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
    ///
    /// let program = parse_source("echo(1 + 2 * 3);").unwrap();
    /// let status = interpreter.interpret(&program).unwrap();
    ///
    /// assert_eq!(status, 0);
    /// assert_eq!(buffer.contents(), "7\n");
    /// ```
    #[must_use]
    pub fn with_output(mut self, out: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> InterpreterConfig {
        self.config
    }

    /// Runs a whole program and returns its exit status.
    ///
    /// Functions, structs and enums are registered first, so they may be
    /// used before their declaration. The remaining top-level statements then
    /// run in order, and finally `main` is called if it is bound to a
    /// function.
    ///
    /// The status is `main`'s integer return value if it has one, `1` if a
    /// thrown value was never caught, and `0` otherwise.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] if output cannot be written or the call
    /// depth limit is exceeded.
    pub fn interpret(&mut self, program: &Program) -> EvalResult<i32> {
        debug!(declarations = program.declarations.len(), "program start");

        for statement in &program.declarations {
            self.register_declaration(statement);
        }

        for statement in &program.declarations {
            if is_declaration(statement) {
                continue;
            }

            match self.execute(statement)? {
                Signal::Throw(value, line) => return self.uncaught(&value, line),
                Signal::Return(_) => break,
                Signal::Ok | Signal::Break | Signal::Continue => {},
            }
        }

        let status = match self.env.get("main").cloned() {
            Some(Value::Function(main)) => match self.call_function(&main, Vec::new(), main.span.line) {
                Ok(Value::Int(code)) => i32::try_from(code).unwrap_or(1),
                Ok(_) => 0,
                Err(RuntimeError::Thrown { value, line }) => return self.uncaught(&value, line),
                Err(e) => return Err(e),
            },
            _ => 0,
        };

        self.out.flush()?;
        debug!(status, "program end");

        Ok(status)
    }

    /// Runs a single statement against the persistent global frame, as the
    /// REPL does after each line.
    ///
    /// Declarations register immediately.
    ///
    /// # Errors
    /// Returns [`RuntimeError::Thrown`] for a `throw` nothing caught, and any
    /// host-level failure.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::{
    ///     evaluator::{core::Interpreter, output::OutputBuffer},
    ///     lexer::Lexer,
    ///     parser::Parser,
    /// };
    ///
    /// let buffer = OutputBuffer::new();
    /// let mut interpreter = Interpreter::new().with_output(buffer.clone());
    ///
    /// for line in ["turbo x = 20;", "echo(x + 1);"] {
    ///     let mut parser = Parser::new(Lexer::new(line));
    ///     while let Some(statement) = parser.parse_one_statement().unwrap() {
    ///         interpreter.interpret_statement(&statement).unwrap();
    ///     }
    /// }
    ///
    /// assert_eq!(buffer.contents(), "21\n");
    /// ```
    pub fn interpret_statement(&mut self, statement: &Stmt) -> EvalResult<()> {
        if is_declaration(statement) {
            self.register_declaration(statement);
            return Ok(());
        }

        let signal = self.execute(statement)?;
        self.out.flush()?;

        match signal {
            Signal::Throw(value, line) => Err(RuntimeError::Thrown { value, line }),
            _ => Ok(()),
        }
    }

    /// Binds a function, struct or enum declaration in the global frame.
    /// Other statements are ignored.
    fn register_declaration(&mut self, statement: &Stmt) {
        match statement {
            Stmt::Function(decl) => {
                if let Some(name) = &decl.name {
                    debug!(%name, "register function");
                    self.env.define_global(name, Value::Function(Rc::clone(decl)));
                }
            },
            Stmt::Struct(decl) => {
                debug!(name = %decl.name, "register struct");
                self.env.define_global(&decl.name, Value::StructDef(Rc::clone(decl)));
            },
            Stmt::Enum(decl) => {
                debug!(name = %decl.name, "register enum");
                self.env.define_global(&decl.name, Self::enum_value(decl));
            },
            _ => {},
        }
    }

    /// Reports a thrown value that escaped the program.
    fn uncaught(&mut self, value: &Value, line: usize) -> EvalResult<i32> {
        debug!(line, "uncaught exception");
        self.out.flush()?;
        eprintln!("{}", RuntimeError::Thrown { value: value.clone(),
                                               line });
        Ok(1)
    }
}

/// Returns `true` for statements registered before execution.
const fn is_declaration(statement: &Stmt) -> bool {
    matches!(statement, Stmt::Function(_) | Stmt::Struct(_) | Stmt::Enum(_))
}
