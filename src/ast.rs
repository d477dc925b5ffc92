use std::rc::Rc;

/// A source position attached to every node for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// 1-based line number.
    pub line:   usize,
    /// 1-based column number.
    pub column: usize,
}

impl Span {
    /// Creates a span from a line and a column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A declared type annotation.
///
/// Attached to variable declarations, struct fields and function parameters.
/// The interpreter is dynamically typed, so annotations are carried along for
/// tooling but never checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// The type name as written, or `turbo` for inferred declarations.
    pub name:     String,
    /// Whether the type was written with a trailing `[]`.
    pub is_array: bool,
    /// Whether the declaration used the `turbo` keyword.
    pub is_turbo: bool,
}

impl TypeInfo {
    /// The annotation used by `turbo` declarations.
    ///
    /// ## Example
    /// ```
    /// use blast::ast::TypeInfo;
    ///
    /// let info = TypeInfo::turbo();
    /// assert!(info.is_turbo);
    /// assert_eq!(info.name, "turbo");
    /// ```
    #[must_use]
    pub fn turbo() -> Self {
        Self { name:     "turbo".to_string(),
               is_array: false,
               is_turbo: true, }
    }

    /// An explicitly named annotation such as `int` or `Point[]`.
    #[must_use]
    pub fn named(name: impl Into<String>, is_array: bool) -> Self {
        Self { name: name.into(),
               is_array,
               is_turbo: false }
    }
}

/// Represents a literal value written directly in source code.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// A string or character literal, with escapes already decoded.
    String(String),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Short-circuiting logical and (`&&`)
    And,
    /// Short-circuiting logical or (`||`)
    Or,
    /// Half-open range (`..`), only iterated by `cruise`.
    Range,
}

/// Represents a prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical not (`!x`).
    Not,
}

/// The access performed by an optional chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainAccess {
    /// `object?.name`
    Member(String),
    /// `object?.[index]`
    Index(Box<Expr>),
}

/// An expression node.
///
/// Every variant owns its children; function expressions share their
/// declaration with the function values created from them.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: Literal,
        /// Source position.
        span:  Span,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Source position.
        span: Span,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Source position of the operator.
        span:  Span,
    },
    /// A prefix operation.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Self>,
        /// Source position of the operator.
        span:    Span,
    },
    /// `typeof operand`
    TypeOf {
        /// The inspected expression.
        operand: Box<Self>,
        /// Source position.
        span:    Span,
    },
    /// A call such as `add(1, 2)` or `array.map(xs, f)`.
    Call {
        /// The callee expression.
        callee:    Box<Self>,
        /// Argument expressions in source order.
        arguments: Vec<Self>,
        /// Source position of the opening parenthesis.
        span:      Span,
    },
    /// Assignment to an identifier, index or member target.
    Assign {
        /// The assignment target.
        target: Box<Self>,
        /// The assigned value.
        value:  Box<Self>,
        /// Source position of `=`.
        span:   Span,
    },
    /// `object[index]`
    Index {
        /// The indexed expression.
        object: Box<Self>,
        /// The index expression.
        index:  Box<Self>,
        /// Source position of `[`.
        span:   Span,
    },
    /// `object.name` or `object::name`
    Member {
        /// The accessed expression.
        object: Box<Self>,
        /// The member name.
        name:   String,
        /// Source position of the member name.
        span:   Span,
    },
    /// `Name { field: value, ... }`
    StructLiteral {
        /// The struct name.
        name:   String,
        /// Field initialisers in source order.
        fields: Vec<(String, Self)>,
        /// Source position.
        span:   Span,
    },
    /// `[a, b, ...rest]`
    ArrayLiteral {
        /// Elements, possibly containing `Spread` nodes.
        elements: Vec<Self>,
        /// Source position.
        span:     Span,
    },
    /// `...operand`
    Spread {
        /// The spread expression.
        operand: Box<Self>,
        /// Source position.
        span:    Span,
    },
    /// `object?.name` or `object?.[index]`
    OptionalChain {
        /// The guarded expression.
        object: Box<Self>,
        /// The access applied when the object is not null.
        access: ChainAccess,
        /// Source position.
        span:   Span,
    },
    /// `left ?? right`
    NullishCoalescing {
        /// The preferred value.
        left:  Box<Self>,
        /// The fallback, evaluated only when `left` is null.
        right: Box<Self>,
        /// Source position of `??`.
        span:  Span,
    },
    /// An anonymous `blast(params) { body }` expression.
    Function {
        /// The shared declaration.
        decl: Rc<FunctionDecl>,
        /// Source position.
        span: Span,
    },
}

impl Expr {
    /// Gets the source position of `self`.
    ///
    /// ## Example
    /// ```
    /// use blast::ast::{Expr, Span};
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               span: Span::new(5, 3), };
    ///
    /// assert_eq!(expr.span(), Span::new(5, 3));
    /// ```
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Literal { span, .. }
            | Self::Identifier { span, .. }
            | Self::Binary { span, .. }
            | Self::Unary { span, .. }
            | Self::TypeOf { span, .. }
            | Self::Call { span, .. }
            | Self::Assign { span, .. }
            | Self::Index { span, .. }
            | Self::Member { span, .. }
            | Self::StructLiteral { span, .. }
            | Self::ArrayLiteral { span, .. }
            | Self::Spread { span, .. }
            | Self::OptionalChain { span, .. }
            | Self::NullishCoalescing { span, .. }
            | Self::Function { span, .. } => *span,
        }
    }

    /// Returns `true` if the expression may appear on the left of `=`.
    #[must_use]
    pub const fn is_assignable(&self) -> bool {
        matches!(self,
                 Self::Identifier { .. } | Self::Index { .. } | Self::Member { .. })
    }
}

/// A single function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The parameter name.
    pub name:      String,
    /// The optional declared type.
    pub type_info: Option<TypeInfo>,
}

/// A function declaration, named or anonymous.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The function name; anonymous functions have `None`.
    pub name:        Option<String>,
    /// Declared parameters.
    pub params:      Vec<Parameter>,
    /// The optional `-> type` annotation.
    pub return_type: Option<TypeInfo>,
    /// Statements of the body block.
    pub body:        Vec<Stmt>,
    /// Whether the declaration was prefixed with `async`.
    pub is_async:    bool,
    /// Source position of the declaration.
    pub span:        Span,
}

/// A field of a struct declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    /// The field name.
    pub name:      String,
    /// The optional declared type.
    pub type_info: Option<TypeInfo>,
}

/// A `struct` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// The struct name.
    pub name:   String,
    /// Declared fields in order.
    pub fields: Vec<StructField>,
    /// Source position.
    pub span:   Span,
}

/// An `enum` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    /// The enum name.
    pub name:     String,
    /// Variants with their optional explicit values.
    pub variants: Vec<(String, Option<i64>)>,
    /// Source position.
    pub span:     Span,
}

/// One slot of an array destructuring pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternElement {
    /// Binds the element at this position.
    Bind(String),
    /// `_`, ignores the element at this position.
    Skip,
    /// `...name`, binds the remaining elements as a new array.
    Rest(String),
}

/// The target of a variable declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// A plain name.
    Identifier(String),
    /// `[a, _, ...rest]`
    Array(Vec<PatternElement>),
    /// `{x, y}`
    Struct(Vec<String>),
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression.
        expr: Expr,
        /// Source position.
        span: Span,
    },
    /// `echo a, b;`
    Echo {
        /// The printed values, separated by a space on output.
        values: Vec<Expr>,
        /// Source position.
        span:   Span,
    },
    /// `return value;`
    Return {
        /// The optional returned value.
        value: Option<Expr>,
        /// Source position.
        span:  Span,
    },
    /// `break;`
    Break {
        /// Source position.
        span: Span,
    },
    /// `continue;`
    Continue {
        /// Source position.
        span: Span,
    },
    /// `{ ... }`
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
        /// Source position.
        span:       Span,
    },
    /// `if`, with `elif` chains already nested into `else_branch`.
    If {
        /// The condition.
        condition:   Expr,
        /// Executed when the condition is truthy.
        then_branch: Box<Self>,
        /// Executed otherwise.
        else_branch: Option<Box<Self>>,
        /// Source position.
        span:        Span,
    },
    /// `loop (condition) body`; a missing condition loops forever.
    Loop {
        /// The loop condition.
        condition: Option<Expr>,
        /// The loop body.
        body:      Box<Self>,
        /// Source position.
        span:      Span,
    },
    /// `cruise (variable in iterable) body`
    Cruise {
        /// The loop variable.
        variable: String,
        /// The iterated expression.
        iterable: Expr,
        /// The loop body.
        body:     Box<Self>,
        /// Source position.
        span:     Span,
    },
    /// `try { } catch (name) { } finally { }`
    Try {
        /// The guarded block.
        body:         Box<Self>,
        /// The name bound to a thrown value.
        catch_name:   Option<String>,
        /// The handler block.
        catch_body:   Option<Box<Self>>,
        /// The block that always runs.
        finally_body: Option<Box<Self>>,
        /// Source position.
        span:         Span,
    },
    /// `throw value;`
    Throw {
        /// The thrown value.
        value: Expr,
        /// Source position.
        span:  Span,
    },
    /// `turbo x = value;` or `int[] xs = value;`
    VarDecl {
        /// The declared type.
        type_info:   TypeInfo,
        /// The bound name or destructuring pattern.
        target:      Pattern,
        /// The optional initialiser.
        initializer: Option<Expr>,
        /// Source position.
        span:        Span,
    },
    /// A named function declaration.
    Function(Rc<FunctionDecl>),
    /// A struct declaration.
    Struct(Rc<StructDecl>),
    /// An enum declaration.
    Enum(EnumDecl),
    /// `import path;`
    Import {
        /// The imported module path.
        path: String,
        /// Source position.
        span: Span,
    },
}

impl Stmt {
    /// Gets the source position of `self`.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Expression { span, .. }
            | Self::Echo { span, .. }
            | Self::Return { span, .. }
            | Self::Break { span }
            | Self::Continue { span }
            | Self::Block { span, .. }
            | Self::If { span, .. }
            | Self::Loop { span, .. }
            | Self::Cruise { span, .. }
            | Self::Try { span, .. }
            | Self::Throw { span, .. }
            | Self::VarDecl { span, .. }
            | Self::Import { span, .. } => *span,
            Self::Function(decl) => decl.span,
            Self::Struct(decl) => decl.span,
            Self::Enum(decl) => decl.span,
        }
    }
}

/// The root of a parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level declarations in source order.
    pub declarations: Vec<Stmt>,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Range, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            And => "&&",
            Or => "||",
            Range => "..",
        };
        write!(f, "{operator}")
    }
}
