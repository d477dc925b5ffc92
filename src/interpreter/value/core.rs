use std::{cell::RefCell, cmp::Ordering, rc::Rc};

use crate::{
    ast::{FunctionDecl, Literal, StructDecl},
    interpreter::value::instance::StructInstance,
    util::num::int_to_float,
};

/// A shared, mutable array buffer.
///
/// Cloning an array `Value` clones the handle, never the elements, so every
/// alias observes in-place mutation. The buffer is freed when the last handle
/// is dropped.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Represents a runtime value in the interpreter.
///
/// The language is dynamically typed: every expression evaluates to one of
/// these variants, and operations on mismatched kinds produce
/// [`Value::Null`] rather than an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence of a value, and the result of every failed operation.
    #[default]
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A 64-bit signed integer. Arithmetic wraps on overflow.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// An owned string.
    Str(String),
    /// A shared array; see [`ArrayRef`].
    Array(ArrayRef),
    /// A language-level function. Shares its declaration with the AST.
    Function(Rc<FunctionDecl>),
    /// The value bound to a struct's name by its declaration.
    StructDef(Rc<StructDecl>),
    /// A shared struct instance, also used for enum namespaces.
    Instance(Rc<StructInstance>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Integer(i) => Self::Int(*i),
            Literal::Float(f) => Self::Float(*f),
            Literal::String(s) => Self::Str(s.clone()),
            Literal::Bool(b) => Self::Bool(*b),
            Literal::Null => Self::Null,
        }
    }
}

impl Value {
    /// Creates `null`.
    #[must_use]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Creates a boolean value.
    #[must_use]
    pub const fn bool(value: bool) -> Self {
        Self::Bool(value)
    }

    /// Creates an integer value.
    #[must_use]
    pub const fn int(value: i64) -> Self {
        Self::Int(value)
    }

    /// Creates a float value.
    #[must_use]
    pub const fn float(value: f64) -> Self {
        Self::Float(value)
    }

    /// Creates a string value, copying `value`.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Creates an empty array with room for `capacity` elements.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::value::core::Value;
    ///
    /// let array = Value::array_with_capacity(2);
    /// assert!(array.array_push(Value::int(1)));
    /// assert!(array.array_push(Value::string("two")));
    ///
    /// assert_eq!(array.to_string(), r#"[1,"two"]"#);
    /// ```
    #[must_use]
    pub fn array_with_capacity(capacity: usize) -> Self {
        Self::Array(Rc::new(RefCell::new(Vec::with_capacity(capacity))))
    }

    /// Appends `value` to an array in place.
    ///
    /// Returns `false`, leaving `self` untouched, if `self` is not an array.
    pub fn array_push(&self, value: Self) -> bool {
        match self {
            Self::Array(items) => {
                items.borrow_mut().push(value);
                true
            },
            _ => false,
        }
    }

    /// Returns `true` if the value is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Tests the value in a condition.
    ///
    /// `null`, `false`, `0`, `0.0` and `""` are falsy; everything else,
    /// including empty arrays, is truthy.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::value::core::Value;
    ///
    /// assert!(!Value::int(0).is_truthy());
    /// assert!(!Value::string("").is_truthy());
    /// assert!(Value::array_with_capacity(0).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Array(_) | Self::Function(_) | Self::StructDef(_) | Self::Instance(_) => true,
        }
    }

    /// The name `typeof` reports for this value.
    ///
    /// Struct instances report their struct's name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Function(_) => "function",
            Self::StructDef(_) => "struct",
            Self::Instance(instance) => &instance.name,
        }
    }

    /// Returns the integer, if the value is one.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float, promoting integers.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(int_to_float(*i)),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string contents, if the value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the array handle, if the value is an array.
    #[must_use]
    pub const fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Language-level equality, as used by `==` and `!=`.
    ///
    /// Scalars and strings compare by value, with integers and floats
    /// compared numerically. Arrays, instances, functions and struct
    /// definitions compare by identity. Values of different kinds are never
    /// equal.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::value::core::Value;
    ///
    /// let a = Value::from(vec![Value::int(1)]);
    /// let b = Value::from(vec![Value::int(1)]);
    ///
    /// assert!(Value::int(2).equals(&Value::float(2.0)));
    /// assert!(a.equals(&a.clone()));
    /// assert!(!a.equals(&b));
    /// ```
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        use Value::{Array, Bool, Float, Function, Instance, Int, Null, Str, StructDef};

        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => int_to_float(*a) == *b,
            (Str(a), Str(b)) => a == b,
            (Array(a), Array(b)) => Rc::ptr_eq(a, b),
            (Function(a), Function(b)) => Rc::ptr_eq(a, b),
            (StructDef(a), StructDef(b)) => Rc::ptr_eq(a, b),
            (Instance(a), Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Orders two numbers or two strings.
    ///
    /// Returns `None` for any other pairing, and for comparisons involving
    /// NaN.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            _ => self.as_number()?.partial_cmp(&other.as_number()?),
        }
    }
}
