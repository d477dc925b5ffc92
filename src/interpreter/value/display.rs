use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

use crate::{interpreter::value::core::Value, util::stack::ensure_sufficient_stack};

impl Display for Value {
    /// Renders the value as `echo` prints it.
    ///
    /// Top-level strings print raw; strings nested in arrays or struct fields
    /// are quoted. Arrays print without spaces, as `[3,2,1]`.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::value::core::Value;
    ///
    /// let nested = Value::from(vec![Value::int(1), Value::string("a"), Value::null()]);
    ///
    /// assert_eq!(Value::string("a").to_string(), "a");
    /// assert_eq!(nested.to_string(), r#"[1,"a",null]"#);
    /// assert_eq!(Value::float(2.5).to_string(), "2.5");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            _ => write_nested(self, f, &mut Vec::new()),
        }
    }
}

/// Writes a value in its nested form, quoting strings.
///
/// `open` holds the arrays and instances currently being written. One that
/// contains itself prints as `[...]` or `Name {...}` at the repeat.
fn write_nested(value: &Value, f: &mut Formatter<'_>, open: &mut Vec<*const ()>) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Int(i) => write!(f, "{i}"),
        Value::Float(x) => write!(f, "{x}"),
        Value::Str(s) => write!(f, "{s:?}"),
        Value::Array(items) => {
            let id = Rc::as_ptr(items).cast::<()>();
            if open.contains(&id) {
                return f.write_str("[...]");
            }

            open.push(id);
            f.write_str("[")?;
            for (index, item) in items.borrow().iter().enumerate() {
                if index > 0 {
                    f.write_str(",")?;
                }
                ensure_sufficient_stack(|| write_nested(item, f, open))?;
            }
            open.pop();
            f.write_str("]")
        },
        Value::Function(decl) => match &decl.name {
            Some(name) => write!(f, "<blast {name}>"),
            None => f.write_str("<blast>"),
        },
        Value::StructDef(decl) => write!(f, "<struct {}>", decl.name),
        Value::Instance(instance) => {
            let id = Rc::as_ptr(instance).cast::<()>();
            if open.contains(&id) {
                return write!(f, "{} {{...}}", instance.name);
            }

            open.push(id);
            write!(f, "{} {{", instance.name)?;
            for (index, (name, field)) in instance.fields.borrow().iter().enumerate() {
                f.write_str(if index > 0 { ", " } else { " " })?;
                write!(f, "{name}: ")?;
                ensure_sufficient_stack(|| write_nested(field, f, open))?;
            }
            open.pop();
            f.write_str(" }")
        },
    }
}
