use std::cell::RefCell;

use crate::interpreter::value::core::Value;

/// A struct instance: a named record of fields.
///
/// Instances are held behind an `Rc`, and fields behind a `RefCell`, so that
/// assignment through one alias is visible through all of them.
#[derive(Debug, PartialEq)]
pub struct StructInstance {
    /// The struct (or enum) name, reported by `typeof`.
    pub name:   String,
    /// Fields in declaration order.
    pub fields: RefCell<Vec<(String, Value)>>,
}

impl StructInstance {
    /// Creates an instance with the given fields.
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self { name:   name.into(),
               fields: RefCell::new(fields), }
    }

    /// Reads a field, or `None` if the instance has no such field.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::value::{core::Value, instance::StructInstance};
    ///
    /// let point = StructInstance::new("Point", vec![("x".to_string(), Value::int(1))]);
    ///
    /// assert_eq!(point.get("x"), Some(Value::int(1)));
    /// assert_eq!(point.get("y"), None);
    /// ```
    #[must_use]
    pub fn get(&self, field: &str) -> Option<Value> {
        self.fields
            .borrow()
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.clone())
    }

    /// Writes a field, appending it if the instance does not have it yet.
    pub fn set(&self, field: &str, value: Value) {
        let mut fields = self.fields.borrow_mut();

        if let Some(slot) = fields.iter_mut().find(|(name, _)| name == field) {
            slot.1 = value;
        } else {
            fields.push((field.to_string(), value));
        }
    }
}
