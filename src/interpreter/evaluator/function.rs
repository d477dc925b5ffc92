/// Array natives: in-place mutation and higher-order helpers that call back
/// into language functions.
pub mod array;
/// Math natives over integers and floats.
pub mod math;
/// String natives and the `str`/`len` conversions.
pub mod string;

/// Call dispatch, user function invocation and the native registry.
pub mod core;
