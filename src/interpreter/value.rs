/// The `Value` enum and the constructors native code builds values with.
///
/// Covers truthiness, `typeof` names, language-level equality and ordering,
/// and the conversions used by the native bridge.
pub mod core;
/// Struct instance representation.
///
/// Defines `StructInstance`, the shared, mutable record created by struct
/// literals and enum declarations. Instances keep their fields in declaration
/// order so that printing is stable.
pub mod instance;
/// Textual rendering of values for `echo` and `str`.
pub mod display;
