//! Dynamic value model, поверх которого работает reconciler
//!
//! - value: Value, ArrayRef, Callable
//! - class: Class (имя + subtype chain + native методы)
//! - object: ObjectRef (live-объект с скрытым слотом для дескриптора)
//! - props: Props (prop bag с getter entries)

pub mod class;
pub mod object;
pub mod props;
pub mod value;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod model_tests;

pub use class::{Class, ClassBuilder, Method};
pub use object::{Object, ObjectRef, WeakObjectRef};
pub use props::{Getter, PropEntry, Props};
pub use value::{ArrayRef, Callable, Value, MAX_ARRAY_GROWTH};
