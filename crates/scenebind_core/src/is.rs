//! Type predicates и configurable equality.
//!
//! Никаких паник, несовпадение типов даёт просто `false`.

use serde::{Deserialize, Serialize};

use crate::model::Value;

pub fn fun(value: &Value) -> bool {
    matches!(value, Value::Function(_))
}

/// Объект (не массив, не функция)
pub fn obj(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

pub fn str(value: &Value) -> bool {
    matches!(value, Value::Str(_))
}

pub fn num(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

pub fn boo(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

pub fn und(value: &Value) -> bool {
    matches!(value, Value::Undefined)
}

pub fn arr(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::Str(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) | Value::Function(_) => true,
    }
}

/// `Object.is`-style identity: NaN равен NaN, +0 не равен -0, объекты сравниваются по указателю
pub fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan()),
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => x.ptr_eq(y),
        (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compare {
    #[default]
    Reference,
    Shallow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquOptions {
    pub objects: Compare,
    pub arrays: Compare,
    /// `false` включает prefix/subset match: всё из `a` должно совпасть в `b`, у `b` могут быть лишние
    pub strict: bool,
}

impl Default for EquOptions {
    fn default() -> Self {
        Self {
            objects: Compare::Reference,
            arrays: Compare::Shallow,
            strict: true,
        }
    }
}

pub fn equ(a: &Value, b: &Value, options: &EquOptions) -> bool {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            if options.arrays == Compare::Reference {
                return false;
            }
            let (xs, ys) = (x.to_vec(), y.to_vec());
            if xs.len() > ys.len() || (options.strict && xs.len() != ys.len()) {
                return false;
            }
            xs.iter().zip(ys.iter()).all(|(l, r)| same(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            // Shallow сравнение только для plain objects; у классовых: identity
            if options.objects == Compare::Reference || !x.is_plain() || !y.is_plain() {
                return false;
            }
            let keys = x.keys();
            if options.strict && keys.len() != y.len() {
                return false;
            }
            let nested = EquOptions {
                objects: Compare::Reference,
                ..*options
            };
            keys.iter()
                .all(|key| y.has(key) && equ(&x.get(key), &y.get(key), &nested))
        }
        _ => same(a, b),
    }
}
