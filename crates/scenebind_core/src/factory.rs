//! Default-instance factory: внешний type registry (каталог классов).
//!
//! Используется для восстановления удалённых props (hot reload) и для
//! auto-construction отсутствующих вложенных объектов в pierced путях.

use crate::model::ObjectRef;

pub trait InstanceFactory {
    /// Свежий default-объект типа `type_name`.
    ///
    /// Принимает element-style (`"mesh"`, `"meshStandardMaterial"`) и class-style
    /// (`"Mesh"`) имена. `""` (primitive): всегда `None`.
    fn construct(&self, type_name: &str) -> Option<ObjectRef>;
}

/// `meshStandardMaterial` → `MeshStandardMaterial`
pub fn pascal_case(type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
