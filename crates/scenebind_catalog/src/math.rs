//! Math value-классы: Vector2, Vector3, Euler
//!
//! Компоненты: обычные числовые поля (`x`, `y`, `z`), чтобы pierced пути
//! (`position-x`) резолвились в них напрямую.

use std::rc::Rc;

use bevy::math::{EulerRot, Quat, Vec3};
use scenebind_core::{Class, ObjectRef, ReconcileError, Value};

use crate::Catalog;

const XY: [&str; 2] = ["x", "y"];
const XYZ: [&str; 3] = ["x", "y", "z"];

/// Позиционный `set`: отсутствующие аргументы оставляют компонент как есть
fn set_components(this: &ObjectRef, axes: &[&str], args: &[Value]) {
    for (axis, arg) in axes.iter().zip(args) {
        if let Some(n) = arg.as_number() {
            this.set(*axis, n);
        }
    }
}

fn set_scalar(this: &ObjectRef, axes: &[&str], args: &[Value]) {
    let n = args.first().and_then(Value::as_number).unwrap_or(0.0);
    for axis in axes {
        this.set(*axis, n);
    }
}

fn copy_components(this: &ObjectRef, axes: &[&str], args: &[Value]) {
    let Some(Value::Object(source)) = args.first() else {
        return;
    };
    for axis in axes {
        if let Some(n) = source.number(axis) {
            this.set(*axis, n);
        }
    }
}

/// Новый объект того же класса с теми же компонентами
fn clone_components(this: &ObjectRef, axes: &[&str]) -> Result<Value, ReconcileError> {
    let class = this
        .class()
        .ok_or_else(|| ReconcileError::method("<plain>", "clone", "receiver has no class"))?;
    let copy = ObjectRef::with_class(&class);
    for axis in axes {
        copy.set(*axis, this.get(axis));
    }
    Ok(Value::Object(copy))
}

fn vector_class(name: &str, axes: &'static [&'static str]) -> Rc<Class> {
    Class::builder(name)
        .method("set", move |this, args| {
            set_components(this, axes, args);
            Ok(Value::Undefined)
        })
        .method("setScalar", move |this, args| {
            set_scalar(this, axes, args);
            Ok(Value::Undefined)
        })
        .method("copy", move |this, args| {
            copy_components(this, axes, args);
            Ok(Value::Undefined)
        })
        .method("clone", move |this, _| clone_components(this, axes))
        .build()
}

pub(crate) fn vector3_class() -> Rc<Class> {
    vector_class("Vector3", &XYZ)
}

// Euler без setScalar: число уходит в set(x)
pub(crate) fn euler_class() -> Rc<Class> {
    Class::builder("Euler")
        .method("set", |this, args| {
            set_components(this, &XYZ, args);
            if let Some(order) = args.get(3).and_then(Value::as_str) {
                this.set("order", order);
            }
            Ok(Value::Undefined)
        })
        .method("copy", |this, args| {
            copy_components(this, &XYZ, args);
            if let Some(Value::Object(source)) = args.first() {
                if let Some(order) = source.get("order").as_str() {
                    this.set("order", order);
                }
            }
            Ok(Value::Undefined)
        })
        .build()
}

pub(crate) fn register(catalog: &mut Catalog) {
    catalog.register(vector_class("Vector2", &XY), |_, object| {
        for axis in XY {
            object.set(axis, 0.0);
        }
    });
    catalog.register(catalog.vector3.clone(), |_, object| {
        for axis in XYZ {
            object.set(axis, 0.0);
        }
    });
    catalog.register(catalog.euler.clone(), |_, object| {
        for axis in XYZ {
            object.set(axis, 0.0);
        }
        object.set("order", "XYZ");
    });
}

/// Vector3-поле объекта как bevy Vec3 (нет поля: `fallback`)
pub fn read_vec3(object: &ObjectRef, key: &str, fallback: Vec3) -> Vec3 {
    let Value::Object(v) = object.get(key) else {
        return fallback;
    };
    let component = |axis: &str, default: f32| v.number(axis).map_or(default, |n| n as f32);
    Vec3::new(
        component("x", fallback.x),
        component("y", fallback.y),
        component("z", fallback.z),
    )
}

/// Euler-поле как кватернион. Поддерживаются все шесть порядков осей.
pub fn read_rotation(object: &ObjectRef, key: &str) -> Quat {
    let Value::Object(euler) = object.get(key) else {
        return Quat::IDENTITY;
    };
    let angle = |axis: &str| euler.number(axis).unwrap_or(0.0) as f32;
    let (x, y, z) = (angle("x"), angle("y"), angle("z"));
    let order = euler.get("order");
    match order.as_str().unwrap_or("XYZ") {
        "XZY" => Quat::from_euler(EulerRot::XZY, x, z, y),
        "YXZ" => Quat::from_euler(EulerRot::YXZ, y, x, z),
        "YZX" => Quat::from_euler(EulerRot::YZX, y, z, x),
        "ZXY" => Quat::from_euler(EulerRot::ZXY, z, x, y),
        "ZYX" => Quat::from_euler(EulerRot::ZYX, z, y, x),
        _ => Quat::from_euler(EulerRot::XYZ, x, y, z),
    }
}

impl Catalog {
    pub fn vector3(&self, x: f64, y: f64, z: f64) -> ObjectRef {
        let v = self.instantiate(&self.vector3);
        v.set("x", x);
        v.set("y", y);
        v.set("z", z);
        v
    }

    pub fn euler(&self, x: f64, y: f64, z: f64) -> ObjectRef {
        let e = self.instantiate(&self.euler);
        e.set("x", x);
        e.set("y", y);
        e.set("z", z);
        e
    }
}
