//! Scene graph узлы: Object3D и наследники (Group, Scene, Mesh)
//!
//! Transform хранится как value-объекты (`position`/`rotation`/`scale`),
//! world matrix пересчитывается по запросу (`updateMatrixWorld`) через bevy `Mat4`.
//! Parent back-reference не хранится: граф владеет детьми только сверху вниз.

use std::rc::Rc;

use bevy::math::{Mat4, Vec3};
use scenebind_core::{ArrayRef, Class, ObjectRef, ReconcileError, Value};

use crate::math::{read_rotation, read_vec3};
use crate::Catalog;

/// Column-major 16 чисел
pub fn matrix_to_value(matrix: Mat4) -> Value {
    Value::array(matrix.to_cols_array().map(f64::from))
}

pub fn matrix_from_value(value: &Value) -> Option<Mat4> {
    let items = value.as_array()?.to_vec();
    if items.len() != 16 {
        return None;
    }
    let mut cols = [0.0f32; 16];
    for (slot, item) in cols.iter_mut().zip(items) {
        *slot = item.as_number()? as f32;
    }
    Some(Mat4::from_cols_array(&cols))
}

pub fn local_matrix(object: &ObjectRef) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        read_vec3(object, "scale", Vec3::ONE),
        read_rotation(object, "rotation"),
        read_vec3(object, "position", Vec3::ZERO),
    )
}

fn children_of(this: &ObjectRef) -> ArrayRef {
    match this.get("children") {
        Value::Array(children) => children,
        _ => {
            let children = ArrayRef::default();
            this.set("children", Value::Array(children.clone()));
            children
        }
    }
}

fn add(this: &ObjectRef, args: &[Value]) -> Result<Value, ReconcileError> {
    let children = children_of(this);
    for arg in args {
        let Value::Object(child) = arg else {
            continue;
        };
        if child.ptr_eq(this) {
            return Err(ReconcileError::method("Object3D", "add", "object can't be added as a child of itself"));
        }
        let already = children
            .borrow()
            .iter()
            .any(|existing| matches!(existing, Value::Object(o) if o.ptr_eq(child)));
        if !already {
            children.push(arg.clone());
        }
    }
    Ok(Value::Object(this.clone()))
}

fn remove(this: &ObjectRef, args: &[Value]) -> Result<Value, ReconcileError> {
    let children = children_of(this);
    for arg in args {
        if let Value::Object(child) = arg {
            children.retain(|existing| !matches!(existing, Value::Object(o) if o.ptr_eq(child)));
        }
    }
    Ok(Value::Object(this.clone()))
}

/// `updateMatrixWorld(parentWorld?)`: world = parent * local, рекурсивно по children
fn update_matrix_world(this: &ObjectRef, args: &[Value]) -> Result<Value, ReconcileError> {
    let parent = args.first().and_then(matrix_from_value).unwrap_or(Mat4::IDENTITY);
    let world = parent * local_matrix(this);
    let world_value = matrix_to_value(world);
    this.set("matrixWorld", world_value.clone());

    for child in children_of(this).to_vec() {
        if let Value::Object(child) = child {
            child.call("updateMatrixWorld", std::slice::from_ref(&world_value))?;
        }
    }
    Ok(Value::Undefined)
}

pub(crate) fn init_object3d(catalog: &Catalog, object: &ObjectRef) {
    object.set("name", "");
    object.set("type", object.class_name().unwrap_or_default());
    object.set("position", catalog.vector3(0.0, 0.0, 0.0));
    object.set("rotation", catalog.euler(0.0, 0.0, 0.0));
    object.set("scale", catalog.vector3(1.0, 1.0, 1.0));
    object.set("visible", true);
    object.set("castShadow", false);
    object.set("receiveShadow", false);
    object.set("children", Value::Array(ArrayRef::default()));
    object.set("userData", ObjectRef::plain());
    object.set("matrixWorld", matrix_to_value(Mat4::IDENTITY));
}

/// Регистрирует Object3D, Group, Scene, Mesh. Возвращает Object3D: базу для камер.
pub(crate) fn register(catalog: &mut Catalog) -> Rc<Class> {
    let object3d = Class::builder("Object3D")
        .method("add", add)
        .method("remove", remove)
        .method("updateMatrixWorld", update_matrix_world)
        .build();
    catalog.register(object3d.clone(), init_object3d);

    let group = Class::builder("Group").extends(&object3d).build();
    catalog.register(group, init_object3d);

    let scene = Class::builder("Scene").extends(&object3d).build();
    catalog.register(scene, |catalog, object| {
        init_object3d(catalog, object);
        object.set("background", Value::Null);
    });

    let mesh = Class::builder("Mesh").extends(&object3d).build();
    catalog.register(mesh, |catalog, object| {
        init_object3d(catalog, object);
        if let Some(geometry) = catalog.create("BufferGeometry") {
            object.set("geometry", geometry);
        }
        if let Some(material) = catalog.create("MeshBasicMaterial") {
            object.set("material", material);
        }
    });

    object3d
}
