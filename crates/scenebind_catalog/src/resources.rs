//! Owned GPU-ресурсы: geometries и materials
//!
//! `dispose` только помечает объект (`disposed = true`): реального GPU
//! ресурса тут нет, host смотрит на флаг.

use scenebind_core::{log, Class, ObjectRef, ReconcileError, Value};

use crate::Catalog;

fn mark_disposed(this: &ObjectRef, _: &[Value]) -> Result<Value, ReconcileError> {
    log(&format!("dispose <{}>", this.class_name().unwrap_or_default()));
    this.set("disposed", true);
    Ok(Value::Undefined)
}

fn init_resource(object: &ObjectRef) {
    object.set("name", "");
    object.set("type", object.class_name().unwrap_or_default());
    object.set("disposed", false);
}

fn init_geometry(_: &Catalog, object: &ObjectRef) {
    init_resource(object);
    object.set("attributes", ObjectRef::plain());
}

fn init_material(_: &Catalog, object: &ObjectRef) {
    init_resource(object);
    object.set("opacity", 1.0);
    object.set("transparent", false);
    object.set("visible", true);
    object.set("side", 0);
}

pub(crate) fn register(catalog: &mut Catalog) {
    let buffer_geometry = Class::builder("BufferGeometry")
        .method("dispose", mark_disposed)
        .build();
    catalog.register(buffer_geometry.clone(), init_geometry);

    let box_geometry = Class::builder("BoxGeometry").extends(&buffer_geometry).build();
    catalog.register(box_geometry, |catalog, object| {
        init_geometry(catalog, object);
        object.set("width", 1.0);
        object.set("height", 1.0);
        object.set("depth", 1.0);
    });

    let material = Class::builder("Material").method("dispose", mark_disposed).build();
    catalog.register(material.clone(), init_material);

    let basic = Class::builder("MeshBasicMaterial").extends(&material).build();
    catalog.register(basic, |catalog, object| {
        init_material(catalog, object);
        object.set("color", catalog.color_hex(0xffffff));
        object.set("map", Value::Null);
        object.set("wireframe", false);
    });

    let standard = Class::builder("MeshStandardMaterial").extends(&material).build();
    catalog.register(standard, |catalog, object| {
        init_material(catalog, object);
        object.set("color", catalog.color_hex(0xffffff));
        object.set("emissive", catalog.color_hex(0x000000));
        object.set("roughness", 1.0);
        object.set("metalness", 0.0);
        object.set("map", Value::Null);
        object.set("wireframe", false);
    });
}
