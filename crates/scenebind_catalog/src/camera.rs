//! Камеры: Camera → PerspectiveCamera / OrthographicCamera
//!
//! `updateProjectionMatrix` пишет `projectionMatrix` (16 чисел, column-major)
//! из текущих полей, как это делает `scenebind_core::update_camera` после resize.

use std::rc::Rc;

use bevy::math::Mat4;
use scenebind_core::{Class, ObjectRef, ReconcileError, Value};

use crate::object3d::{init_object3d, matrix_to_value};
use crate::Catalog;

fn field(object: &ObjectRef, key: &str, default: f64) -> f32 {
    object.number(key).unwrap_or(default) as f32
}

fn perspective_projection(this: &ObjectRef, _: &[Value]) -> Result<Value, ReconcileError> {
    let zoom = field(this, "zoom", 1.0).max(f32::EPSILON);
    let half_fov = field(this, "fov", 50.0).to_radians() / 2.0;
    let fov = 2.0 * (half_fov.tan() / zoom).atan();
    let aspect = field(this, "aspect", 1.0);
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(ReconcileError::method(
            "PerspectiveCamera",
            "updateProjectionMatrix",
            format!("invalid aspect {}", aspect),
        ));
    }
    let projection = Mat4::perspective_rh(fov, aspect, field(this, "near", 0.1), field(this, "far", 2000.0));
    this.set("projectionMatrix", matrix_to_value(projection));
    Ok(Value::Undefined)
}

fn orthographic_projection(this: &ObjectRef, _: &[Value]) -> Result<Value, ReconcileError> {
    let zoom = field(this, "zoom", 1.0).max(f32::EPSILON);
    let projection = Mat4::orthographic_rh(
        field(this, "left", -1.0) / zoom,
        field(this, "right", 1.0) / zoom,
        field(this, "bottom", -1.0) / zoom,
        field(this, "top", 1.0) / zoom,
        field(this, "near", 0.1),
        field(this, "far", 2000.0),
    );
    this.set("projectionMatrix", matrix_to_value(projection));
    Ok(Value::Undefined)
}

fn init_camera(catalog: &Catalog, object: &ObjectRef) {
    init_object3d(catalog, object);
    object.set("projectionMatrix", matrix_to_value(Mat4::IDENTITY));
    object.set("near", 0.1);
    object.set("far", 2000.0);
    object.set("zoom", 1.0);
}

pub(crate) fn register(catalog: &mut Catalog, object3d: &Rc<Class>) {
    let camera = Class::builder("Camera").extends(object3d).build();
    catalog.register(camera.clone(), init_camera);

    let perspective = Class::builder("PerspectiveCamera")
        .extends(&camera)
        .method("updateProjectionMatrix", perspective_projection)
        .build();
    catalog.register(perspective, |catalog, object| {
        init_camera(catalog, object);
        object.set("fov", 50.0);
        object.set("aspect", 1.0);
        let _ = perspective_projection(object, &[]);
    });

    let orthographic = Class::builder("OrthographicCamera")
        .extends(&camera)
        .method("updateProjectionMatrix", orthographic_projection)
        .build();
    catalog.register(orthographic, |catalog, object| {
        init_camera(catalog, object);
        for (key, value) in [("left", -1.0), ("right", 1.0), ("top", 1.0), ("bottom", -1.0)] {
            object.set(key, value);
        }
        let _ = orthographic_projection(object, &[]);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object3d::matrix_from_value;

    #[test]
    fn test_perspective_projection_follows_aspect() {
        let catalog = Catalog::new();
        let camera = catalog.create("perspectiveCamera").unwrap();
        camera.set("aspect", 2.0);
        camera.call("updateProjectionMatrix", &[]).unwrap();

        let projection = matrix_from_value(&camera.get("projectionMatrix")).unwrap();
        let expected = Mat4::perspective_rh(50f32.to_radians(), 2.0, 0.1, 2000.0);
        assert!(projection.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_perspective_rejects_zero_aspect() {
        let catalog = Catalog::new();
        let camera = catalog.create("perspectiveCamera").unwrap();
        camera.set("aspect", 0.0);
        assert!(camera.call("updateProjectionMatrix", &[]).is_err());
    }

    #[test]
    fn test_orthographic_projection_maps_frustum_corners() {
        let catalog = Catalog::new();
        let camera = catalog.create("orthographicCamera").unwrap();
        camera.set("right", 10.0);
        camera.call("updateProjectionMatrix", &[]).unwrap();

        let projection = matrix_from_value(&camera.get("projectionMatrix")).unwrap();
        let corner = projection.project_point3(bevy::math::Vec3::new(10.0, 1.0, -0.1));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_camera_inherits_object3d_methods() {
        let catalog = Catalog::new();
        let camera = catalog.create("perspectiveCamera").unwrap();
        assert!(camera.has_method("updateMatrixWorld"));
        assert!(camera.has("position"));
        assert!(!scenebind_core::is_orthographic_camera(&camera));
    }
}
