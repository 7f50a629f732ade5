//! Интеграционные тесты: камеры под viewport, disposal, конфиг из JSON

use bevy::math::Mat4;
use scenebind_catalog::object3d::matrix_from_value;
use scenebind_catalog::Catalog;
use scenebind_core::{
    dispose, prepare, update_camera, Props, ReconcileError, ReconcilerConfig, RootState, Size, Value,
};

#[test]
fn test_perspective_camera_follows_viewport() {
    let catalog = Catalog::new();
    let camera = catalog.create("perspectiveCamera").unwrap();

    update_camera(&camera, &Size::new(1920.0, 1080.0)).unwrap();

    let aspect = camera.number("aspect").unwrap();
    assert!((aspect - 1920.0 / 1080.0).abs() < 1e-9);
    let projection = matrix_from_value(&camera.get("projectionMatrix")).unwrap();
    let expected = Mat4::perspective_rh(50f32.to_radians(), aspect as f32, 0.1, 2000.0);
    assert!(projection.abs_diff_eq(expected, 1e-5));
    // updateMatrixWorld тоже отработал
    assert_eq!(camera.get("matrixWorld").as_array().unwrap().len(), 16);
}

#[test]
fn test_minimised_window_keeps_aspect() {
    let catalog = Catalog::new();
    let camera = catalog.create("perspectiveCamera").unwrap();
    camera.set("aspect", 1.5);

    update_camera(&camera, &Size::new(1920.0, 0.0)).unwrap();

    assert_eq!(camera.number("aspect"), Some(1.5));
}

#[test]
fn test_orthographic_camera_follows_viewport() {
    let catalog = Catalog::new();
    let camera = catalog.create("orthographicCamera").unwrap();

    update_camera(&camera, &Size::new(800.0, 600.0)).unwrap();

    assert_eq!(camera.number("left"), Some(-400.0));
    assert_eq!(camera.number("right"), Some(400.0));
    assert_eq!(camera.number("top"), Some(300.0));
    assert_eq!(camera.number("bottom"), Some(-300.0));
    let projection = matrix_from_value(&camera.get("projectionMatrix")).unwrap();
    let expected = Mat4::orthographic_rh(-400.0, 400.0, -300.0, 300.0, 0.1, 2000.0);
    assert!(projection.abs_diff_eq(expected, 1e-6));
}

#[test]
fn test_manual_camera_keeps_projection() {
    let catalog = Catalog::new();
    let camera = catalog.create("orthographicCamera").unwrap();
    camera.set("manual", true);
    let before = camera.get("projectionMatrix");

    update_camera(&camera, &Size::new(800.0, 600.0)).unwrap();

    assert_eq!(camera.number("left"), Some(-1.0));
    assert!(scenebind_core::is::same(&before, &camera.get("projectionMatrix")));
}

#[test]
fn test_dispose_mesh_releases_geometry_and_material() {
    let catalog = Catalog::new();
    let mesh = catalog.create("mesh").unwrap();
    let geometry = mesh.get("geometry").as_object().unwrap().clone();
    let material = mesh.get("material").as_object().unwrap().clone();

    dispose(&mesh).unwrap();

    assert_eq!(geometry.get("disposed").as_bool(), Some(true));
    assert_eq!(material.get("disposed").as_bool(), Some(true));
}

#[test]
fn test_dispose_multi_material_mesh() {
    let catalog = Catalog::new();
    let mesh = catalog.create("mesh").unwrap();
    let materials = [
        catalog.create("meshBasicMaterial").unwrap(),
        catalog.create("meshStandardMaterial").unwrap(),
    ];
    mesh.set("material", Value::array(materials.clone()));

    dispose(&mesh).unwrap();

    for material in &materials {
        assert_eq!(material.get("disposed").as_bool(), Some(true));
    }
}

#[test]
fn test_dispose_scene_is_noop() {
    let catalog = Catalog::new();
    let scene = catalog.create("scene").unwrap();
    let mesh = catalog.create("mesh").unwrap();
    scene.call("add", &[Value::from(&mesh)]).unwrap();

    dispose(&scene).unwrap();

    let geometry = mesh.get("geometry");
    assert_eq!(geometry.as_object().unwrap().get("disposed").as_bool(), Some(false));
}

#[test]
fn test_config_from_json_extends_deny_list() {
    let json = serde_json::json!({
        "non_disposable_types": ["Scene", "Mesh"],
        "disposable_fields": ["geometry"]
    })
    .to_string();
    let config = ReconcilerConfig::from_json(&json).unwrap();
    // Остальные поля: default
    assert!(config.is_reserved("attach"));
    assert!(config.is_event_handler("onPointerDown"));

    let catalog = Catalog::new();
    let root = RootState::new()
        .with_factory(catalog.clone())
        .with_config(config)
        .into_ref();
    let mesh = catalog.create("mesh").unwrap();
    prepare(&mesh, &root, "mesh", Props::new());

    dispose(&mesh).unwrap();
    let geometry = mesh.get("geometry");
    assert_eq!(geometry.as_object().unwrap().get("disposed").as_bool(), Some(false));

    let other_mesh = catalog.create("mesh").unwrap();
    let other_root = RootState::new()
        .with_config(ReconcilerConfig::from_json(r#"{"disposable_fields": ["geometry"]}"#).unwrap())
        .into_ref();
    prepare(&other_mesh, &other_root, "mesh", Props::new());
    dispose(&other_mesh).unwrap();
    let geometry = other_mesh.get("geometry");
    let material = other_mesh.get("material");
    assert_eq!(geometry.as_object().unwrap().get("disposed").as_bool(), Some(true));
    assert_eq!(material.as_object().unwrap().get("disposed").as_bool(), Some(false));
}

#[test]
fn test_invalid_config_is_reported() {
    let err = ReconcilerConfig::from_json(r#"{"reserved_props": 42}"#).unwrap_err();
    assert!(matches!(err, ReconcileError::Config(_)));
}
