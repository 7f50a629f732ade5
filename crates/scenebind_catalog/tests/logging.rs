//! Логи reconciler'а через `MemoryLogger`
//!
//! Отдельный test binary: глобальный sink ставится один раз и не делится
//! с другими тестами.

use scenebind_catalog::Catalog;
use scenebind_core::logger::{set_log_level, set_logger, MemoryLogger};
use scenebind_core::{
    apply_props, attach, prepare, LogLevel, ObjectRef, Props, ReconcileError, RootState, Value,
};

#[test]
fn test_reconcile_reports_through_installed_logger() {
    let memory = MemoryLogger::new();
    set_logger(Box::new(memory.clone()));
    set_log_level(LogLevel::Debug);

    let catalog = Catalog::new();
    let root = RootState::new().with_factory(catalog.clone()).into_ref();

    // Неизвестный цвет: warning, цвет не меняется
    let mesh = catalog.create("mesh").unwrap();
    prepare(&mesh, &root, "mesh", Props::new());
    apply_props(&mesh, &Props::new().with("material-color", "blurple")).unwrap();
    assert!(memory.contains("[WARNING]"));
    assert!(memory.contains("unknown colour 'blurple'"));

    // Путь упёрся в примитив: debug-строка, поля не появилось
    apply_props(&mesh, &Props::new().with("name-first", "hull")).unwrap();
    assert!(memory.contains("'name-first' blocked"));
    assert!(!mesh.has("name-first"));

    // Упавший mount: error-строка + ошибка наружу
    let parent_object = ObjectRef::plain();
    let parent = prepare(&parent_object, &root, "", Props::new());
    let child_object = ObjectRef::plain();
    let mount = Value::function(|_| Err(ReconcileError::Callback("no slot".into())));
    let child = prepare(&child_object, &root, "", Props::new().with("attach", mount));

    assert!(attach(&parent, &child).is_err());
    let errors: Vec<_> = memory
        .lines()
        .into_iter()
        .filter(|line| line.starts_with("[ERROR]"))
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("mount function failed"));
}
