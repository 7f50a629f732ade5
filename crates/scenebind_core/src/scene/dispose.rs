//! Best-effort disposal: сам объект + owned sub-resources на один уровень вглубь.
//!
//! Aggregate-контейнеры из deny-list'а (Scene) не трогаем: у их детей свой lifecycle.

use crate::config::ReconcilerConfig;
use crate::error::ReconcileError;
use crate::logger;
use crate::model::{ObjectRef, Value};
use crate::reconcile::instance::config_of;

pub fn dispose(target: &ObjectRef) -> Result<(), ReconcileError> {
    let config = config_of(target);
    if is_non_disposable(target, &config) {
        logger::log(&format!(
            "dispose: skipping aggregate <{}>",
            target.class_name().unwrap_or_default()
        ));
        return Ok(());
    }

    dispose_one(target, &config)?;

    for field in &config.disposable_fields {
        match target.get(field) {
            Value::Object(owned) => dispose_one(&owned, &config)?,
            // Multi-material mesh
            Value::Array(items) => {
                for item in items.to_vec() {
                    if let Value::Object(owned) = item {
                        dispose_one(&owned, &config)?;
                    }
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn dispose_one(target: &ObjectRef, config: &ReconcilerConfig) -> Result<(), ReconcileError> {
    if is_non_disposable(target, config) {
        return Ok(());
    }
    target.call("dispose", &[])?;
    Ok(())
}

fn is_non_disposable(target: &ObjectRef, config: &ReconcilerConfig) -> bool {
    let by_class = target.class().is_some_and(|class| {
        config
            .non_disposable_types
            .iter()
            .any(|name| class.is_named(name))
    });
    let by_type_field = target
        .get("type")
        .as_str()
        .is_some_and(|type_name| config.is_non_disposable(type_name));
    by_class || by_type_field
}
