//! Attachment Manager, wiring child объекта в слот parent'а и обратно
//!
//! Директива берётся из `attach` prop'а child'а:
//! - строка (`"material"`, `"material-map"`, `"children-0"`): путь к слоту parent'а
//! - функция `(parent, child) -> unmount | undefined`: кастомный mount
//! - нет директивы: default graph insertion на стороне tree-driver'а (no-op здесь)

use crate::error::ReconcileError;
use crate::logger;
use crate::model::{ArrayRef, Callable, ObjectRef, Value};
use crate::reconcile::instance::{Instance, InstanceRef};
use crate::reconcile::resolve::{is_index, resolve, resolve_or_create, Resolved, PIERCE_DELIMITER};

#[derive(Clone, Debug)]
pub enum AttachDirective {
    Path(String),
    Mount(Callable),
}

impl AttachDirective {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(path) if !path.is_empty() => Some(AttachDirective::Path(path.clone())),
            Value::Function(mount) => Some(AttachDirective::Mount(mount.clone())),
            _ => None,
        }
    }
}

pub fn attach_directive(instance: &Instance) -> Option<AttachDirective> {
    AttachDirective::from_value(&instance.props.get("attach"))
}

fn objects_of(parent: &InstanceRef, child: &InstanceRef) -> Option<(ObjectRef, ObjectRef)> {
    let parent_object = parent.borrow().object()?;
    let child_object = child.borrow().object()?;
    Some((parent_object, child_object))
}

/// Индексный путь (`"children-0"`): контейнер-префикс должен быть массивом.
/// `null`, примитив или объект в слоте заменяются пустым массивом.
fn ensure_array_slot(parent: &ObjectRef, path: &str) {
    if parent.has(path) {
        return;
    }
    let Some((prefix, last)) = path.rsplit_once(PIERCE_DELIMITER) else {
        return;
    };
    if !is_index(last) {
        return;
    }

    let Resolved { root, key, target } = resolve_or_create(parent, prefix);
    if matches!(target, Value::Array(_)) || (key.contains(PIERCE_DELIMITER) && !root.has(&key)) {
        return;
    }
    logger::log(&format!("attach: '{}' holds {}, replaced with []", prefix, target.kind()));
    root.set(&key, Value::Array(ArrayRef::default()));
}

pub fn attach(parent: &InstanceRef, child: &InstanceRef) -> Result<(), ReconcileError> {
    let Some(directive) = attach_directive(&child.borrow()) else {
        return Ok(());
    };
    let Some((parent_object, child_object)) = objects_of(parent, child) else {
        logger::log_warning("attach: parent or child object already released");
        return Ok(());
    };

    match directive {
        AttachDirective::Mount(mount) => {
            // Ошибка mount-функции пробрасывается как есть
            let unmount = mount
                .call(&[Value::Object(parent_object), Value::Object(child_object)])
                .inspect_err(|err| logger::log_error(&format!("attach: mount function failed: {}", err)))?;
            child.borrow_mut().previous_attach = match unmount {
                Value::Function(_) => unmount,
                _ => Value::Undefined,
            };
            logger::log("attach: custom mount");
        }
        AttachDirective::Path(path) => {
            ensure_array_slot(&parent_object, &path);
            let Resolved { root, key, target } = resolve_or_create(&parent_object, &path);
            if key.contains(PIERCE_DELIMITER) && !root.has(&key) {
                logger::log_warning(&format!("attach: '{}' blocked at '{}', skipped", path, key));
                return Ok(());
            }
            // Для индексов нечего восстанавливать: detach чистит слот по индексу
            let previous = if is_index(&key) { Value::Undefined } else { target };
            root.set(&key, Value::Object(child_object));
            child.borrow_mut().previous_attach = previous;
            logger::log(&format!("attach: <{}> → '{}'", child.borrow().type_name, path));
        }
    }

    Ok(())
}

/// Обратная операция к `attach`. Повторный detach: ответственность caller'а.
pub fn detach(parent: &InstanceRef, child: &InstanceRef) -> Result<(), ReconcileError> {
    let Some(directive) = attach_directive(&child.borrow()) else {
        return Ok(());
    };

    match directive {
        AttachDirective::Mount(_) => {
            let unmount = std::mem::take(&mut child.borrow_mut().previous_attach);
            if let Value::Function(unmount) = unmount {
                unmount.call(&[])?;
            }
            logger::log("detach: custom unmount");
        }
        AttachDirective::Path(path) => {
            let previous = std::mem::take(&mut child.borrow_mut().previous_attach);
            let Some(parent_object) = parent.borrow().object() else {
                return Ok(());
            };
            let Resolved { root, key, .. } = resolve(&parent_object, &path);
            if key.contains(PIERCE_DELIMITER) && !root.has(&key) {
                return Ok(());
            }
            if is_index(&key) {
                root.delete(&key);
            } else {
                root.set(&key, previous);
            }
            logger::log(&format!("detach: '{}'", path));
        }
    }

    Ok(())
}
