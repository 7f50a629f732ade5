//! Property Applier: запись props в live-объект
//!
//! Порядок решения для каждого ключа (по возможностям *текущего* значения в слоте):
//! 1. у target есть `set`: массив → `set(...items)`, число → `setScalar(n)` (или `set(n)`),
//!    строка/bool → `set(v)`. Identity target'а сохраняется.
//! 2. у target есть `copy` и incoming: объект совместимого класса
//!    (класс target'а == класс incoming или его наследник) → `copy(v)`.
//! 3. иначе: прямое присваивание `root[key] = v`.
//!
//! Слот пустой, а у default-инстанса типа там классовый объект → сначала
//! конструируем свежий объект этого класса, потом применяем к нему.
//!
//! `convertSRGBToLinear` вызывается только после scalar `set` (число, строка):
//! `copy` и spread переносят значения как есть. Путь, упёршийся в примитив, пропускается.

use std::cell::OnceCell;
use std::rc::Rc;
use std::slice;

use crate::config::ReconcilerConfig;
use crate::error::ReconcileError;
use crate::factory::InstanceFactory;
use crate::logger;
use crate::model::{ObjectRef, Props, Value};
use crate::reconcile::diff::diff_props;
use crate::reconcile::instance::{update_handlers, InstanceRef};
use crate::reconcile::resolve::{empty_container, resolve, resolve_with, Resolved, PIERCE_DELIMITER};

/// Как значение легло в существующий объект
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InPlace {
    /// `set(...items)` из массива
    Spread,
    /// `setScalar(n)` / `set(v)` из числа, строки или bool
    Scalar,
    Copied,
    /// incoming: тот же объект
    Same,
}

struct ApplyContext {
    managed: bool,
    config: Rc<ReconcilerConfig>,
    /// Без root'а цвета не конвертируем
    linear: bool,
    type_name: String,
    factory: Option<Rc<dyn InstanceFactory>>,
    defaults: OnceCell<Option<ObjectRef>>,
}

impl ApplyContext {
    fn new(instance: Option<&InstanceRef>) -> Self {
        let Some(instance) = instance else {
            return Self {
                managed: false,
                config: ReconcilerConfig::shared_rc(),
                linear: true,
                type_name: String::new(),
                factory: None,
                defaults: OnceCell::new(),
            };
        };

        let instance = instance.borrow();
        let root = instance.root.borrow();
        Self {
            managed: true,
            config: root.config.clone(),
            linear: root.linear,
            type_name: instance.type_name.clone(),
            factory: root.factory.clone(),
            defaults: OnceCell::new(),
        }
    }

    fn default_object(&self) -> Option<&ObjectRef> {
        self.defaults
            .get_or_init(|| {
                if self.type_name.is_empty() {
                    return None;
                }
                self.factory.as_ref()?.construct(&self.type_name)
            })
            .as_ref()
    }

    /// Свежий объект того класса, что лежит по `path` у default-инстанса
    fn construct_at(&self, path: &str) -> Option<ObjectRef> {
        let default_object = self.default_object()?;
        let Value::Object(template) = resolve(default_object, path).target else {
            return None;
        };
        let class = template.class()?;
        self.factory.as_ref()?.construct(class.name())
    }

    fn vivify(&self, prefix: &str, next_segment: &str) -> Value {
        match self.construct_at(prefix) {
            Some(fresh) => Value::Object(fresh),
            None => empty_container(next_segment),
        }
    }

    fn apply_key(&self, object: &ObjectRef, key: &str, value: Value) -> Result<(), ReconcileError> {
        let Resolved { root, key: leaf, target } =
            resolve_with(object, key, &mut |prefix, next| self.vivify(prefix, next));

        // Путь упёрся в примитив: мусорное поле вида `opacity-value` не заводим
        if leaf.contains(PIERCE_DELIMITER) && !root.has(&leaf) {
            logger::log(&format!("apply: '{}' blocked at '{}', skipped", key, leaf));
            return Ok(());
        }

        let target = match target {
            Value::Undefined => match self.construct_at(key) {
                Some(fresh) => {
                    logger::log(&format!("apply: constructed <{}> for '{}'", fresh.class_name().unwrap_or_default(), key));
                    root.set(&leaf, Value::Object(fresh.clone()));
                    Value::Object(fresh)
                }
                None => Value::Undefined,
            },
            other => other,
        };

        if let Value::Object(current) = &target {
            if let Some(written) = self.apply_in_place(current, &value)? {
                if written == InPlace::Scalar {
                    self.manage_colour(current)?;
                }
                return Ok(());
            }
        }

        root.set(&leaf, value);
        Ok(())
    }

    /// `Some`: значение записано в существующий объект (identity сохранена)
    fn apply_in_place(&self, current: &ObjectRef, value: &Value) -> Result<Option<InPlace>, ReconcileError> {
        if current.has_method("set") {
            match value {
                Value::Array(items) => {
                    current.call("set", &items.to_vec())?;
                    return Ok(Some(InPlace::Spread));
                }
                Value::Number(_) => {
                    let method = if current.has_method("setScalar") { "setScalar" } else { "set" };
                    current.call(method, slice::from_ref(value))?;
                    return Ok(Some(InPlace::Scalar));
                }
                Value::Str(_) | Value::Bool(_) => {
                    current.call("set", slice::from_ref(value))?;
                    return Ok(Some(InPlace::Scalar));
                }
                _ => {}
            }
        }

        if let Value::Object(incoming) = value {
            if incoming.ptr_eq(current) {
                return Ok(Some(InPlace::Same));
            }
            if current.has_method("copy") && copy_compatible(current, incoming) {
                current.call("copy", slice::from_ref(value))?;
                return Ok(Some(InPlace::Copied));
            }
        }

        Ok(None)
    }

    fn manage_colour(&self, current: &ObjectRef) -> Result<(), ReconcileError> {
        if !self.linear && current.has_method("convertSRGBToLinear") {
            current.call("convertSRGBToLinear", &[])?;
        }
        Ok(())
    }
}

/// `copy` только если incoming не "богаче" target'а:
/// класс target'а: тот же, что у incoming, или его наследник.
/// Более способный subtype присваивается по ссылке.
fn copy_compatible(current: &ObjectRef, incoming: &ObjectRef) -> bool {
    match (current.class(), incoming.class()) {
        (Some(target_class), Some(incoming_class)) => target_class.is_a(&incoming_class),
        _ => false,
    }
}

/// Применить props к объекту in place. Возвращает тот же объект (для chaining).
///
/// Ошибки: только из пользовательских методов (`set`/`copy`/...) объектов графа.
pub fn apply_props(object: &ObjectRef, props: &Props) -> Result<ObjectRef, ReconcileError> {
    let instance = object.instance();
    let context = ApplyContext::new(instance.as_ref());
    let mut applied = 0usize;

    for key in props.keys() {
        if context.config.is_reserved(key) {
            continue;
        }
        // Event handlers: дело event-подсистемы, не property surface объекта
        if context.managed && context.config.is_event_handler(key) {
            continue;
        }

        let value = props.get(key);
        if value.is_undefined() {
            continue;
        }

        context.apply_key(object, key, value)?;
        applied += 1;
    }

    if applied > 0 {
        if let Some(instance) = &instance {
            instance.borrow().root.borrow_mut().invalidate();
        }
    }

    Ok(object.clone())
}

/// Commit шаг tree-driver'а: diff → apply → новые props в дескриптор →
/// event handlers → `onUpdate(object)`. Возвращает применённые изменения.
pub fn update(object: &ObjectRef, new_props: &Props) -> Result<Props, ReconcileError> {
    let Some(instance) = object.instance() else {
        apply_props(object, new_props)?;
        return Ok(new_props.clone());
    };

    let changes = diff_props(&instance.borrow(), new_props);
    apply_props(object, &changes)?;

    instance.borrow_mut().props = new_props.clone();
    update_handlers(&instance);

    let on_update = instance.borrow().props.get("onUpdate");
    if let Value::Function(on_update) = on_update {
        on_update.call(&[Value::Object(object.clone())])?;
    }

    Ok(changes)
}
