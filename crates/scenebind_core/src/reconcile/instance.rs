//! Instance Registry: Instance Descriptor на live-объекте
//!
//! Дескриптор висит в скрытом слоте объекта (не виден через keys/get).
//! Один объект несёт максимум один дескриптор, повторный `prepare` возвращает существующий.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::config::ReconcilerConfig;
use crate::factory::InstanceFactory;
use crate::logger;
use crate::model::{Callable, ObjectRef, Props, Value, WeakObjectRef};
use crate::root::RootRef;

pub type InstanceRef = Rc<RefCell<Instance>>;

pub struct Instance {
    pub root: RootRef,
    /// Тег конструктора; `""`: primitive wrapper без конструктора
    pub type_name: String,
    object: WeakObjectRef,
    /// Последние применённые props (ключи могут быть pierced: `material-color`)
    pub props: Props,
    /// Что было в attach-слоте до attach (или unmount callback). `Undefined`: не attached.
    pub previous_attach: Value,
    /// Event handlers для внешней event-подсистемы (см. `update_handlers`)
    pub handlers: IndexMap<String, Callable>,
}

impl Instance {
    /// Live-объект (None: уже освобождён)
    pub fn object(&self) -> Option<ObjectRef> {
        self.object.upgrade()
    }

    pub fn is_primitive(&self) -> bool {
        self.type_name.is_empty()
    }

    pub fn config(&self) -> Rc<ReconcilerConfig> {
        self.root.borrow().config.clone()
    }

    pub fn factory(&self) -> Option<Rc<dyn InstanceFactory>> {
        self.root.borrow().factory.clone()
    }

    /// Свежий default-объект того же типа (None: primitive или нет factory)
    pub fn construct_default(&self) -> Option<ObjectRef> {
        if self.is_primitive() {
            return None;
        }
        self.factory()?.construct(&self.type_name)
    }

    pub fn event_count(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("props", &self.props)
            .field("previous_attach", &self.previous_attach)
            .field("event_count", &self.handlers.len())
            .finish()
    }
}

/// Прикрепить дескриптор к объекту (идемпотентно, повтор без side effects)
pub fn prepare(object: &ObjectRef, root: &RootRef, type_name: &str, props: Props) -> InstanceRef {
    if let Some(existing) = object.instance() {
        return existing;
    }

    let instance = Rc::new(RefCell::new(Instance {
        root: root.clone(),
        type_name: type_name.to_string(),
        object: object.downgrade(),
        props,
        previous_attach: Value::Undefined,
        handlers: IndexMap::new(),
    }));
    object.set_instance(instance.clone());

    logger::log(&format!("prepare: new instance <{}>", display_type(type_name)));
    instance
}

/// Props без reserved ключей. Значения не читаются (getter entries копируются как есть).
pub fn get_instance_props(props: &Props) -> Props {
    get_instance_props_with(props, ReconcilerConfig::shared_default())
}

pub fn get_instance_props_with(props: &Props, config: &ReconcilerConfig) -> Props {
    let mut clean = Props::new();
    for (key, entry) in props.entries() {
        if !config.is_reserved(key) {
            clean.insert_entry(key, entry.clone());
        }
    }
    clean
}

/// Пересобрать таблицу event handlers из текущих props
///
/// Hand-off точка для event-подсистемы: applier эти ключи не читает.
pub fn update_handlers(instance: &InstanceRef) {
    let handlers: IndexMap<String, Callable> = {
        let inst = instance.borrow();
        let config = inst.config();
        inst.props
            .entries()
            .filter(|(key, _)| config.is_event_handler(key))
            .filter_map(|(key, entry)| match entry.read() {
                Value::Function(handler) => Some((key.to_string(), handler)),
                _ => None,
            })
            .collect()
    };
    instance.borrow_mut().handlers = handlers;
}

/// Config объекта: из root'а дескриптора или process default
pub(crate) fn config_of(object: &ObjectRef) -> Rc<ReconcilerConfig> {
    match object.instance() {
        Some(instance) => instance.borrow().config(),
        None => ReconcilerConfig::shared_rc(),
    }
}

fn display_type(type_name: &str) -> &str {
    if type_name.is_empty() {
        "primitive"
    } else {
        type_name
    }
}
