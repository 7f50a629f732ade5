//! Live-объект: optional class, упорядоченные поля, скрытый слот для Instance Descriptor.
//!
//! `ObjectRef`: shared handle (Rc<RefCell>), identity = pointer identity.
//! Скрытый слот не видно через `keys()`/`get()` (non-enumerable side-channel).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::error::ReconcileError;
use crate::model::class::{Class, Method};
use crate::model::value::{Callable, Value};
use crate::reconcile::instance::InstanceRef;

#[derive(Default)]
pub struct Object {
    class: Option<Rc<Class>>,
    fields: IndexMap<String, Value>,
    instance: Option<InstanceRef>,
}

#[derive(Clone, Default)]
pub struct ObjectRef(Rc<RefCell<Object>>);

/// Ownership-neutral ссылка (дескриптор не держит объект живым)
#[derive(Clone, Default)]
pub struct WeakObjectRef(Weak<RefCell<Object>>);

impl WeakObjectRef {
    pub fn upgrade(&self) -> Option<ObjectRef> {
        self.0.upgrade().map(ObjectRef)
    }
}

/// Метод, найденный на объекте: native (из class chain) или own-field функция
enum BoundMethod {
    Native(Method),
    Own(Callable),
}

impl ObjectRef {
    /// Plain object (`{}`) без класса
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn with_class(class: &Rc<Class>) -> Self {
        Self(Rc::new(RefCell::new(Object {
            class: Some(class.clone()),
            ..Object::default()
        })))
    }

    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let object = Self::plain();
        for (key, value) in fields {
            object.set(key, value);
        }
        object
    }

    pub fn class(&self) -> Option<Rc<Class>> {
        self.0.borrow().class.clone()
    }

    pub fn class_name(&self) -> Option<String> {
        self.0.borrow().class.as_ref().map(|class| class.name().to_string())
    }

    pub fn is_plain(&self) -> bool {
        self.0.borrow().class.is_none()
    }

    pub fn get(&self, key: &str) -> Value {
        self.0.borrow().fields.get(key).cloned().unwrap_or_default()
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).as_number()
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.borrow().fields.contains_key(key)
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.borrow_mut().fields.insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().fields.shift_remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().fields.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().fields.is_empty()
    }

    fn bound_method(&self, name: &str) -> Option<BoundMethod> {
        let object = self.0.borrow();
        if let Some(method) = object.class.as_ref().and_then(|class| class.method(name)) {
            return Some(BoundMethod::Native(method));
        }
        match object.fields.get(name) {
            Some(Value::Function(f)) => Some(BoundMethod::Own(f.clone())),
            _ => None,
        }
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.bound_method(name).is_some()
    }

    /// Вызвать метод, если он есть. `Ok(None)`: метода нет.
    ///
    /// Borrow объекта отпускается до вызова: метод сам берёт `borrow_mut`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Option<Value>, ReconcileError> {
        match self.bound_method(name) {
            Some(BoundMethod::Native(method)) => method(self, args).map(Some),
            Some(BoundMethod::Own(f)) => f.call(args).map(Some),
            None => Ok(None),
        }
    }

    pub fn instance(&self) -> Option<InstanceRef> {
        self.0.borrow().instance.clone()
    }

    pub(crate) fn set_instance(&self, instance: InstanceRef) {
        self.0.borrow_mut().instance = Some(instance);
    }

    pub fn downgrade(&self) -> WeakObjectRef {
        WeakObjectRef(Rc::downgrade(&self.0))
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Стабильный id на время жизни объекта (для visited-сетов)
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(object) = self.0.try_borrow() else {
            return write!(f, "Object(<borrowed>)");
        };
        let name = object.class.as_ref().map(|class| class.name()).unwrap_or("Object");
        let mut map = f.debug_map();
        map.entry(&"@class", &name);
        for (key, value) in object.fields.iter() {
            // Вложенные объекты печатаем как ссылки, иначе циклы (children ↔ parent) уходят в рекурсию
            match value {
                Value::Object(nested) => map.entry(key, &format_args!("<{}>", nested.class_name().unwrap_or_else(|| "Object".into()))),
                other => map.entry(key, other),
            };
        }
        map.finish()
    }
}
