//! Path Resolver: pierced пути (`material-color`, `position-0`) → (container, leaf key, target)

use crate::logger;
use crate::model::{ArrayRef, ObjectRef, Value};

pub const PIERCE_DELIMITER: char = '-';

/// Контейнер, в котором лежит leaf key: объект или массив
#[derive(Clone, Debug)]
pub enum Container {
    Object(ObjectRef),
    Array(ArrayRef),
}

impl Container {
    fn from_value(value: &Value) -> Option<Container> {
        match value {
            Value::Object(object) => Some(Container::Object(object.clone())),
            Value::Array(array) => Some(Container::Array(array.clone())),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Value {
        match self {
            Container::Object(object) => object.get(key),
            Container::Array(array) => index_of(key).map(|i| array.get(i)).unwrap_or_default(),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        match self {
            Container::Object(object) => object.has(key),
            Container::Array(array) => index_of(key).is_some_and(|i| i < array.len()),
        }
    }

    pub fn set(&self, key: &str, value: Value) {
        match self {
            Container::Object(object) => object.set(key, value),
            Container::Array(array) => {
                if let Some(i) = index_of(key) {
                    if !array.set(i, value) {
                        logger::log(&format!("resolve: index {} too far past the end (len {}), skipped", i, array.len()));
                    }
                }
            }
        }
    }

    /// Очистить слот в `Undefined` (для массивов длина сохраняется, сдвига нет)
    pub fn delete(&self, key: &str) {
        match self {
            Container::Object(object) => object.set(key, Value::Undefined),
            Container::Array(array) => {
                if let Some(i) = index_of(key) {
                    array.delete(i);
                }
            }
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Container::Object(object) => Some(object),
            Container::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Container::Array(array) => Some(array),
            Container::Object(_) => None,
        }
    }

    fn descend(&self, segment: &str) -> Option<Container> {
        Container::from_value(&self.get(segment))
    }
}

/// Результат resolve; не персистится
#[derive(Clone, Debug)]
pub struct Resolved {
    pub root: Container,
    pub key: String,
    pub target: Value,
}

/// Array-index сегмент (`"0"`, `"12"`)
pub fn index_of(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

pub fn is_index(segment: &str) -> bool {
    index_of(segment).is_some()
}

/// Read-only resolve: промежуточные контейнеры не создаются.
///
/// Если по дороге чего-то нет: `target` = `Undefined`, `key` = оставшийся хвост пути.
pub fn resolve(root: &ObjectRef, key: &str) -> Resolved {
    walk(root, key, &mut |_, _| None)
}

/// Resolve для записи: отсутствующие промежуточные контейнеры создаются
/// (`[]` если следующий сегмент: индекс, иначе `{}`).
pub fn resolve_or_create(root: &ObjectRef, key: &str) -> Resolved {
    walk(root, key, &mut |_, next| Some(empty_container(next)))
}

/// Resolve для записи с кастомным vivify: `(prefix пути, следующий сегмент)` → новый контейнер
pub fn resolve_with(root: &ObjectRef, key: &str, vivify: &mut dyn FnMut(&str, &str) -> Value) -> Resolved {
    walk(root, key, &mut |prefix, next| Some(vivify(prefix, next)))
}

pub fn empty_container(next_segment: &str) -> Value {
    if is_index(next_segment) {
        Value::Array(ArrayRef::default())
    } else {
        Value::Object(ObjectRef::plain())
    }
}

fn walk(root: &ObjectRef, key: &str, vivify: &mut dyn FnMut(&str, &str) -> Option<Value>) -> Resolved {
    // Ключ с дефисом, лежащий целиком как own property (`"foo-bar"`), не режем
    if !key.contains(PIERCE_DELIMITER) || root.has(key) {
        return Resolved {
            root: Container::Object(root.clone()),
            key: key.to_string(),
            target: root.get(key),
        };
    }

    let segments: Vec<&str> = key.split(PIERCE_DELIMITER).collect();
    let last = segments.len() - 1;
    let mut container = Container::Object(root.clone());

    for i in 0..last {
        let segment = segments[i];
        if let Some(next) = container.descend(segment) {
            container = next;
            continue;
        }

        let stop = |container: Container| Resolved {
            root: container,
            key: segments[i..].join("-"),
            target: Value::Undefined,
        };

        // Примитив по дороге: дальше не пробиваем
        if !container.get(segment).is_undefined() {
            return stop(container);
        }

        let prefix = segments[..=i].join("-");
        let Some(fresh) = vivify(&prefix, segments[i + 1]) else {
            return stop(container);
        };
        container.set(segment, fresh.clone());
        // Запись не прошла (индекс за пределом): дальше идти некуда
        if !container.has(segment) {
            return stop(container);
        }
        match Container::from_value(&fresh) {
            Some(next) => container = next,
            None => return stop(container),
        }
    }

    let leaf = segments[last];
    Resolved {
        target: container.get(leaf),
        key: leaf.to_string(),
        root: container,
    }
}
