//! Prop bag: упорядоченный map key → entry.
//!
//! Entry: либо значение, либо getter (accessor с наблюдаемыми side effects).
//! `contains_key`/`keys`/`entry` никогда не вызывают getter; `get` вызывает.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::model::value::Value;

pub type Getter = Rc<dyn Fn() -> Value>;

#[derive(Clone)]
pub enum PropEntry {
    Value(Value),
    Getter(Getter),
}

impl PropEntry {
    pub fn read(&self) -> Value {
        match self {
            PropEntry::Value(value) => value.clone(),
            PropEntry::Getter(getter) => getter(),
        }
    }
}

impl fmt::Debug for PropEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropEntry::Value(value) => value.fmt(f),
            PropEntry::Getter(_) => write!(f, "<getter>"),
        }
    }
}

#[derive(Clone, Default)]
pub struct Props {
    entries: IndexMap<String, PropEntry>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), PropEntry::Value(value.into()));
    }

    pub fn insert_getter(&mut self, key: impl Into<String>, getter: impl Fn() -> Value + 'static) {
        self.entries.insert(key.into(), PropEntry::Getter(Rc::new(getter)));
    }

    pub fn insert_entry(&mut self, key: impl Into<String>, entry: PropEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Читает значение (getter вызывается). Нет ключа: `Undefined`.
    pub fn get(&self, key: &str) -> Value {
        self.entries.get(key).map(PropEntry::read).unwrap_or_default()
    }

    /// Raw entry без чтения
    pub fn entry(&self, key: &str) -> Option<&PropEntry> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<PropEntry> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &PropEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
