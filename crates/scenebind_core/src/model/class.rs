//! Class, "конструктор" live-объекта: имя, родитель (subtype chain), native методы.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::ReconcileError;
use crate::model::object::ObjectRef;
use crate::model::value::Value;

pub type MethodFn = dyn Fn(&ObjectRef, &[Value]) -> Result<Value, ReconcileError>;
pub type Method = Rc<MethodFn>;

pub struct Class {
    name: String,
    parent: Option<Rc<Class>>,
    methods: IndexMap<String, Method>,
}

impl Class {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            parent: None,
            methods: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<Class>> {
        self.parent.as_ref()
    }

    /// Метод класса или ближайшего предка
    pub fn method(&self, name: &str) -> Option<Method> {
        self.ancestry()
            .find_map(|class| class.methods.get(name).cloned())
    }

    /// `self` == `other` или наследник `other`
    pub fn is_a(&self, other: &Class) -> bool {
        self.ancestry().any(|class| std::ptr::eq(class, other))
    }

    /// Кто-то в цепочке называется `name`
    pub fn is_named(&self, name: &str) -> bool {
        self.ancestry().any(|class| class.name == name)
    }

    /// self → parent → ... → root
    pub fn ancestry(&self) -> impl Iterator<Item = &Class> {
        std::iter::successors(Some(self), |class| class.parent.as_deref())
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain: Vec<&str> = self.ancestry().map(|class| class.name()).collect();
        write!(f, "Class({})", chain.join(" → "))
    }
}

pub struct ClassBuilder {
    name: String,
    parent: Option<Rc<Class>>,
    methods: IndexMap<String, Method>,
}

impl ClassBuilder {
    pub fn extends(mut self, parent: &Rc<Class>) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    pub fn method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&ObjectRef, &[Value]) -> Result<Value, ReconcileError> + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Rc::new(f));
        self
    }

    pub fn build(self) -> Rc<Class> {
        Rc::new(Class {
            name: self.name,
            parent: self.parent,
            methods: self.methods,
        })
    }
}
