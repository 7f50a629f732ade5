//! scenebind catalog: конкретные классы сцены для reconciler'а
//!
//! Реестр классов по имени + default-инициализация каждого типа.
//! `Catalog` реализует `InstanceFactory`: из него ядро берёт default-инстансы
//! (откат удалённых props) и конструирует недостающие вложенные объекты.
//!
//! Модули:
//! - math: Vector2, Vector3, Euler
//! - color: Color (bevy Srgba/LinearRgba)
//! - object3d: Object3D, Group, Scene, Mesh
//! - resources: BufferGeometry, BoxGeometry, Material, MeshBasicMaterial, MeshStandardMaterial
//! - camera: Camera, PerspectiveCamera, OrthographicCamera

use std::rc::Rc;

use indexmap::IndexMap;
use scenebind_core::{pascal_case, Class, InstanceFactory, ObjectRef};

pub mod camera;
pub mod color;
pub mod math;
pub mod object3d;
pub mod resources;

/// Default-инициализация свежего объекта (поля + вложенные value-объекты)
pub type Init = fn(&Catalog, &ObjectRef);

struct Entry {
    class: Rc<Class>,
    init: Init,
}

pub struct Catalog {
    // Value-классы, которые нужны другим init'ам напрямую
    vector3: Rc<Class>,
    euler: Rc<Class>,
    color: Rc<Class>,
    entries: IndexMap<String, Entry>,
}

impl Catalog {
    pub fn new() -> Rc<Self> {
        let mut catalog = Self {
            vector3: math::vector3_class(),
            euler: math::euler_class(),
            color: color::color_class(),
            entries: IndexMap::new(),
        };
        math::register(&mut catalog);
        color::register(&mut catalog);
        resources::register(&mut catalog);
        let object3d = object3d::register(&mut catalog);
        camera::register(&mut catalog, &object3d);
        Rc::new(catalog)
    }

    pub(crate) fn register(&mut self, class: Rc<Class>, init: Init) {
        self.entries.insert(class.name().to_string(), Entry { class, init });
    }

    /// Класс по element-style или class-style имени
    pub fn class(&self, type_name: &str) -> Option<&Rc<Class>> {
        self.entries.get(&pascal_case(type_name)).map(|entry| &entry.class)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Свежий default-объект типа
    pub fn create(&self, type_name: &str) -> Option<ObjectRef> {
        let entry = self.entries.get(&pascal_case(type_name))?;
        let object = ObjectRef::with_class(&entry.class);
        (entry.init)(self, &object);
        Some(object)
    }

    /// Объект известного класса; init по имени класса, если зарегистрирован
    pub(crate) fn instantiate(&self, class: &Rc<Class>) -> ObjectRef {
        let object = ObjectRef::with_class(class);
        if let Some(entry) = self.entries.get(class.name()) {
            (entry.init)(self, &object);
        }
        object
    }
}

impl InstanceFactory for Catalog {
    fn construct(&self, type_name: &str) -> Option<ObjectRef> {
        if type_name.is_empty() {
            return None;
        }
        self.create(type_name)
    }
}
