//! Fixture-каталог для unit-тестов ядра: Vec3 (+ наследник Vec3Ext) и Thing.

use std::rc::Rc;

use crate::factory::{pascal_case, InstanceFactory};
use crate::model::{Class, ObjectRef, Props, Value};
use crate::reconcile::instance::{prepare, InstanceRef};
use crate::root::{RootRef, RootState};

pub struct Fixture {
    pub vec3: Rc<Class>,
    pub vec3_ext: Rc<Class>,
    pub thing: Rc<Class>,
}

impl Fixture {
    pub fn new() -> Rc<Self> {
        let vec3 = Class::builder("Vec3")
            .method("set", |this, args| {
                for (i, axis) in ["x", "y", "z"].iter().enumerate() {
                    if let Some(n) = args.get(i).and_then(Value::as_number) {
                        this.set(*axis, n);
                    }
                }
                Ok(Value::Undefined)
            })
            .method("setScalar", |this, args| {
                let n = args.first().and_then(Value::as_number).unwrap_or(0.0);
                for axis in ["x", "y", "z"] {
                    this.set(axis, n);
                }
                Ok(Value::Undefined)
            })
            .method("copy", |this, args| {
                if let Some(Value::Object(source)) = args.first() {
                    let (x, y, z) = xyz(source);
                    this.set("x", x);
                    this.set("y", y);
                    this.set("z", z);
                }
                Ok(Value::Undefined)
            })
            .build();
        let vec3_ext = Class::builder("Vec3Ext").extends(&vec3).build();
        let thing = Class::builder("Thing").build();
        Rc::new(Self { vec3, vec3_ext, thing })
    }

    pub fn vec3(&self, x: f64, y: f64, z: f64) -> ObjectRef {
        let v = ObjectRef::with_class(&self.vec3);
        v.set("x", x);
        v.set("y", y);
        v.set("z", z);
        v
    }

    pub fn vec3_ext(&self, x: f64, y: f64, z: f64) -> ObjectRef {
        let v = ObjectRef::with_class(&self.vec3_ext);
        v.set("x", x);
        v.set("y", y);
        v.set("z", z);
        v
    }

    pub fn thing(&self) -> ObjectRef {
        let thing = ObjectRef::with_class(&self.thing);
        thing.set("position", self.vec3(0.0, 0.0, 0.0));
        thing.set("scale", self.vec3(1.0, 1.0, 1.0));
        thing.set("visible", true);
        thing.set("name", "");
        thing
    }
}

impl InstanceFactory for Fixture {
    fn construct(&self, type_name: &str) -> Option<ObjectRef> {
        match pascal_case(type_name).as_str() {
            "Thing" => Some(self.thing()),
            "Vec3" => Some(self.vec3(0.0, 0.0, 0.0)),
            "Vec3Ext" => Some(self.vec3_ext(0.0, 0.0, 0.0)),
            _ => None,
        }
    }
}

pub fn xyz(v: &ObjectRef) -> (f64, f64, f64) {
    (
        v.number("x").unwrap_or(f64::NAN),
        v.number("y").unwrap_or(f64::NAN),
        v.number("z").unwrap_or(f64::NAN),
    )
}

pub fn root_with(fixture: &Rc<Fixture>) -> RootRef {
    RootState::new().with_factory(fixture.clone()).into_ref()
}

/// Thing + дескриптор с props
pub fn managed_thing(fixture: &Rc<Fixture>, root: &RootRef, props: Props) -> (ObjectRef, InstanceRef) {
    let object = fixture.thing();
    let instance = prepare(&object, root, "thing", props);
    (object, instance)
}
