//! Tests for the instance registry.

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::super::instance::*;
    use crate::model::{ObjectRef, Props, Value};
    use crate::root::{find_initial_root, get_root_state, RootState};
    use crate::test_support::*;

    #[test]
    fn test_prepare_is_idempotent() {
        let fixture = Fixture::new();
        let root = root_with(&fixture);
        let object = fixture.thing();

        let first = prepare(&object, &root, "thing", Props::new().with("visible", false));
        let second = prepare(&object, &root, "other", Props::new());

        assert!(Rc::ptr_eq(&first, &second));
        // Повторный prepare ничего не переписывает
        assert_eq!(second.borrow().type_name, "thing");
        assert_eq!(second.borrow().props.get("visible").as_bool(), Some(false));
    }

    #[test]
    fn test_descriptor_is_not_enumerable() {
        let fixture = Fixture::new();
        let root = root_with(&fixture);
        let object = fixture.thing();
        let keys_before = object.keys();

        prepare(&object, &root, "thing", Props::new());

        assert_eq!(object.keys(), keys_before);
        assert!(object.instance().is_some());
    }

    #[test]
    fn test_descriptor_does_not_own_object() {
        let fixture = Fixture::new();
        let root = root_with(&fixture);
        let object = ObjectRef::plain();
        let instance = prepare(&object, &root, "", Props::new());

        assert!(instance.borrow().object().is_some());
        assert!(instance.borrow().is_primitive());
        drop(object);
        assert!(instance.borrow().object().is_none());
    }

    #[test]
    fn test_get_instance_props_strips_reserved_without_reading() {
        let reads = Rc::new(Cell::new(0));
        let mut props = Props::new().with("position", Value::array([1, 2, 3]));
        for key in ["attach", "args", "key", "onUpdate"] {
            let spy = reads.clone();
            props.insert_getter(key, move || {
                spy.set(spy.get() + 1);
                Value::Undefined
            });
        }
        let spy = reads.clone();
        props.insert_getter("color", move || {
            spy.set(spy.get() + 100);
            Value::from("red")
        });

        let clean = get_instance_props(&props);

        assert_eq!(clean.keys().collect::<Vec<_>>(), vec!["position", "color"]);
        assert_eq!(reads.get(), 0, "no getter may run while stripping");
    }

    #[test]
    fn test_update_handlers_collects_functions_only() {
        let fixture = Fixture::new();
        let root = root_with(&fixture);
        let props = Props::new()
            .with("onClick", Value::function(|_| Ok(Value::Undefined)))
            .with("onPointerOver", Value::Null)
            .with("visible", true);
        let (_object, instance) = managed_thing(&fixture, &root, props);

        update_handlers(&instance);

        let instance = instance.borrow();
        assert_eq!(instance.event_count(), 1);
        assert!(instance.handlers.contains_key("onClick"));
    }

    #[test]
    fn test_find_initial_root_walks_previous_roots() {
        let fixture = Fixture::new();
        let initial = root_with(&fixture);
        let mut chain = initial.clone();
        for _ in 0..5 {
            chain = RootState::new().with_previous_root(&chain).into_ref();
        }

        let object = fixture.thing();
        let instance = prepare(&object, &chain, "thing", Props::new());

        let found = find_initial_root(&instance.borrow());
        assert!(Rc::ptr_eq(&found, &initial));
        assert!(Rc::ptr_eq(&get_root_state(&object).unwrap(), &chain));
    }

    #[test]
    fn test_find_initial_root_without_back_reference() {
        let fixture = Fixture::new();
        let root = root_with(&fixture);
        let (_object, instance) = managed_thing(&fixture, &root, Props::new());
        assert!(Rc::ptr_eq(&find_initial_root(&instance.borrow()), &root));
    }
}
