//! Tests for the dynamic value model.

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::super::*;

    #[test]
    fn test_array_set_grows_with_undefined() {
        let array = ArrayRef::default();
        array.set(2, Value::from(7));
        assert_eq!(array.len(), 3);
        assert!(array.get(0).is_undefined());
        assert_eq!(array.get(2).as_number(), Some(7.0));
    }

    #[test]
    fn test_array_set_far_past_the_end_is_skipped() {
        let array = ArrayRef::new(vec![Value::from(1)]);

        assert!(!array.set(usize::MAX, Value::from(5)));
        assert!(!array.set(1 + MAX_ARRAY_GROWTH, Value::from(5)));
        assert_eq!(array.len(), 1);

        assert!(array.set(MAX_ARRAY_GROWTH, Value::from(5)));
        assert_eq!(array.len(), MAX_ARRAY_GROWTH + 1);
    }

    #[test]
    fn test_array_delete_keeps_length() {
        let array = ArrayRef::new(vec![Value::from(1), Value::from(2)]);
        array.delete(0);
        assert_eq!(array.len(), 2);
        assert!(array.get(0).is_undefined());
        assert_eq!(array.get(1).as_number(), Some(2.0));

        // За концом: no-op
        array.delete(10);
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn test_class_method_lookup_walks_parents() {
        let base = Class::builder("Base")
            .method("ping", |_, _| Ok(Value::from("base")))
            .build();
        let derived = Class::builder("Derived").extends(&base).build();

        let object = ObjectRef::with_class(&derived);
        assert!(object.has_method("ping"));
        let reply = object.call("ping", &[]).unwrap();
        assert_eq!(reply.unwrap().as_str(), Some("base"));

        assert!(derived.is_a(&base));
        assert!(!base.is_a(&derived));
        assert!(derived.is_named("Base"));
    }

    #[test]
    fn test_own_field_function_acts_as_method() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let object = ObjectRef::plain();
        object.set(
            "dispose",
            Value::function(move |_| {
                counter.set(counter.get() + 1);
                Ok(Value::Undefined)
            }),
        );

        assert!(object.has_method("dispose"));
        object.call("dispose", &[]).unwrap();
        assert_eq!(calls.get(), 1);

        // Нет метода: Ok(None)
        assert!(object.call("missing", &[]).unwrap().is_none());
    }

    #[test]
    fn test_method_can_mutate_receiver() {
        let class = Class::builder("Counter")
            .method("bump", |this, _| {
                let n = this.number("n").unwrap_or(0.0);
                this.set("n", n + 1.0);
                Ok(Value::Undefined)
            })
            .build();
        let counter = ObjectRef::with_class(&class);
        counter.call("bump", &[]).unwrap();
        counter.call("bump", &[]).unwrap();
        assert_eq!(counter.number("n"), Some(2.0));
    }

    #[test]
    fn test_props_contains_key_does_not_read_getter() {
        let reads = Rc::new(Cell::new(0));
        let spy = reads.clone();
        let mut props = Props::new();
        props.insert_getter("attach", move || {
            spy.set(spy.get() + 1);
            Value::from("material")
        });

        assert!(props.contains_key("attach"));
        assert!(props.entry("attach").is_some());
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["attach"]);
        assert_eq!(reads.get(), 0);

        assert_eq!(props.get("attach").as_str(), Some("material"));
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn test_weak_object_ref_does_not_keep_object_alive() {
        let object = ObjectRef::plain();
        let weak = object.downgrade();
        assert!(weak.upgrade().is_some());
        drop(object);
        assert!(weak.upgrade().is_none());
    }
}
