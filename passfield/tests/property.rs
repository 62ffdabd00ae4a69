//! Tests for observable properties.

use std::sync::{Arc, Mutex};

use passfield::property::Property;

#[test]
fn test_set_notifies_with_old_and_new() {
    let prop = Property::new(String::from("a"));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    prop.subscribe(move |old: &String, new: &String| {
        seen_clone.lock().unwrap().push(format!("{old}->{new}"));
    });

    prop.set("b".into());
    prop.set("b".into());
    prop.set("c".into());

    assert_eq!(*seen.lock().unwrap(), vec!["a->b", "b->c"]);
}

#[test]
fn test_read_only_view_sees_writes() {
    let prop = Property::new(1);
    let view = prop.read_only();
    let seen = Arc::new(Mutex::new(None));
    let seen_clone = Arc::clone(&seen);
    view.subscribe(move |_, new| {
        *seen_clone.lock().unwrap() = Some(*new);
    });

    prop.set(2);
    assert_eq!(view.get(), 2);
    assert_eq!(*seen.lock().unwrap(), Some(2));
    assert!(view.is_dirty());

    view.clear_dirty();
    assert!(!prop.is_dirty());
}

#[test]
fn test_listeners_run_in_registration_order() {
    let prop = Property::new(0);
    let order = Arc::new(Mutex::new(Vec::new()));
    for i in 0..3 {
        let order = Arc::clone(&order);
        prop.subscribe(move |_, _| order.lock().unwrap().push(i));
    }

    prop.set(1);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn test_listener_may_read_property() {
    let prop = Property::new(0);
    let reader = prop.clone();
    let seen = Arc::new(Mutex::new(0));
    let seen_clone = Arc::clone(&seen);
    prop.subscribe(move |_, _| {
        *seen_clone.lock().unwrap() = reader.get();
    });

    prop.set(7);
    assert_eq!(*seen.lock().unwrap(), 7);
}

#[test]
fn test_clone_shares_value() {
    let prop = Property::<Option<u8>>::default();
    let clone = prop.clone();
    clone.set(Some(3));
    assert_eq!(prop.get(), Some(3));
}
