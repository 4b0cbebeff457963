mod common;

use std::collections::HashSet;

use vtable_builder::model::{ClassId, MemberHandleKind, SelectorId};
use vtable_builder::walker;

/// §8 scenario 1: one non-abstract class, one method. Not a dispatch target
/// at all — a selector backed by a single implementation is inlinable.
#[test]
fn single_class_single_method_is_inlinable() {
    let classes = vec![
        common::object_class(),
        common::class(1, 0, false, vec![common::method(ClassId(1), "m", 10, false, true)]),
    ];
    let (selectors, _lattice, _dynamic) =
        walker::build(&classes, common::call_counts(&[(10, 5)]), &common::config()).unwrap();

    let sel = &selectors[&SelectorId(10)];
    assert_eq!(sel.target_count, 1);
    assert!(sel.singular_target.is_some());
    assert!(sel.offset.is_none(), "walker never assigns offsets, only pack does");
}

/// §8 scenario 2: two subclasses of an abstract class both override `m`.
#[test]
fn two_subclasses_override_share_one_live_selector() {
    let classes = vec![
        common::object_class(),
        common::class(1, 0, true, vec![common::method(ClassId(1), "m", 10, true, true)]),
        common::class(2, 1, false, vec![common::method(ClassId(2), "m", 10, false, true)]),
        common::class(3, 1, false, vec![common::method(ClassId(3), "m", 10, false, true)]),
    ];
    let (selectors, _lattice, dynamic) =
        walker::build(&classes, common::call_counts(&[(10, 10)]), &common::config()).unwrap();

    let sel = &selectors[&SelectorId(10)];
    assert_eq!(sel.class_ids, vec![ClassId(2), ClassId(3)]);
    assert_eq!(sel.target_count, 2);
    assert_eq!(dynamic.methods.get("m").map(|v| v.len()), Some(1));
}

/// §8 scenario 6: a method with tear-off uses produces two distinct
/// selectors, and both show up in the relevant dynamic-call indexes.
#[test]
fn tear_off_and_method_coexist_as_distinct_selectors() {
    let classes = vec![
        common::object_class(),
        common::class(1, 0, false, vec![common::method_with_tear_off(ClassId(1), "m", 10, 11)]),
    ];
    let (selectors, _lattice, dynamic) =
        walker::build(&classes, common::call_counts(&[(10, 1)]), &common::config()).unwrap();

    assert!(selectors.contains_key(&SelectorId(10)));
    assert!(selectors.contains_key(&SelectorId(11)));
    assert_eq!(selectors[&SelectorId(11)].targets[&ClassId(1)].kind, MemberHandleKind::TearOff);

    let methods: HashSet<_> = dynamic.methods.get("m").cloned().unwrap_or_default().into_iter().collect();
    let getters: HashSet<_> = dynamic.getters.get("m").cloned().unwrap_or_default().into_iter().collect();
    assert!(methods.contains(&SelectorId(10)));
    assert!(getters.contains(&SelectorId(11)));
}

/// Override monotonicity (§8 invariant): a subclass that doesn't declare its
/// own override inherits the nearest ancestor's concrete implementation
/// rather than the abstract declaration.
#[test]
fn non_overriding_subclass_inherits_nearest_concrete_implementation() {
    let classes = vec![
        common::object_class(),
        common::class(1, 0, true, vec![common::method(ClassId(1), "m", 10, true, true)]),
        common::class(2, 1, false, vec![common::method(ClassId(2), "m", 10, false, true)]),
        // D doesn't override m; it must inherit B's implementation, not A's
        // abstract declaration.
        common::class(3, 2, false, Vec::new()),
    ];
    let (selectors, _lattice, _dynamic) =
        walker::build(&classes, common::call_counts(&[(10, 1)]), &common::config()).unwrap();

    let sel = &selectors[&SelectorId(10)];
    assert_eq!(sel.targets[&ClassId(3)], sel.targets[&ClassId(2)]);
    assert!(sel.class_ids.contains(&ClassId(3)));
}

/// A field without a setter produces only a getter selector; fields with a
/// setter produce both, with distinct ids.
#[test]
fn field_with_setter_produces_two_distinct_selectors() {
    let classes = vec![
        common::object_class(),
        common::class(1, 0, false, vec![common::field(ClassId(1), "x", 20, 21, true)]),
    ];
    let (selectors, _lattice, _dynamic) =
        walker::build(&classes, common::call_counts(&[]), &common::config()).unwrap();

    assert!(selectors.contains_key(&SelectorId(20)));
    assert!(selectors.contains_key(&SelectorId(21)));
    assert_ne!(selectors[&SelectorId(20)].id, selectors[&SelectorId(21)].id);
}
