mod common;

use std::collections::{BTreeMap, HashMap};

use vtable_builder::model::{CallSignature, ClassId, MemberHandle, MemberHandleKind, SelectorId};
use vtable_builder::pack;
use vtable_builder::params::ParameterInfo;
use vtable_builder::walker::Selector;

fn handle(class_id: ClassId, name: &str) -> MemberHandle {
    MemberHandle {
        kind: MemberHandleKind::InstanceMethod,
        class_id,
        name: name.to_string(),
        is_abstract: false,
        selector_id: SelectorId(0),
        positional: Vec::new(),
        named: Vec::new(),
        type_param_count: 0,
        return_type: None,
        dynamically_callable: false,
        is_wasm_type: false,
    }
}

fn selector(id: u32, call_count: u64, class_ids: &[u32]) -> Selector {
    let mut targets = BTreeMap::new();
    for &c in class_ids {
        targets.insert(ClassId(c), handle(ClassId(c), "m"));
    }
    Selector {
        id: SelectorId(id),
        call_count,
        param_info: ParameterInfo::new(),
        return_count: 0,
        targets,
        signature: CallSignature::default(),
        class_ids: class_ids.iter().map(|&c| ClassId(c)).collect(),
        target_count: class_ids.len(),
        singular_target: None,
        offset: None,
    }
}

/// §8 "packing correctness": every written slot resolves back to the
/// selector's own declared target for that class id.
#[test]
fn packing_correctness_every_slot_resolves_its_own_target() {
    let mut selectors = HashMap::new();
    for (id, class_ids, count) in [(1u32, vec![0u32, 2, 5], 20u64), (2, vec![1, 3], 15)] {
        let s = selector(id, count, &class_ids);
        selectors.insert(s.id, s);
    }
    let table = pack::pack(&mut selectors, &common::config(), &common::EchoFunctions).unwrap();

    for selector in selectors.values() {
        let Some(offset) = selector.offset else { continue };
        for &c in &selector.class_ids {
            let idx = (offset + c.0 as i64) as usize;
            let expected = Some(vtable_builder::FunctionRef(format!("{}::m", c)));
            assert_eq!(table.slots[idx], expected);
        }
    }
}

/// §8 "offset budget": the packed table length never exceeds
/// `(max class_id + 1) * (# live selectors)`.
#[test]
fn offset_budget_holds_for_a_wide_synthetic_hierarchy() {
    let mut selectors = HashMap::new();
    let mut max_class = 0u32;
    let mut live_count = 0usize;
    for group in 0..12u32 {
        let base = group * 5;
        let class_ids: Vec<u32> = (base..base + 3).collect();
        max_class = max_class.max(*class_ids.iter().max().unwrap());
        let s = selector(group + 1, (group as u64 + 1) * 7, &class_ids);
        live_count += 1;
        selectors.insert(s.id, s);
    }
    let table = pack::pack(&mut selectors, &common::config(), &common::EchoFunctions).unwrap();
    assert!(table.len() as u64 <= (max_class as u64 + 1) * live_count as u64);
}

/// §8 "idempotence": packing the same selector set twice from scratch
/// produces identical offsets and an identical table.
#[test]
fn packing_is_idempotent() {
    let build = || {
        let mut selectors = HashMap::new();
        for (id, class_ids, count) in [
            (1u32, vec![0u32, 1, 2, 3], 1u64),
            (2, vec![4, 5], 100),
            (3, vec![6], 1),
        ] {
            let s = selector(id, count, &class_ids);
            selectors.insert(s.id, s);
        }
        selectors
    };

    let mut first = build();
    let table_a = pack::pack(&mut first, &common::config(), &common::EchoFunctions).unwrap();
    let mut second = build();
    let table_b = pack::pack(&mut second, &common::config(), &common::EchoFunctions).unwrap();

    assert_eq!(table_a.slots, table_b.slots);
    for id in [SelectorId(1), SelectorId(2), SelectorId(3)] {
        assert_eq!(first[&id].offset, second[&id].offset);
    }
}

/// §8 scenario 3: the heavier, narrower selector is placed first; wider but
/// cold selectors are placed afterward without colliding with it.
#[test]
fn width_beats_heat_in_placement_order() {
    let mut selectors = HashMap::new();
    for (id, class_ids, count) in [(1u32, vec![0u32, 1, 2, 3], 1u64), (2, vec![4, 5], 100), (3, vec![6], 1)] {
        let s = selector(id, count, &class_ids);
        selectors.insert(s.id, s);
    }
    let table = pack::pack(&mut selectors, &common::config(), &common::EchoFunctions).unwrap();

    assert_eq!(selectors[&SelectorId(2)].offset, Some(0));
    assert!(selectors[&SelectorId(1)].offset.is_some());
    assert!(selectors[&SelectorId(3)].offset.is_none(), "single implementation is not live");

    let mut owner: HashMap<usize, SelectorId> = HashMap::new();
    for id in [SelectorId(1), SelectorId(2)] {
        let sel = &selectors[&id];
        let offset = sel.offset.unwrap();
        for &c in &sel.class_ids {
            let idx = (offset + c.0 as i64) as usize;
            assert!(table.slots[idx].is_some());
            assert!(owner.insert(idx, id).is_none(), "slot {idx} double-claimed");
        }
    }
}
