//! C6: TablePacker. Row-displacement packing of sparse per-selector rows
//! into a single dense dispatch table.

use std::collections::HashMap;

use crate::config::BuilderConfig;
use crate::error::{BuildError, Result};
use crate::function_registry::{FunctionRef, FunctionRegistry};
use crate::model::{MemberHandle, SelectorId};
use crate::walker::Selector;

/// The finalized, read-only dispatch table: `slots[selector.offset +
/// receiver.class_id]` resolves a polymorphic call.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    pub slots: Vec<Option<FunctionRef>>,
}

impl DispatchTable {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn is_live(selector: &Selector, config: &BuilderConfig) -> bool {
    (selector.call_count > 0 && selector.target_count > 1) || selector.id == config.no_such_method_selector_id
}

fn weight(selector: &Selector) -> u64 {
    selector.class_ids.len() as u64 * 10 + selector.call_count
}

/// Assigns a base offset to every live selector and emits the packed, flat
/// table. Mutates `selector.offset` in place for every live selector;
/// selectors that don't need dispatch are left with `offset = None`.
pub fn pack(
    selectors: &mut HashMap<SelectorId, Selector>,
    config: &BuilderConfig,
    functions: &dyn FunctionRegistry,
) -> Result<DispatchTable> {
    let mut live_ids: Vec<SelectorId> = selectors
        .values()
        .filter(|s| is_live(s, config))
        .map(|s| s.id)
        .collect();

    live_ids.sort_by_key(|id| {
        let selector = &selectors[id];
        (std::cmp::Reverse(weight(selector)), *id)
    });

    let mut table: Vec<Option<MemberHandle>> = Vec::new();
    let mut first_available: usize = 0;

    for (i, id) in live_ids.iter().enumerate() {
        let selector = selectors.get_mut(id).expect("live id exists in map");

        if selector.class_ids.is_empty() {
            // No non-abstract implementation at all (can only happen for a
            // selector kept alive unconditionally, e.g. no_such_method, with
            // no concrete target yet). Nothing to write.
            selector.offset = Some(0);
            continue;
        }

        let min_c = selector.class_ids.iter().min().copied().unwrap().0 as i64;
        let mut offset: i64 = if i == 0 { 0 } else { first_available as i64 - min_c };
        if offset + min_c < 0 {
            offset = -min_c;
        }

        loop {
            let fits = selector.class_ids.iter().all(|c| {
                let idx = offset + c.0 as i64;
                idx as usize >= table.len() || table[idx as usize].is_none()
            });
            if fits {
                break;
            }
            offset += 1;
        }

        for c in &selector.class_ids {
            let idx = (offset + c.0 as i64) as usize;
            if idx >= table.len() {
                table.resize(idx + 1, None);
            }
            if table[idx].is_some() {
                return Err(BuildError::InternalInvariant(format!(
                    "selector {} collided with an occupied slot at index {idx}",
                    selector.id
                )));
            }
            let handle = selector
                .targets
                .get(c)
                .expect("class_ids is derived from non-abstract targets")
                .clone();
            table[idx] = Some(handle);
        }

        selector.offset = Some(offset);
        log::debug!("placed selector {} at offset {offset}", selector.id);

        while first_available < table.len() && table[first_available].is_some() {
            first_available += 1;
        }
    }

    let slots: Vec<Option<FunctionRef>> = table
        .into_iter()
        .map(|entry| entry.and_then(|handle| functions.get_existing_function(&handle)))
        .collect();

    log::info!(
        "packed {} live selector(s) into a table of length {}",
        live_ids.len(),
        slots.len()
    );

    Ok(DispatchTable { slots })
}
