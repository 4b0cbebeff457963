//! C2: ParameterInfo. Least-upper-bound of parameter shapes across a
//! selector's implementations.

use std::collections::HashMap;

use crate::error::{BuildError, Result};
use crate::model::{MemberHandle, SelectorId};

/// The merged shape of a selector's parameter list: positional arity, the
/// named-parameter set (in stable insertion order), type-parameter arity, and
/// which positions admit a default-value sentinel.
#[derive(Debug, Clone, Default)]
pub struct ParameterInfo {
    pub positional_count: usize,
    positional_sentinel: Vec<bool>,
    named_order: Vec<String>,
    named_index: HashMap<String, usize>,
    named_sentinel: Vec<bool>,
    pub type_param_count: Option<usize>,
}

impl ParameterInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// The named-parameter set, in stable insertion order.
    pub fn named_params(&self) -> &[String] {
        &self.named_order
    }

    pub fn index_of_named(&self, name: &str) -> Option<usize> {
        self.named_index.get(name).copied()
    }

    pub fn admits_positional_sentinel(&self, position: usize) -> bool {
        self.positional_sentinel.get(position).copied().unwrap_or(false)
    }

    pub fn admits_named_sentinel(&self, name: &str) -> bool {
        self.named_index
            .get(name)
            .and_then(|&idx| self.named_sentinel.get(idx))
            .copied()
            .unwrap_or(false)
    }

    /// Reflects exactly one implementation's parameter shape.
    pub fn from_member(handle: &MemberHandle) -> Self {
        let mut info = ParameterInfo::new();
        info.positional_count = handle.positional.len();
        info.positional_sentinel = handle
            .positional
            .iter()
            .map(|slot| slot.admits_default_sentinel)
            .collect();
        for (name, slot) in &handle.named {
            info.insert_named(name, slot.admits_default_sentinel);
        }
        info.type_param_count = Some(handle.type_param_count);
        info
    }

    fn insert_named(&mut self, name: &str, sentinel: bool) {
        match self.named_index.get(name) {
            Some(&idx) => {
                self.named_sentinel[idx] = self.named_sentinel[idx] || sentinel;
            }
            None => {
                let idx = self.named_order.len();
                self.named_order.push(name.to_string());
                self.named_index.insert(name.to_string(), idx);
                self.named_sentinel.push(sentinel);
            }
        }
    }

    /// Computes the least upper bound of `self` and `other` in place:
    /// positional count is the max of the two, the named set is their union
    /// in stable insertion order, type-parameter counts must agree, and
    /// sentinel marks are OR'd.
    pub fn merge(&mut self, other: &ParameterInfo, selector_id: SelectorId) -> Result<()> {
        match (self.type_param_count, other.type_param_count) {
            (Some(a), Some(b)) if a != b => {
                return Err(BuildError::ParameterShapeConflict {
                    selector_id,
                    left: a,
                    right: b,
                });
            }
            (None, Some(b)) => self.type_param_count = Some(b),
            _ => {}
        }

        if other.positional_count > self.positional_count {
            self.positional_sentinel
                .resize(other.positional_count, false);
            self.positional_count = other.positional_count;
        }
        for (i, &sentinel) in other.positional_sentinel.iter().enumerate() {
            if sentinel {
                self.positional_sentinel[i] = true;
            }
        }

        for name in &other.named_order {
            let sentinel = other.admits_named_sentinel(name);
            self.insert_named(name, sentinel);
        }

        Ok(())
    }
}
