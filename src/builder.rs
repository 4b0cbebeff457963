//! Top-level orchestration: runs the hierarchy walk and the table packer in
//! sequence and exposes the combined result to collaborators (§6).

use std::collections::HashMap;

use crate::config::BuilderConfig;
use crate::error::Result;
use crate::function_registry::FunctionRegistry;
use crate::lattice::TypeLattice;
use crate::model::{ClassDescriptor, SelectorId};
use crate::pack::{self, DispatchTable};
use crate::walker::{self, DynamicIndexes, Selector};

/// The finished product of a build: every finalized selector, the packed
/// table, the lattice that produced their signatures, and the dynamic-call
/// name indexes a caller needs to resolve `noSuchMethod`-style dispatch.
pub struct BuildOutput {
    selectors: HashMap<SelectorId, Selector>,
    table: DispatchTable,
    lattice: TypeLattice,
    dynamic: DynamicIndexes,
}

impl BuildOutput {
    pub fn selector_for(&self, id: SelectorId) -> Option<&Selector> {
        self.selectors.get(&id)
    }

    pub fn selectors(&self) -> impl Iterator<Item = &Selector> {
        self.selectors.values()
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn lattice(&self) -> &TypeLattice {
        &self.lattice
    }

    pub fn dynamic_getter_selectors(&self, name: &str) -> &[SelectorId] {
        self.dynamic.getters.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn dynamic_setter_selectors(&self, name: &str) -> &[SelectorId] {
        self.dynamic.setters.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn dynamic_method_selectors(&self, name: &str) -> &[SelectorId] {
        self.dynamic.methods.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// Runs the full pipeline: walk the hierarchy, finalize every touched
/// selector, then pack the live ones into a single dispatch table.
pub fn build_dispatch_table(
    classes: &[ClassDescriptor],
    call_counts: HashMap<SelectorId, u64>,
    config: &BuilderConfig,
    functions: &dyn FunctionRegistry,
) -> Result<BuildOutput> {
    let (mut selectors, lattice, dynamic) = walker::build(classes, call_counts, config)?;
    let table = pack::pack(&mut selectors, config, functions)?;
    Ok(BuildOutput { selectors, table, lattice, dynamic })
}
