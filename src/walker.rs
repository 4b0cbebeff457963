//! C5: HierarchyWalker. Walks classes superclass-first, populating each
//! selector's `targets` map with inheritance and override semantics, then
//! freezes every selector touched during the walk.

use std::collections::{HashMap, HashSet};

use crate::config::BuilderConfig;
use crate::error::{BuildError, Result};
use crate::lattice::TypeLattice;
use crate::model::{CallSignature, ClassDescriptor, ClassId, ClassMember, MemberHandle, ProcedureKind, SelectorId};
use crate::params::ParameterInfo;
use crate::registry::{SelectorBuilder, SelectorRegistry};
use crate::signature;

/// A selector after the hierarchy walk: `targets`, `class_ids`,
/// `target_count`, `singular_target` and `signature` are all final and never
/// mutated again, except `offset`, which [`crate::pack`] assigns exactly
/// once during packing.
#[derive(Debug, Clone)]
pub struct Selector {
    pub id: SelectorId,
    pub call_count: u64,
    pub param_info: ParameterInfo,
    pub return_count: u8,
    pub targets: std::collections::BTreeMap<ClassId, MemberHandle>,
    pub signature: CallSignature,
    /// Sorted ascending, non-abstract class ids in `targets`.
    pub class_ids: Vec<ClassId>,
    /// Cardinality of the set of distinct non-abstract member handles.
    pub target_count: usize,
    pub singular_target: Option<MemberHandle>,
    /// Packed base offset into the dispatch table. `None` until
    /// [`crate::pack::TablePacker`] runs, and for selectors that never need
    /// a slot.
    pub offset: Option<i64>,
}

/// The three dynamic-call name indexes, carried over from the registry once
/// the walk is done and its selectors have been finalized.
#[derive(Debug, Clone, Default)]
pub struct DynamicIndexes {
    pub getters: HashMap<String, Vec<SelectorId>>,
    pub setters: HashMap<String, Vec<SelectorId>>,
    pub methods: HashMap<String, Vec<SelectorId>>,
}

/// Walks `classes` (superclass-first) and returns every selector touched
/// during the walk, finalized, alongside the type lattice used to finalize
/// them and the dynamic-call name indexes collected along the way.
pub fn build(
    classes: &[ClassDescriptor],
    call_counts: HashMap<SelectorId, u64>,
    config: &BuilderConfig,
) -> Result<(HashMap<SelectorId, Selector>, TypeLattice, DynamicIndexes)> {
    let lattice = TypeLattice::new(classes, config);
    let mut registry = SelectorRegistry::new(call_counts);
    walk(classes, &mut registry, config)?;

    let (builders, getters, setters, methods) = registry.into_parts();
    let mut selectors = HashMap::new();
    for (id, builder) in builders {
        selectors.insert(id, finalize(builder, classes, &lattice, config)?);
    }
    log::info!(
        "hierarchy walk complete: {} classes, {} selectors finalized",
        classes.len(),
        selectors.len()
    );
    Ok((selectors, lattice, DynamicIndexes { getters, setters, methods }))
}

fn walk(classes: &[ClassDescriptor], registry: &mut SelectorRegistry, config: &BuilderConfig) -> Result<()> {
    let mut per_class_selector_ids: HashMap<ClassId, HashSet<SelectorId>> = HashMap::new();
    let object_members: Vec<ClassMember> = classes
        .iter()
        .find(|c| c.class_id == config.object_class_id)
        .map(|c| c.members.clone())
        .unwrap_or_default();

    for class in classes {
        log::trace!("visiting {}", class.class_id);
        let mut working_set: HashSet<SelectorId> = HashSet::new();

        if class.class_id != config.wasm_types_base_class_id {
            if let Some(super_id) = class.super_id {
                let super_set = per_class_selector_ids
                    .get(&super_id)
                    .ok_or(BuildError::HierarchyMalformed {
                        class_id: class.class_id,
                        super_id,
                    })?
                    .clone();
                for &sid in &super_set {
                    let inherited = registry
                        .selector(sid)
                        .and_then(|b| b.targets.get(&super_id))
                        .cloned();
                    if let Some(handle) = inherited {
                        registry
                            .selector_mut(sid)
                            .expect("selector just read")
                            .targets
                            .insert(class.class_id, handle);
                    }
                }
                working_set = super_set;
            }
        }

        let members: &[ClassMember] = if class.is_synthetic_top() {
            &object_members
        } else {
            &class.members
        };

        for member in members {
            match member {
                ClassMember::Field(field) => {
                    apply(registry, &mut working_set, class.class_id, field.getter_handle())?;
                    if field.has_setter {
                        apply(registry, &mut working_set, class.class_id, field.setter_handle())?;
                    }
                }
                ClassMember::Procedure(procedure) => {
                    apply(registry, &mut working_set, class.class_id, procedure.primary_handle())?;
                    if procedure.kind == ProcedureKind::Method && procedure.has_tear_off_uses {
                        let tear_off = procedure
                            .tear_off_handle(config.function_type_class_id)
                            .ok_or_else(|| BuildError::SelectorMetadataMissing {
                                class_id: class.class_id,
                                member_name: procedure.name.clone(),
                            })?;
                        apply(registry, &mut working_set, class.class_id, tear_off)?;
                    }
                }
            }
        }

        per_class_selector_ids.insert(class.class_id, working_set);
    }

    Ok(())
}

fn apply(
    registry: &mut SelectorRegistry,
    working_set: &mut HashSet<SelectorId>,
    class_id: ClassId,
    handle: MemberHandle,
) -> Result<()> {
    let sid = registry.intern(&handle)?;
    let builder = registry.selector_mut(sid).expect("just interned");
    if handle.is_abstract {
        builder.targets.entry(class_id).or_insert(handle);
    } else {
        builder.targets.insert(class_id, handle);
    }
    working_set.insert(sid);
    Ok(())
}

fn finalize(
    builder: SelectorBuilder,
    classes: &[ClassDescriptor],
    lattice: &TypeLattice,
    config: &BuilderConfig,
) -> Result<Selector> {
    let is_abstract = |cid: ClassId| classes[cid.index()].is_abstract;

    let mut class_ids: Vec<ClassId> = builder
        .targets
        .keys()
        .filter(|&&cid| !is_abstract(cid))
        .copied()
        .collect();
    class_ids.sort();

    let mut distinct: HashSet<&MemberHandle> = HashSet::new();
    for (&cid, handle) in &builder.targets {
        if !is_abstract(cid) {
            distinct.insert(handle);
        }
    }
    let target_count = distinct.len();
    let singular_target = if target_count == 1 {
        distinct.into_iter().next().cloned()
    } else {
        None
    };

    let signature = signature::synthesize(&builder, lattice, config)?;

    Ok(Selector {
        id: builder.id,
        call_count: builder.call_count,
        param_info: builder.param_info,
        return_count: builder.return_count,
        targets: builder.targets,
        signature,
        class_ids,
        target_count,
        singular_target,
        offset: None,
    })
}
