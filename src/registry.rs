//! C3: SelectorRegistry. Interns selectors by id and maintains the
//! dynamic-call name indexes.

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::params::ParameterInfo;
use crate::model::{ClassId, MemberHandle, MemberHandleKind, SelectorId};

/// The mutable accumulator for a selector during the hierarchy walk. Frozen
/// into a [`crate::walker::Selector`] once the walk completes (§9: late-init
/// "final" fields become a separate, phase-typed record rather than
/// in-place mutation of optional fields).
#[derive(Debug, Clone)]
pub struct SelectorBuilder {
    pub id: SelectorId,
    pub call_count: u64,
    pub param_info: ParameterInfo,
    pub return_count: u8,
    pub targets: BTreeMap<ClassId, MemberHandle>,
}

impl SelectorBuilder {
    fn new(id: SelectorId, call_count: u64) -> Self {
        Self {
            id,
            call_count,
            param_info: ParameterInfo::new(),
            return_count: 0,
            targets: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DynamicBucket {
    Getter,
    Setter,
    Method,
}

#[derive(Default)]
struct DynamicIndex {
    by_name: HashMap<String, Vec<SelectorId>>,
}

impl DynamicIndex {
    fn insert(&mut self, name: &str, id: SelectorId) {
        let ids = self.by_name.entry(name.to_string()).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    fn get(&self, name: &str) -> &[SelectorId] {
        self.by_name.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

pub struct SelectorRegistry {
    selectors: HashMap<SelectorId, SelectorBuilder>,
    call_counts: HashMap<SelectorId, u64>,
    getters: DynamicIndex,
    setters: DynamicIndex,
    methods: DynamicIndex,
}

impl SelectorRegistry {
    pub fn new(call_counts: HashMap<SelectorId, u64>) -> Self {
        Self {
            selectors: HashMap::new(),
            call_counts,
            getters: DynamicIndex::default(),
            setters: DynamicIndex::default(),
            methods: DynamicIndex::default(),
        }
    }

    /// Looks up (or creates) the selector `handle` resolves to, merges its
    /// parameter shape in, lifts `return_count`, and — unless the declaring
    /// class is a machine-primitive type — updates the dynamic-call name
    /// indexes when the handle is dynamically callable. The member name
    /// `"call"` is always treated as dynamically callable.
    pub fn intern(&mut self, handle: &MemberHandle) -> Result<SelectorId> {
        let id = handle.selector_id;
        let call_count = self.call_counts.get(&id).copied().unwrap_or(0);
        let builder = self
            .selectors
            .entry(id)
            .or_insert_with(|| SelectorBuilder::new(id, call_count));

        let incoming = ParameterInfo::from_member(handle);
        builder.param_info.merge(&incoming, id)?;
        builder.return_count = builder.return_count.max(if handle.return_type.is_some() { 1 } else { 0 });

        let dynamic = handle.dynamically_callable || handle.name == "call";
        if dynamic && !handle.is_wasm_type {
            let bucket = match handle.kind {
                MemberHandleKind::Getter | MemberHandleKind::TearOff => DynamicBucket::Getter,
                MemberHandleKind::Setter => DynamicBucket::Setter,
                MemberHandleKind::InstanceMethod => DynamicBucket::Method,
            };
            match bucket {
                DynamicBucket::Getter => self.getters.insert(&handle.name, id),
                DynamicBucket::Setter => self.setters.insert(&handle.name, id),
                DynamicBucket::Method => self.methods.insert(&handle.name, id),
            }
        }

        Ok(id)
    }

    pub fn selector_mut(&mut self, id: SelectorId) -> Option<&mut SelectorBuilder> {
        self.selectors.get_mut(&id)
    }

    pub fn selector(&self, id: SelectorId) -> Option<&SelectorBuilder> {
        self.selectors.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectorBuilder> {
        self.selectors.values()
    }

    pub fn into_builders(self) -> HashMap<SelectorId, SelectorBuilder> {
        self.selectors
    }

    /// Consumes the registry, returning the interned selectors alongside the
    /// three dynamic-call name indexes (getters, setters, methods).
    pub fn into_parts(
        self,
    ) -> (
        HashMap<SelectorId, SelectorBuilder>,
        HashMap<String, Vec<SelectorId>>,
        HashMap<String, Vec<SelectorId>>,
        HashMap<String, Vec<SelectorId>>,
    ) {
        (self.selectors, self.getters.by_name, self.setters.by_name, self.methods.by_name)
    }

    pub fn dynamic_getter_selector_ids(&self, name: &str) -> &[SelectorId] {
        self.getters.get(name)
    }

    pub fn dynamic_setter_selector_ids(&self, name: &str) -> &[SelectorId] {
        self.setters.get(name)
    }

    pub fn dynamic_method_selector_ids(&self, name: &str) -> &[SelectorId] {
        self.methods.get(name)
    }
}
