//! C1: TypeLattice. Computes least-upper-bound classes over a set of class
//! descriptors and maps source types to synthesized value types.

use std::collections::HashSet;

use crate::config::BuilderConfig;
use crate::model::{ClassDescriptor, ClassId, ValueType};

/// Precomputed ancestry over the class hierarchy, built once from the
/// superclass-first class list and reused for every `upper_bound` query
/// during signature synthesis.
pub struct TypeLattice {
    super_of: Vec<Option<ClassId>>,
    depth: Vec<u32>,
    top: ClassId,
}

impl TypeLattice {
    /// `classes` must be indexable by `ClassId` (dense `[0, N)`, superclass
    /// before subclass), as guaranteed by the external hierarchy builder.
    pub fn new(classes: &[ClassDescriptor], config: &BuilderConfig) -> Self {
        let mut super_of = vec![None; classes.len()];
        let mut depth = vec![0u32; classes.len()];
        for class in classes {
            let idx = class.class_id.index();
            super_of[idx] = class.super_id;
            depth[idx] = match class.super_id {
                Some(super_id) => depth[super_id.index()] + 1,
                None => 0,
            };
        }
        Self {
            super_of,
            depth,
            top: config.top_class_id,
        }
    }

    fn ancestors_inclusive(&self, class_id: ClassId) -> HashSet<ClassId> {
        let mut set = HashSet::new();
        let mut cur = Some(class_id);
        while let Some(c) = cur {
            set.insert(c);
            cur = self.super_of[c.index()];
        }
        set
    }

    fn depth_of(&self, class_id: ClassId) -> u32 {
        self.depth[class_id.index()]
    }

    /// Least common ancestor of `classes`, or the designated top descriptor
    /// if the set is empty or spans unrelated hierarchies. Ties among
    /// equally-specific ancestors are broken by preferring the smaller
    /// `class_id`.
    pub fn upper_bound(&self, classes: &[ClassId]) -> ClassId {
        let mut iter = classes.iter();
        let Some(&first) = iter.next() else {
            return self.top;
        };
        let mut common = self.ancestors_inclusive(first);
        for &c in iter {
            let ancestors = self.ancestors_inclusive(c);
            common.retain(|candidate| ancestors.contains(candidate));
            if common.is_empty() {
                return self.top;
            }
        }
        common
            .into_iter()
            .max_by_key(|&c| (self.depth_of(c), std::cmp::Reverse(c)))
            .unwrap_or(self.top)
    }

    /// Pure: builds the synthesized value type for a class, with an explicit
    /// nullability bit and an explicit boxed bit.
    ///
    /// `ensure_boxed = true` forces a heap/reference representation even for
    /// classes with a natural unboxed representation — needed when a
    /// parameter position is covariant (may require a dynamic type check) or
    /// may hold a default-value sentinel incompatible with the unboxed form.
    pub fn value_type_for(&self, class_id: ClassId, nullable: bool, ensure_boxed: bool) -> ValueType {
        ValueType::new(class_id, nullable, ensure_boxed)
    }
}
