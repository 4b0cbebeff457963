use serde::{Deserialize, Serialize};

use super::ids::ClassId;

/// A declared type as it appears on a member's signature: an upper-bound
/// class plus a nullability bit. This is the shape external parameter/return
/// metadata is assumed to already provide (see §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub class_id: ClassId,
    pub nullable: bool,
}

impl TypeRef {
    pub fn new(class_id: ClassId, nullable: bool) -> Self {
        Self { class_id, nullable }
    }
}

/// A materialized slot in a synthesized call signature: an upper-bound class,
/// a nullability bit, and a boxed bit forcing a uniform heap representation
/// regardless of the class's natural machine representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueType {
    pub class_id: ClassId,
    pub nullable: bool,
    pub boxed: bool,
}

impl ValueType {
    pub fn new(class_id: ClassId, nullable: bool, boxed: bool) -> Self {
        Self {
            class_id,
            nullable,
            boxed,
        }
    }
}

/// A callable signature unified across every implementation of a selector:
/// contravariant in its inputs, covariant in its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallSignature {
    pub inputs: Vec<ValueType>,
    pub outputs: Vec<ValueType>,
}
