use thiserror::Error;

use crate::model::{ClassId, SelectorId};

/// Failure kinds recognized by the builder (§7). The core is total on
/// well-formed inputs: every variant here indicates either malformed input
/// from an external collaborator or a builder bug, never a recoverable
/// condition.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("class {class_id} was visited before its superclass {super_id}")]
    HierarchyMalformed { class_id: ClassId, super_id: ClassId },

    #[error(
        "merging selector {selector_id} yields conflicting type-parameter arity ({left} vs {right})"
    )]
    ParameterShapeConflict {
        selector_id: SelectorId,
        left: usize,
        right: usize,
    },

    #[error("member `{member_name}` on class {class_id} resolves to no selector id")]
    SelectorMetadataMissing {
        class_id: ClassId,
        member_name: String,
    },

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

pub type Result<T> = std::result::Result<T, BuildError>;
