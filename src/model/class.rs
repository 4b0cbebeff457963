use serde::{Deserialize, Serialize};

use super::ids::ClassId;
use super::member::ClassMember;

/// An immutable node in the class hierarchy, supplied by the (external) class
/// hierarchy builder. Classes are consumed in superclass-first order: a
/// class's `super_id`, if present, must already have been visited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub class_id: ClassId,
    /// `None` for the synthetic top descriptor, which has no class in
    /// source.
    pub source_name: Option<String>,
    pub super_id: Option<ClassId>,
    pub is_abstract: bool,
    /// Whether this is the machine-primitive base class designated by
    /// `BuilderConfig::wasm_types_base_class`.
    pub is_wasm_type: bool,
    pub members: Vec<ClassMember>,
}

impl ClassDescriptor {
    pub fn is_synthetic_top(&self) -> bool {
        self.source_name.is_none()
    }
}
