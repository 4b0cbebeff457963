use serde::{Deserialize, Serialize};

use crate::model::{ClassId, SelectorId};

/// Designations injected by the embedding driver (§6, §9 "Global state"):
/// named classes and members the core treats specially, rather than
/// hardcoded constants. The builder owns exactly one `BuilderConfig` for its
/// lifetime; there is no process-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// The root `object` class whose members a synthetic top descriptor
    /// borrows (§4.5, step 3).
    pub object_class_id: ClassId,
    /// The designated top descriptor class, used as the upper bound when a
    /// class set has no common ancestor.
    pub top_class_id: ClassId,
    /// The machine-primitive base class. Classes rooted here skip the normal
    /// inheritance step during the walk (§4.5, step 1 exception) and are
    /// excluded from the dynamic-call indexes (§4.3).
    pub wasm_types_base_class_id: ClassId,
    /// The selector id of `object_no_such_method`, the fallback invoked on a
    /// dynamic-dispatch miss. Its selector is always live (§4.6).
    pub no_such_method_selector_id: SelectorId,
    /// The class used to represent synthesized function-type descriptors
    /// (tear-off return types).
    pub function_type_class_id: ClassId,
    /// The class used to represent a type parameter's runtime representation
    /// in a synthesized signature.
    pub type_param_repr_class_id: ClassId,
    /// The member name that triggers the equality-operator nullability
    /// special case (§4.4). Defaults to `"=="`.
    #[serde(default = "default_equality_operator_name")]
    pub equality_operator_name: String,
}

fn default_equality_operator_name() -> String {
    "==".to_string()
}
