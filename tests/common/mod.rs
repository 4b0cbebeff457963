//! Shared fixtures for the integration test suite.

use std::collections::HashMap;

use vtable_builder::model::{
    ClassDescriptor, ClassId, ClassMember, FieldMember, MemberHandle, ProcedureKind,
    ProcedureMember, SelectorId, TypeRef,
};
use vtable_builder::{BuilderConfig, FunctionRef, FunctionRegistry};

pub fn config() -> BuilderConfig {
    BuilderConfig {
        object_class_id: ClassId(0),
        top_class_id: ClassId(0),
        wasm_types_base_class_id: ClassId(999),
        no_such_method_selector_id: SelectorId(999),
        function_type_class_id: ClassId(50),
        type_param_repr_class_id: ClassId(51),
        equality_operator_name: "==".to_string(),
    }
}

pub fn object_class() -> ClassDescriptor {
    ClassDescriptor {
        class_id: ClassId(0),
        source_name: Some("Object".into()),
        super_id: None,
        is_abstract: false,
        is_wasm_type: false,
        members: Vec::new(),
    }
}

pub fn class(
    id: u32,
    super_id: u32,
    is_abstract: bool,
    members: Vec<ClassMember>,
) -> ClassDescriptor {
    ClassDescriptor {
        class_id: ClassId(id),
        source_name: Some(format!("C{id}")),
        super_id: Some(ClassId(super_id)),
        is_abstract,
        is_wasm_type: false,
        members,
    }
}

pub fn method(class_id: ClassId, name: &str, selector_id: u32, is_abstract: bool, dynamic: bool) -> ClassMember {
    ClassMember::Procedure(ProcedureMember {
        class_id,
        name: name.to_string(),
        is_abstract,
        kind: ProcedureKind::Method,
        positional: Vec::new(),
        named: Vec::new(),
        type_param_count: 0,
        return_type: None,
        selector_id: SelectorId(selector_id),
        dynamically_callable: dynamic,
        has_tear_off_uses: false,
        tear_off_selector_id: None,
        is_wasm_type: false,
    })
}

pub fn method_with_tear_off(
    class_id: ClassId,
    name: &str,
    selector_id: u32,
    tear_off_id: u32,
) -> ClassMember {
    ClassMember::Procedure(ProcedureMember {
        class_id,
        name: name.to_string(),
        is_abstract: false,
        kind: ProcedureKind::Method,
        positional: Vec::new(),
        named: Vec::new(),
        type_param_count: 0,
        return_type: None,
        selector_id: SelectorId(selector_id),
        dynamically_callable: true,
        has_tear_off_uses: true,
        tear_off_selector_id: Some(SelectorId(tear_off_id)),
        is_wasm_type: false,
    })
}

pub fn field(
    class_id: ClassId,
    name: &str,
    getter_id: u32,
    setter_id: u32,
    has_setter: bool,
) -> ClassMember {
    ClassMember::Field(FieldMember {
        class_id,
        name: name.to_string(),
        is_abstract: false,
        ty: TypeRef::new(ClassId(0), false),
        has_setter,
        setter_covariant: false,
        admits_default_sentinel: false,
        getter_selector_id: SelectorId(getter_id),
        setter_selector_id: SelectorId(setter_id),
        getter_dynamic: true,
        setter_dynamic: true,
        is_wasm_type: false,
    })
}

pub fn call_counts(pairs: &[(u32, u64)]) -> HashMap<SelectorId, u64> {
    pairs.iter().map(|&(id, count)| (SelectorId(id), count)).collect()
}

pub struct EchoFunctions;

impl FunctionRegistry for EchoFunctions {
    fn get_existing_function(&self, handle: &MemberHandle) -> Option<FunctionRef> {
        Some(FunctionRef(format!("{}::{}", handle.class_id, handle.name)))
    }
}
