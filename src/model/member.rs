use serde::{Deserialize, Serialize};

use super::ids::{ClassId, SelectorId};
use super::value_type::TypeRef;

/// One positional or named parameter slot, carrying the declared type and the
/// flags that feed into boxing decisions during signature synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamSlot {
    pub ty: TypeRef,
    /// Marked covariant by the class hierarchy (an override narrowed the
    /// declared type) or by an explicit `covariant` declaration.
    pub covariant: bool,
    /// This position accepts a default-value sentinel in place of a real
    /// argument.
    pub admits_default_sentinel: bool,
}

impl ParamSlot {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            covariant: false,
            admits_default_sentinel: false,
        }
    }

    pub fn covariant(mut self) -> Self {
        self.covariant = true;
        self
    }

    pub fn with_default_sentinel(mut self) -> Self {
        self.admits_default_sentinel = true;
        self
    }
}

/// The closed set of member-handle kinds a selector can dispatch over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberHandleKind {
    InstanceMethod,
    Getter,
    Setter,
    TearOff,
}

/// A single, fully-resolved view of a member as it participates in one
/// selector: a method, an implicit field getter, an implicit field setter, or
/// a tear-off getter. `class_id` is the class the member is physically
/// declared on (not the class a selector's `targets` map may later key it
/// under via inheritance).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberHandle {
    pub kind: MemberHandleKind,
    pub class_id: ClassId,
    pub name: String,
    pub is_abstract: bool,
    pub selector_id: SelectorId,
    pub positional: Vec<ParamSlot>,
    pub named: Vec<(String, ParamSlot)>,
    pub type_param_count: usize,
    /// `None` for void/unit returns and for plain setters.
    pub return_type: Option<TypeRef>,
    pub dynamically_callable: bool,
    /// Whether the declaring class is the machine-primitive base
    /// (`is_wasm_type`); excluded from the dynamic-call indexes.
    pub is_wasm_type: bool,
}

/// A field declared directly on a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMember {
    pub class_id: ClassId,
    pub name: String,
    pub is_abstract: bool,
    pub ty: TypeRef,
    pub has_setter: bool,
    pub setter_covariant: bool,
    pub admits_default_sentinel: bool,
    pub getter_selector_id: SelectorId,
    pub setter_selector_id: SelectorId,
    pub getter_dynamic: bool,
    pub setter_dynamic: bool,
    pub is_wasm_type: bool,
}

impl FieldMember {
    pub fn getter_handle(&self) -> MemberHandle {
        MemberHandle {
            kind: MemberHandleKind::Getter,
            class_id: self.class_id,
            name: self.name.clone(),
            is_abstract: self.is_abstract,
            selector_id: self.getter_selector_id,
            positional: Vec::new(),
            named: Vec::new(),
            type_param_count: 0,
            return_type: Some(self.ty),
            dynamically_callable: self.getter_dynamic,
            is_wasm_type: self.is_wasm_type,
        }
    }

    pub fn setter_handle(&self) -> MemberHandle {
        let mut slot = ParamSlot::new(self.ty);
        if self.setter_covariant {
            slot = slot.covariant();
        }
        if self.admits_default_sentinel {
            slot = slot.with_default_sentinel();
        }
        MemberHandle {
            kind: MemberHandleKind::Setter,
            class_id: self.class_id,
            name: self.name.clone(),
            is_abstract: self.is_abstract,
            selector_id: self.setter_selector_id,
            positional: vec![slot],
            named: Vec::new(),
            type_param_count: 0,
            return_type: None,
            dynamically_callable: self.setter_dynamic,
            is_wasm_type: self.is_wasm_type,
        }
    }
}

/// The syntactic kind of a procedure declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcedureKind {
    Method,
    Getter,
    Setter,
}

/// A method, explicit getter, or explicit setter declared directly on a
/// class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureMember {
    pub class_id: ClassId,
    pub name: String,
    pub is_abstract: bool,
    pub kind: ProcedureKind,
    pub positional: Vec<ParamSlot>,
    pub named: Vec<(String, ParamSlot)>,
    pub type_param_count: usize,
    pub return_type: Option<TypeRef>,
    pub selector_id: SelectorId,
    pub dynamically_callable: bool,
    pub has_tear_off_uses: bool,
    pub tear_off_selector_id: Option<SelectorId>,
    pub is_wasm_type: bool,
}

impl ProcedureMember {
    pub fn primary_handle(&self) -> MemberHandle {
        let kind = match self.kind {
            ProcedureKind::Method => MemberHandleKind::InstanceMethod,
            ProcedureKind::Getter => MemberHandleKind::Getter,
            ProcedureKind::Setter => MemberHandleKind::Setter,
        };
        MemberHandle {
            kind,
            class_id: self.class_id,
            name: self.name.clone(),
            is_abstract: self.is_abstract,
            selector_id: self.selector_id,
            positional: self.positional.clone(),
            named: self.named.clone(),
            type_param_count: self.type_param_count,
            return_type: self.return_type,
            dynamically_callable: self.dynamically_callable,
            is_wasm_type: self.is_wasm_type,
        }
    }

    /// Present only for methods with `has_tear_off_uses`.
    pub fn tear_off_handle(&self, function_type_class: super::ids::ClassId) -> Option<MemberHandle> {
        if self.kind != ProcedureKind::Method || !self.has_tear_off_uses {
            return None;
        }
        let selector_id = self.tear_off_selector_id?;
        Some(MemberHandle {
            kind: MemberHandleKind::TearOff,
            class_id: self.class_id,
            name: self.name.clone(),
            is_abstract: self.is_abstract,
            selector_id,
            positional: Vec::new(),
            named: Vec::new(),
            type_param_count: 0,
            return_type: Some(TypeRef::new(function_type_class, false)),
            dynamically_callable: self.dynamically_callable,
            is_wasm_type: self.is_wasm_type,
        })
    }
}

/// A declaration on a class: either a field (which yields getter/setter
/// handles) or a procedure (which yields a primary handle and, optionally, a
/// tear-off handle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClassMember {
    Field(FieldMember),
    Procedure(ProcedureMember),
}
