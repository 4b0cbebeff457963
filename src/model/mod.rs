// Data model shared by every component: external inputs (ClassDescriptor,
// the ClassMember declarations, MemberHandle) and the value-type vocabulary
// signatures are synthesized from.

pub mod class;
pub mod ids;
pub mod member;
pub mod value_type;

pub use class::ClassDescriptor;
pub use ids::{ClassId, SelectorId};
pub use member::{
    ClassMember, FieldMember, MemberHandle, MemberHandleKind, ParamSlot, ProcedureKind,
    ProcedureMember,
};
pub use value_type::{CallSignature, TypeRef, ValueType};
