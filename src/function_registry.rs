//! The external function registry (§6): resolves a compiled member handle to
//! its callable reference. Out of scope for this crate: actually compiling
//! the function body.

use serde::{Deserialize, Serialize};

use crate::model::MemberHandle;

/// An opaque reference to a compiled function, as resolved by the
/// surrounding driver (e.g. a symbol name or a function-table index in the
/// eventual binary module). This crate never interprets the value — it only
/// stores it in the packed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRef(pub String);

pub trait FunctionRegistry {
    fn get_existing_function(&self, handle: &MemberHandle) -> Option<FunctionRef>;
}
