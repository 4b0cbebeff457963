//! vtable_builder: builds a flat virtual dispatch table from a class
//! hierarchy and per-call-site use counts.

pub mod builder;
pub mod config;
pub mod error;
pub mod function_registry;
pub mod lattice;
pub mod model;
pub mod pack;
pub mod params;
pub mod registry;
pub mod signature;
pub mod walker;

pub use builder::{build_dispatch_table, BuildOutput};
pub use config::BuilderConfig;
pub use error::{BuildError, Result};
pub use function_registry::{FunctionRef, FunctionRegistry};
pub use pack::DispatchTable;
pub use walker::Selector;
