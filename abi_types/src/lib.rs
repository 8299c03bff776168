//! ABI Type Definitions
//!
//! This crate contains the core data types for constructor-argument encoding:
//! the parsed type-signature tree, the dynamically-typed argument values that
//! are matched against it, and the constructor parameter descriptors read from
//! a contract interface description. It holds no encoding logic.

pub mod constructor;
pub mod types;
pub mod value;

// Re-export commonly used types at the crate root
pub use constructor::*;
pub use types::*;
pub use value::*;
