//! tweezing-api-core: the Value model shared by tweens and binding layers (engine-agnostic)

pub mod json;
pub mod shape;
pub mod value;

pub use shape::{Key, Structure};
pub use value::{Value, ValueKind};
