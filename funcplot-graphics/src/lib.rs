//! Graphics model shared by the `funcplot` interpreter and renderers.

pub mod bbox;
pub mod picture;
pub mod transform;
pub mod types;
