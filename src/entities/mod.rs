//! Resource declaration helpers

#[macro_use]
pub mod macros;
