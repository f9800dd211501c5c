//! Implementation of the `#[derive(Inspect)]` macro.
//!
//! Generates the property shape, the per-instance reader and property name
//! constants from `#[inspect(...)]` field annotations.

mod attrs;
mod derive;

pub use derive::inspect_derive_impl;
