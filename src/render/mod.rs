//! Program generation
//!
//! Turns a [`Material`](crate::resources::Material) into WGSL source:
//! loads its templates, lets its pre-compile hook patch them, allocates
//! material bindings and renders the result.

pub mod pipeline;

pub use pipeline::{CompiledProgram, ProgramCache, ShaderDescription};
