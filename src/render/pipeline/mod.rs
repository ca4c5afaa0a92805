pub mod cache;
pub mod shader_gen;
pub mod shader_manager;

pub use cache::{ProgramCache, ProgramKey};
pub use shader_gen::{BindingKind, BindingLayout, BindingSlot, CompiledProgram, ShaderDescription, ShaderGenerator};
