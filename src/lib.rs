#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Front/back textured materials.
//!
//! [`TwoSidedMaterial`] decorates a [`Material`] so each face of a mesh can
//! show its own texture. The work happens in a pre-compile hook that patches
//! the material's WGSL template before [`ProgramCache`] renders it.

pub mod errors;
pub mod render;
pub mod resources;
pub mod settings;
pub mod two_sided;

pub use errors::{Error, Result};
pub use render::{CompiledProgram, ProgramCache, ShaderDescription};
pub use resources::{Image, Material, MaterialType, ShaderDefines, Side, Texture, TextureRef, TextureUniform};
pub use settings::CompilerSettings;
pub use two_sided::TwoSidedMaterial;
