//! Core resource definitions
//!
//! Data structures a material is built from, independent of any GPU:
//! - Material: material definition and its pre-compile hook
//! - Texture / Image: texture assets and their CPU pixel data
//! - Uniforms: material uniform block and named shader uniforms
//! - ShaderDefines: template macro switches

pub mod image;
pub mod material;
pub mod shader_defines;
pub mod texture;
pub mod uniform_slot;
pub mod uniforms;
pub mod version_tracker;

pub use image::Image;
pub use material::{CompileHook, Material, MaterialFeatures, MaterialSettings, MaterialType, Side};
pub use shader_defines::ShaderDefines;
pub use texture::{Texture, TextureRef, TextureSampler};
pub use uniform_slot::UniformSlot;
pub use uniforms::{MaterialUniforms, TextureUniform, UniformMap, UniformValue};
