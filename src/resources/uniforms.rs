//! Shader uniform definitions
//!
//! - [`MaterialUniforms`]: the Pod block every material template reads as
//!   `u_material`. Layout must match `chunks/common_fragment.wgsl`.
//! - [`UniformValue`] / [`UniformMap`]: the named uniforms a
//!   [`ShaderDescription`](crate::render::pipeline::ShaderDescription)
//!   carries, which pre-compile hooks may extend.
//! - [`TextureUniform`]: a shared, mutable texture slot. Writes after
//!   compilation are seen by the compiled program without a rebuild.

use std::borrow::Cow;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};
use parking_lot::RwLock;

use crate::resources::texture::TextureRef;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub color: Vec4,
    pub emissive: Vec3,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub shininess: f32,
    pub alpha_test: f32,
}

impl Default for MaterialUniforms {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            emissive: Vec3::ZERO,
            opacity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            shininess: 30.0,
            alpha_test: 0.0,
        }
    }
}

// ============================================================================
// Texture slot
// ============================================================================

/// Single-slot texture holder shared between its owner and compiled programs.
///
/// Holds either a texture or nothing. Cloning shares the slot.
#[derive(Debug, Clone, Default)]
pub struct TextureUniform(Arc<RwLock<Option<TextureRef>>>);

impl TextureUniform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_texture(texture: TextureRef) -> Self {
        Self(Arc::new(RwLock::new(Some(texture))))
    }

    /// Current texture, if any.
    #[must_use]
    pub fn get(&self) -> Option<TextureRef> {
        self.0.read().clone()
    }

    pub fn set(&self, texture: TextureRef) {
        *self.0.write() = Some(texture);
    }

    pub fn clear(&self) {
        *self.0.write() = None;
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.read().is_some()
    }

    /// Whether both handles point at the same slot.
    #[must_use]
    pub fn shares_slot_with(&self, other: &TextureUniform) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// Named uniforms
// ============================================================================

#[derive(Debug, Clone)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    Texture(TextureUniform),
}

impl UniformValue {
    #[must_use]
    pub fn as_texture(&self) -> Option<&TextureUniform> {
        match self {
            Self::Texture(slot) => Some(slot),
            _ => None,
        }
    }
}

/// Insertion-ordered `name -> value` map.
///
/// Order matters: texture uniforms receive bind slots in the order they
/// were registered.
#[derive(Debug, Clone, Default)]
pub struct UniformMap {
    entries: Vec<(Cow<'static, str>, UniformValue)>,
}

impl UniformMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a uniform, replacing any existing entry of the same name in place.
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: UniformValue) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn texture(&self, name: &str) -> Option<&TextureUniform> {
        self.get(name).and_then(UniformValue::as_texture)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.entries.iter().map(|(n, v)| (n.as_ref(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::texture::Texture;

    #[test]
    fn material_uniforms_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<MaterialUniforms>(), 48);
    }

    #[test]
    fn uniform_map_replaces_in_place() {
        let mut map = UniformMap::new();
        map.insert("a", UniformValue::Float(1.0));
        map.insert("b", UniformValue::Float(2.0));
        map.insert("a", UniformValue::Float(3.0));

        let names: Vec<_> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(matches!(map.get("a"), Some(UniformValue::Float(v)) if *v == 3.0));
    }

    #[test]
    fn texture_uniform_clones_share_the_slot() {
        let slot = TextureUniform::new();
        let view = slot.clone();
        assert!(!view.is_set());

        let texture = Texture::create_solid_color("red", [255, 0, 0, 255]).into_ref();
        slot.set(texture.clone());

        let seen = view.get().expect("slot should be populated");
        assert!(Arc::ptr_eq(&seen, &texture));
        assert!(slot.shares_slot_with(&view));
        assert!(!slot.shares_slot_with(&TextureUniform::new()));
    }
}
