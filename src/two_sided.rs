//! Two-Sided Material
//!
//! Wraps an existing [`Material`] so that front-facing and back-facing
//! polygons show different textures.
//!
//! The wrapper forces [`Side::Double`] and installs a pre-compile hook that
//! registers two texture uniforms, `texture_front` and `texture_back`, and
//! replaces the template's base-map sampling point with a front/back choice.
//! The base color map itself only acts as the switch that turns texturing
//! on (`use_map`); the colors come from the two extra textures.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_two_sided::{Material, Texture, TwoSidedMaterial};
//!
//! let mut card = TwoSidedMaterial::new(Material::new_standard(Vec4::ONE));
//! card.set_textures(front.into_ref(), back.into_ref());
//!
//! let program = cache.get_or_compile(card.material())?;
//! ```
//!
//! # Coupling
//!
//! The patch matches [`MAP_FRAGMENT_MARKER`] literally. Templates that do
//! not include the base-map chunk (for example [`MaterialType::Normal`])
//! compile without the branch, and both textures are then unused. This is
//! logged as a warning but is not an error.
//!
//! [`MaterialType::Normal`]: crate::resources::MaterialType::Normal

use crate::render::pipeline::ShaderDescription;
use crate::resources::material::{Material, Side};
use crate::resources::texture::TextureRef;
use crate::resources::uniforms::{TextureUniform, UniformValue};

/// Uniform name of the front-face texture.
pub const TEXTURE_FRONT: &str = "texture_front";
/// Uniform name of the back-face texture.
pub const TEXTURE_BACK: &str = "texture_back";

/// Include directive in the material templates where the base color map is
/// sampled. Must stay in sync with `templates/*.wgsl`.
pub const MAP_FRAGMENT_MARKER: &str = r#"{$ include "chunks/map_fragment" $}"#;

/// Texture and sampler declarations prepended to the fragment source.
pub const FRONT_BACK_DECLARATIONS: &str = "\
@group({{ material_group }}) @binding({{ bindings.texture_front }}) var t_texture_front: texture_2d<f32>;
@group({{ material_group }}) @binding({{ bindings.texture_front_sampler }}) var s_texture_front: sampler;
@group({{ material_group }}) @binding({{ bindings.texture_back }}) var t_texture_back: texture_2d<f32>;
@group({{ material_group }}) @binding({{ bindings.texture_back_sampler }}) var s_texture_back: sampler;
";

// Both textures are sampled before choosing: `textureSample` is only valid
// in uniform control flow and `front_facing` is not uniform.
const FRONT_BACK_BRANCH: &str = "
$$ if use_map
    let texture_color_front = textureSample(t_texture_front, s_texture_front, in.map_uv);
    let texture_color_back = textureSample(t_texture_back, s_texture_back, in.map_uv);
    diffuse_color *= select(texture_color_back, texture_color_front, in.front_facing);
$$ endif
";

/// Program cache discriminator for patched materials.
const PROGRAM_CACHE_KEY: &str = "two_sided";

/// Result of [`inject_front_back_branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// The marker was found and replaced.
    Applied,
    /// No marker in the source; only the declarations were added.
    MarkerMissing,
}

/// Patches a raw fragment template: prepends [`FRONT_BACK_DECLARATIONS`] and
/// replaces the first [`MAP_FRAGMENT_MARKER`] with the front/back branch.
#[must_use]
pub fn inject_front_back_branch(fragment_source: &str) -> (String, Injection) {
    let injection = if fragment_source.contains(MAP_FRAGMENT_MARKER) {
        Injection::Applied
    } else {
        Injection::MarkerMissing
    };

    let body = fragment_source.replacen(MAP_FRAGMENT_MARKER, FRONT_BACK_BRANCH, 1);

    let mut patched = String::with_capacity(FRONT_BACK_DECLARATIONS.len() + body.len());
    patched.push_str(FRONT_BACK_DECLARATIONS);
    patched.push_str(&body);
    (patched, injection)
}

/// A material that renders a separate texture on each face.
#[derive(Debug)]
pub struct TwoSidedMaterial {
    material: Material,
    texture_front: TextureUniform,
    texture_back: TextureUniform,
}

impl TwoSidedMaterial {
    /// Takes over `material`, switching it to double-sided rendering.
    ///
    /// The material's other settings are left as they are. Any hook it
    /// already had is replaced.
    #[must_use]
    pub fn new(mut material: Material) -> Self {
        material.set_side(Side::Double);

        let texture_front = TextureUniform::new();
        let texture_back = TextureUniform::new();

        let front = texture_front.clone();
        let back = texture_back.clone();
        material.set_on_before_compile(move |shader: &mut ShaderDescription| {
            shader.uniforms.insert(TEXTURE_FRONT, UniformValue::Texture(front.clone()));
            shader.uniforms.insert(TEXTURE_BACK, UniformValue::Texture(back.clone()));

            let (patched, injection) = inject_front_back_branch(&shader.fragment_shader);
            if injection == Injection::MarkerMissing {
                log::warn!(
                    "Template '{}' has no base map sampling point; front/back textures will be ignored",
                    shader.shader_name
                );
            }
            shader.fragment_shader = patched;
        });
        material.set_program_cache_key(Some(PROGRAM_CACHE_KEY.into()));

        Self {
            material,
            texture_front,
            texture_back,
        }
    }

    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Mutable access to the wrapped material.
    ///
    /// Changing the side back from [`Side::Double`] hides one of the faces.
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    #[must_use]
    pub fn into_material(self) -> Material {
        self.material
    }

    pub fn set_texture_front(&mut self, texture: TextureRef) {
        bind_face_texture(&mut self.material, &self.texture_front, texture);
    }

    pub fn set_texture_back(&mut self, texture: TextureRef) {
        bind_face_texture(&mut self.material, &self.texture_back, texture);
    }

    /// Front first, then back.
    pub fn set_textures(&mut self, texture_front: TextureRef, texture_back: TextureRef) {
        self.set_texture_front(texture_front);
        self.set_texture_back(texture_back);
    }

    #[must_use]
    pub fn texture_front(&self) -> Option<TextureRef> {
        self.texture_front.get()
    }

    #[must_use]
    pub fn texture_back(&self) -> Option<TextureRef> {
        self.texture_back.get()
    }
}

// The first face texture also becomes the base map, which is what enables
// `use_map`. A map that is already set is never replaced.
fn bind_face_texture(material: &mut Material, slot: &TextureUniform, texture: TextureRef) {
    if !material.has_map() {
        material.set_map(Some(texture.clone()));
    }
    texture.needs_update();
    slot.set(texture);
}

impl From<Material> for TwoSidedMaterial {
    fn from(material: Material) -> Self {
        Self::new(material)
    }
}
