mod hook;

pub use hook::CompileHook;

use std::borrow::Cow;

use bitflags::bitflags;
use glam::{Vec3, Vec4};
use uuid::Uuid;

use crate::render::pipeline::ShaderDescription;
use crate::resources::shader_defines::ShaderDefines;
use crate::resources::texture::TextureRef;
use crate::resources::uniform_slot::UniformSlot;
use crate::resources::uniforms::{MaterialUniforms, TextureUniform, UniformMap, UniformValue};
use crate::resources::version_tracker::MutGuard;

// Shader variant switches
bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MaterialFeatures: u32 {
        const USE_MAP        = 1 << 0;
        const USE_ALPHA_TEST = 1 << 1;
        const DOUBLE_SIDED   = 1 << 2;
    }
}

impl MaterialFeatures {
    /// Template define name for each feature bit.
    const DEFINE_NAMES: [(MaterialFeatures, &'static str); 3] = [
        (MaterialFeatures::USE_MAP, "use_map"),
        (MaterialFeatures::USE_ALPHA_TEST, "use_alpha_test"),
        (MaterialFeatures::DOUBLE_SIDED, "double_sided"),
    ];
}

// ============================================================================
// Material kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialType {
    Basic,
    Lambert,
    Phong,
    Standard,
    Physical,
    Toon,
    Depth,
    /// Visualises normals. Its template never samples a base color map.
    Normal,
}

impl MaterialType {
    /// Template under `templates/` used for the fragment stage.
    #[must_use]
    pub fn shader_name(self) -> &'static str {
        match self {
            Self::Basic => "mesh_basic",
            Self::Lambert => "mesh_lambert",
            Self::Phong => "mesh_phong",
            Self::Standard | Self::Physical => "mesh_standard",
            Self::Toon => "mesh_toon",
            Self::Depth => "mesh_depth",
            Self::Normal => "mesh_normal",
        }
    }

    fn default_defines(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Physical => &[("physical", "1")],
            Self::Toon => &[("toon_steps", "3")],
            _ => &[],
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

impl Side {
    /// Face culled by the rasterizer for this side mode.
    #[must_use]
    pub fn cull_mode(self) -> Option<wgpu::Face> {
        match self {
            Side::Front => Some(wgpu::Face::Back),
            Side::Back => Some(wgpu::Face::Front),
            Side::Double => None,
        }
    }
}

/// Pipeline-level state. Any change rebuilds the program.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct MaterialSettings {
    pub transparent: bool,
    pub depth_write: bool,
    pub depth_test: bool,
    pub side: Side,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            transparent: false,
            depth_write: true,
            depth_test: true,
            side: Side::Front,
        }
    }
}

// ============================================================================
// Material
// ============================================================================

#[derive(Debug)]
pub struct Material {
    pub uuid: Uuid,
    pub name: Option<Cow<'static, str>>,
    kind: MaterialType,
    uniforms: UniformSlot<MaterialUniforms>,
    map: TextureUniform,
    settings: MaterialSettings,
    program_cache_key: Option<Cow<'static, str>>,
    on_before_compile: Option<CompileHook>,
    /// Layout version. Bumped by anything that changes the generated program.
    version: u64,
}

impl Material {
    #[must_use]
    pub fn new(kind: MaterialType) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: None,
            kind,
            uniforms: UniformSlot::new(MaterialUniforms::default(), "MaterialUniforms"),
            map: TextureUniform::new(),
            settings: MaterialSettings::default(),
            program_cache_key: None,
            on_before_compile: None,
            version: 0,
        }
    }

    #[must_use]
    pub fn with_color(kind: MaterialType, color: Vec4) -> Self {
        let mut material = Self::new(kind);
        material.uniforms.color = color;
        material
    }

    #[must_use]
    pub fn new_basic(color: Vec4) -> Self {
        Self::with_color(MaterialType::Basic, color)
    }

    #[must_use]
    pub fn new_lambert(color: Vec4) -> Self {
        Self::with_color(MaterialType::Lambert, color)
    }

    #[must_use]
    pub fn new_phong(color: Vec4) -> Self {
        Self::with_color(MaterialType::Phong, color)
    }

    #[must_use]
    pub fn new_standard(color: Vec4) -> Self {
        Self::with_color(MaterialType::Standard, color)
    }

    #[must_use]
    pub fn new_physical(color: Vec4) -> Self {
        Self::with_color(MaterialType::Physical, color)
    }

    #[must_use]
    pub fn new_toon(color: Vec4) -> Self {
        Self::with_color(MaterialType::Toon, color)
    }

    #[must_use]
    pub fn material_type(&self) -> MaterialType {
        self.kind
    }

    #[must_use]
    pub fn shader_name(&self) -> &'static str {
        self.kind.shader_name()
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    // --- Uniforms ---

    #[must_use]
    pub fn uniforms(&self) -> &MaterialUniforms {
        self.uniforms.get()
    }

    #[must_use]
    pub fn uniform_version(&self) -> u64 {
        self.uniforms.version()
    }

    #[must_use]
    pub fn uniform_bytes(&self) -> &[u8] {
        self.uniforms.as_bytes()
    }

    #[must_use]
    pub fn color(&self) -> Vec4 {
        self.uniforms.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.uniforms.color = color;
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.uniforms.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.uniforms.opacity = opacity;
    }

    #[must_use]
    pub fn emissive(&self) -> Vec3 {
        self.uniforms.emissive
    }

    pub fn set_emissive(&mut self, emissive: Vec3) {
        self.uniforms.emissive = emissive;
    }

    pub fn set_roughness(&mut self, roughness: f32) {
        self.uniforms.roughness = roughness;
    }

    pub fn set_metalness(&mut self, metalness: f32) {
        self.uniforms.metalness = metalness;
    }

    pub fn set_shininess(&mut self, shininess: f32) {
        self.uniforms.shininess = shininess;
    }

    #[must_use]
    pub fn alpha_test(&self) -> f32 {
        self.uniforms.alpha_test
    }

    /// A threshold of 0 disables alpha testing; crossing that boundary
    /// rebuilds the program.
    pub fn set_alpha_test(&mut self, alpha_test: f32) {
        let was_enabled = self.uniforms.alpha_test > 0.0;
        self.uniforms.alpha_test = alpha_test;
        if was_enabled != (alpha_test > 0.0) {
            self.bump_version();
        }
    }

    // --- Settings ---

    #[must_use]
    pub fn settings(&self) -> &MaterialSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> MutGuard<'_, MaterialSettings> {
        MutGuard::new(&mut self.settings, &mut self.version)
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.settings.side
    }

    pub fn set_side(&mut self, side: Side) {
        self.settings_mut().side = side;
    }

    #[must_use]
    pub fn transparent(&self) -> bool {
        self.settings.transparent
    }

    pub fn set_transparent(&mut self, transparent: bool) {
        self.settings_mut().transparent = transparent;
    }

    // --- Base color map ---

    #[must_use]
    pub fn map(&self) -> Option<TextureRef> {
        self.map.get()
    }

    #[must_use]
    pub fn has_map(&self) -> bool {
        self.map.is_set()
    }

    /// Assigns or clears the base color map.
    ///
    /// Swapping one texture for another is picked up by already compiled
    /// programs; adding or removing the map toggles `use_map` and rebuilds.
    pub fn set_map(&mut self, map: Option<TextureRef>) {
        let had_map = self.map.is_set();
        match map {
            Some(texture) => self.map.set(texture),
            None => self.map.clear(),
        }
        if had_map != self.map.is_set() {
            self.bump_version();
        }
    }

    // --- Compile hook ---

    /// Installs a callback that may rewrite this material's shader sources
    /// and register extra uniforms right before compilation.
    ///
    /// Replaces any previously installed hook.
    pub fn set_on_before_compile<F>(&mut self, hook: F)
    where
        F: Fn(&mut ShaderDescription) + Send + Sync + 'static,
    {
        self.on_before_compile = Some(CompileHook::new(hook));
        self.bump_version();
    }

    pub fn clear_on_before_compile(&mut self) {
        if self.on_before_compile.take().is_some() {
            self.bump_version();
        }
    }

    #[must_use]
    pub fn on_before_compile(&self) -> Option<&CompileHook> {
        self.on_before_compile.as_ref()
    }

    #[must_use]
    pub fn has_on_before_compile(&self) -> bool {
        self.on_before_compile.is_some()
    }

    /// Extra discriminator for programs patched by a hook.
    #[must_use]
    pub fn program_cache_key(&self) -> Option<&str> {
        self.program_cache_key.as_deref()
    }

    pub fn set_program_cache_key(&mut self, key: Option<Cow<'static, str>>) {
        if self.program_cache_key != key {
            self.program_cache_key = key;
            self.bump_version();
        }
    }

    // --- Shader inputs ---

    #[must_use]
    pub fn features(&self) -> MaterialFeatures {
        let mut features = MaterialFeatures::empty();
        features.set(MaterialFeatures::USE_MAP, self.has_map());
        features.set(MaterialFeatures::USE_ALPHA_TEST, self.uniforms.alpha_test > 0.0);
        features.set(MaterialFeatures::DOUBLE_SIDED, self.settings.side == Side::Double);
        features
    }

    #[must_use]
    pub fn shader_defines(&self) -> ShaderDefines {
        let mut defines = ShaderDefines::from(self.kind.default_defines());
        let features = self.features();
        for (flag, name) in MaterialFeatures::DEFINE_NAMES {
            if features.contains(flag) {
                defines.set(name, "1");
            }
        }
        defines
    }

    /// Uniforms every material exposes to its shader before hooks run.
    #[must_use]
    pub fn builtin_uniforms(&self) -> UniformMap {
        let data = self.uniforms.get();
        let mut uniforms = UniformMap::new();
        uniforms.insert("diffuse", UniformValue::Vec4(data.color));
        uniforms.insert("opacity", UniformValue::Float(data.opacity));
        uniforms.insert("emissive", UniformValue::Vec3(data.emissive));
        uniforms.insert("alpha_test", UniformValue::Float(data.alpha_test));
        if self.has_map() {
            uniforms.insert(BUILTIN_MAP, UniformValue::Texture(self.map.clone()));
        }
        uniforms
    }
}

/// Uniform name of the base color map.
pub const BUILTIN_MAP: &str = "map";

impl Default for Material {
    fn default() -> Self {
        Self::new(MaterialType::Basic)
    }
}
