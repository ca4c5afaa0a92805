use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use super::shader_manager::{VERTEX_TEMPLATE, get_env, load_source};
use crate::errors::Result;
use crate::resources::material::{BUILTIN_MAP, Material};
use crate::resources::shader_defines::ShaderDefines;
use crate::resources::uniforms::UniformMap;
use crate::settings::CompilerSettings;

/// Mutable view of a material's shader inputs handed to its pre-compile hook.
///
/// Sources are raw template text: `{$ include $}` directives and `$$ if`
/// guards have not been expanded yet.
#[derive(Debug, Clone)]
pub struct ShaderDescription {
    pub shader_name: &'static str,
    pub uniforms: UniformMap,
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub defines: ShaderDefines,
}

impl ShaderDescription {
    /// Fresh description straight from the material's templates.
    pub fn from_material(material: &Material) -> Result<Self> {
        let shader_name = material.shader_name();
        Ok(Self {
            shader_name,
            uniforms: material.builtin_uniforms(),
            vertex_shader: load_source(VERTEX_TEMPLATE)?,
            fragment_shader: load_source(&format!("templates/{shader_name}"))?,
            defines: material.shader_defines(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    UniformBuffer,
    Texture,
    Sampler,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSlot {
    pub name: String,
    pub binding: u32,
    pub kind: BindingKind,
}

/// Material bind group layout, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingLayout {
    pub group: u32,
    pub slots: Vec<BindingSlot>,
}

impl BindingLayout {
    /// Material uniform block first, then the base map (if enabled), then
    /// every other texture uniform in registration order. Each texture
    /// takes two slots: `name` and `name_sampler`.
    #[must_use]
    pub fn allocate(uniforms: &UniformMap, defines: &ShaderDefines, group: u32) -> Self {
        let mut layout = Self { group, slots: Vec::new() };
        layout.push("material".to_string(), BindingKind::UniformBuffer);

        if defines.contains("use_map") && uniforms.texture(BUILTIN_MAP).is_some() {
            layout.push_texture(BUILTIN_MAP);
        }

        for (name, value) in uniforms.iter() {
            if name != BUILTIN_MAP && value.as_texture().is_some() {
                layout.push_texture(name);
            }
        }
        layout
    }

    fn push(&mut self, name: String, kind: BindingKind) {
        let binding = self.slots.len() as u32;
        self.slots.push(BindingSlot { name, binding, kind });
    }

    fn push_texture(&mut self, name: &str) {
        self.push(name.to_string(), BindingKind::Texture);
        self.push(format!("{name}_sampler"), BindingKind::Sampler);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<u32> {
        self.slots.iter().find(|s| s.name == name).map(|s| s.binding)
    }

    fn as_map(&self) -> BTreeMap<&str, u32> {
        self.slots.iter().map(|s| (s.name.as_str(), s.binding)).collect()
    }
}

#[derive(Serialize)]
struct ShaderContext<'a> {
    #[serde(flatten)]
    defines: &'a BTreeMap<String, String>,

    bindings: BTreeMap<&'a str, u32>,
    material_group: u32,
}

/// Output of one compilation.
///
/// `uniforms` holds the very slots registered during compilation, so
/// texture slots updated afterwards are visible here without a rebuild.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    pub shader_name: &'static str,
    pub source: String,
    pub uniforms: UniformMap,
    pub bindings: BindingLayout,
    pub defines: ShaderDefines,
    pub cull_mode: Option<wgpu::Face>,
}

pub struct ShaderGenerator;

impl ShaderGenerator {
    /// Builds a program for `material`, running its pre-compile hook once.
    pub fn compile(material: &Material, settings: &CompilerSettings) -> Result<CompiledProgram> {
        let mut description = ShaderDescription::from_material(material)?;

        if let Some(hook) = material.on_before_compile() {
            log::trace!("Running pre-compile hook for material {}", material.uuid);
            hook.call(&mut description);
        }

        Self::render(description, material, settings)
    }

    fn render(
        description: ShaderDescription,
        material: &Material,
        settings: &CompilerSettings,
    ) -> Result<CompiledProgram> {
        let bindings = BindingLayout::allocate(&description.uniforms, &description.defines, settings.material_group);

        let ctx = ShaderContext {
            defines: description.defines.as_map(),
            bindings: bindings.as_map(),
            material_group: settings.material_group,
        };

        let env = get_env();
        let vertex = env.render_str(&description.vertex_shader, &ctx)?;
        let fragment = env.render_str(&description.fragment_shader, &ctx)?;

        let mut source = String::with_capacity(vertex.len() + fragment.len() + 64);
        if settings.header_comment {
            let _ = writeln!(source, "// === Auto-generated Material Shader: {} ===", description.shader_name);
        }
        source.push_str(&vertex);
        source.push('\n');
        source.push_str(&fragment);

        if settings.log_sources {
            log::debug!("Generated shader for material {}:\n{}", material.uuid, source);
        }

        Ok(CompiledProgram {
            shader_name: description.shader_name,
            source,
            uniforms: description.uniforms,
            bindings,
            defines: description.defines,
            cull_mode: material.side().cull_mode(),
        })
    }
}
