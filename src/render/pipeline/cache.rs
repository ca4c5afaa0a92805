use std::borrow::Cow;
use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use uuid::Uuid;

use super::shader_gen::{CompiledProgram, ShaderGenerator};
use crate::errors::Result;
use crate::resources::material::Material;
use crate::settings::CompilerSettings;

/// Everything that decides whether a material's cached program is still valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgramKey {
    pub material: Uuid,
    pub material_version: u64,
    pub defines_hash: u64,
    pub cache_key: Option<Cow<'static, str>>,
}

impl ProgramKey {
    #[must_use]
    pub fn for_material(material: &Material) -> Self {
        Self {
            material: material.uuid,
            material_version: material.version(),
            defines_hash: material.shader_defines().compute_hash(),
            cache_key: material.program_cache_key().map(|k| Cow::Owned(k.to_string())),
        }
    }
}

/// Lazily compiles material programs and keeps one per material.
///
/// Programs are built on first request and rebuilt whenever the material's
/// key changes; each build runs the material's pre-compile hook again.
pub struct ProgramCache {
    settings: CompilerSettings,
    programs: FxHashMap<Uuid, (ProgramKey, CompiledProgram)>,
    compile_count: u64,
}

impl ProgramCache {
    #[must_use]
    pub fn new(settings: CompilerSettings) -> Self {
        Self {
            settings,
            programs: FxHashMap::default(),
            compile_count: 0,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    pub fn get_or_compile(&mut self, material: &Material) -> Result<&CompiledProgram> {
        let key = ProgramKey::for_material(material);

        let entry = match self.programs.entry(material.uuid) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().0 != key {
                    log::debug!(
                        "Recompiling '{}' for material {} (version {})",
                        material.shader_name(),
                        material.uuid,
                        key.material_version
                    );
                    let program = ShaderGenerator::compile(material, &self.settings)?;
                    self.compile_count += 1;
                    occupied.insert((key, program));
                }
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => {
                log::debug!("Compiling '{}' for material {}", material.shader_name(), material.uuid);
                let program = ShaderGenerator::compile(material, &self.settings)?;
                self.compile_count += 1;
                vacant.insert((key, program))
            }
        };

        Ok(&entry.1)
    }

    /// Cached program for `material`, without compiling or validating it.
    #[must_use]
    pub fn get(&self, material: &Uuid) -> Option<&CompiledProgram> {
        self.programs.get(material).map(|(_, program)| program)
    }

    /// Drops the cached program; the next request recompiles.
    pub fn invalidate(&mut self, material: &Uuid) -> bool {
        self.programs.remove(material).is_some()
    }

    /// Total number of compilations performed.
    #[must_use]
    pub fn compile_count(&self) -> u64 {
        self.compile_count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

impl Default for ProgramCache {
    fn default() -> Self {
        Self::new(CompilerSettings::default())
    }
}
