//! Shader Compiler Settings
//!
//! Plain configuration consumed by [`ProgramCache`](crate::render::pipeline::ProgramCache).
//!
//! ```rust,ignore
//! use myth_two_sided::settings::CompilerSettings;
//!
//! let settings = CompilerSettings {
//!     log_sources: true,
//!     ..Default::default()
//! };
//! ```

/// Controls how material programs are generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerSettings {
    /// Prefix every generated module with an identifying comment line.
    pub header_comment: bool,

    /// Emit the full generated WGSL at `debug` level after each compilation.
    pub log_sources: bool,

    /// Bind group index used for material resources (uniform block, maps,
    /// and any textures registered by a pre-compile hook).
    ///
    /// Groups 0 and 1 are taken by the frame and model uniforms declared in
    /// the vertex template.
    pub material_group: u32,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            header_comment: true,
            log_sources: false,
            material_group: 2,
        }
    }
}
