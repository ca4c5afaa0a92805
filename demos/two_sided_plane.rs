//! Builds a two-sided card material and prints the generated WGSL.
//!
//! Run with `RUST_LOG=debug` to see compile events.

use glam::Vec4;
use myth_two_sided::{CompilerSettings, Material, ProgramCache, Texture, TwoSidedMaterial};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut material = Material::new_standard(Vec4::ONE);
    material.name = Some("card".into());
    material.set_roughness(0.6);

    let mut card = TwoSidedMaterial::new(material);
    card.set_textures(
        Texture::create_checkerboard("front", 64, 64, 8).into_ref(),
        Texture::create_solid_color("back", [200, 40, 40, 255]).into_ref(),
    );

    let mut cache = ProgramCache::new(CompilerSettings {
        log_sources: true,
        ..Default::default()
    });
    let program = cache.get_or_compile(card.material())?;

    println!("{}", program.source);
    for slot in &program.bindings.slots {
        println!("@group({}) @binding({}) {} ({:?})", program.bindings.group, slot.binding, slot.name, slot.kind);
    }

    Ok(())
}
