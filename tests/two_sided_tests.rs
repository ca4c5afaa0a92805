//! TwoSidedMaterial Tests
//!
//! Tests for:
//! - Construction: double-sided mode for every material type, hook installed
//! - Setters: slot contents, first-write-wins base map, re-upload flag
//! - Compile hook: uniform registration, branch injection, marker-less templates
//! - Recompilation: hook re-runs against a fresh template, shared slots stay live

use std::sync::Arc;

use glam::Vec4;

use myth_two_sided::render::pipeline::ShaderDescription;
use myth_two_sided::two_sided::{FRONT_BACK_DECLARATIONS, MAP_FRAGMENT_MARKER, TEXTURE_BACK, TEXTURE_FRONT};
use myth_two_sided::{Material, MaterialType, ProgramCache, Side, Texture, TextureRef, TwoSidedMaterial};

const ALL_TYPES: [MaterialType; 8] = [
    MaterialType::Basic,
    MaterialType::Lambert,
    MaterialType::Phong,
    MaterialType::Standard,
    MaterialType::Physical,
    MaterialType::Toon,
    MaterialType::Depth,
    MaterialType::Normal,
];

const BRANCH: &str = "select(texture_color_back, texture_color_front, in.front_facing)";

fn texture(name: &str) -> TextureRef {
    Texture::create_solid_color(name, [128, 64, 32, 255]).into_ref()
}

fn same(a: Option<TextureRef>, b: &TextureRef) -> bool {
    a.is_some_and(|a| Arc::ptr_eq(&a, b))
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn construction_forces_double_side_for_every_type() {
    for kind in ALL_TYPES {
        let mut material = Material::new(kind);
        material.set_side(Side::Back);

        let two_sided = TwoSidedMaterial::new(material);
        assert_eq!(two_sided.material().side(), Side::Double, "{kind:?}");
        assert!(two_sided.material().has_on_before_compile());
    }
}

#[test]
fn construction_leaves_slots_empty_and_map_untouched() {
    let two_sided = TwoSidedMaterial::new(Material::new_standard(Vec4::ONE));

    assert!(two_sided.texture_front().is_none());
    assert!(two_sided.texture_back().is_none());
    assert!(!two_sided.material().has_map());
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn front_then_back_assigns_base_map_from_front() {
    let t1 = texture("front");
    let t2 = texture("back");

    let mut two_sided = TwoSidedMaterial::new(Material::new_standard(Vec4::ONE));
    two_sided.set_texture_front(t1.clone());
    two_sided.set_texture_back(t2.clone());

    assert!(same(two_sided.material().map(), &t1));
    assert!(same(two_sided.texture_front(), &t1));
    assert!(same(two_sided.texture_back(), &t2));
}

#[test]
fn back_first_wins_the_base_map() {
    let t1 = texture("front");
    let t2 = texture("back");

    let mut two_sided = TwoSidedMaterial::new(Material::new_basic(Vec4::ONE));
    two_sided.set_texture_back(t2.clone());
    two_sided.set_texture_front(t1.clone());

    assert!(same(two_sided.material().map(), &t2));
}

#[test]
fn existing_base_map_is_never_replaced() {
    let base = texture("base");
    let mut material = Material::new_phong(Vec4::ONE);
    material.set_map(Some(base.clone()));

    let mut two_sided = TwoSidedMaterial::new(material);
    for _ in 0..3 {
        two_sided.set_texture_back(texture("back"));
        two_sided.set_texture_front(texture("front"));
    }
    two_sided.set_textures(texture("front"), texture("back"));

    assert!(same(two_sided.material().map(), &base));
}

#[test]
fn slots_hold_the_latest_texture_independently() {
    let mut two_sided = TwoSidedMaterial::new(Material::new_standard(Vec4::ONE));
    let fronts: Vec<_> = (0..3).map(|i| texture(&format!("front{i}"))).collect();
    let backs: Vec<_> = (0..2).map(|i| texture(&format!("back{i}"))).collect();

    two_sided.set_texture_front(fronts[0].clone());
    two_sided.set_texture_back(backs[0].clone());
    two_sided.set_texture_front(fronts[1].clone());
    two_sided.set_texture_front(fronts[2].clone());
    assert!(same(two_sided.texture_front(), &fronts[2]));
    assert!(same(two_sided.texture_back(), &backs[0]));

    two_sided.set_texture_back(backs[1].clone());
    assert!(same(two_sided.texture_front(), &fronts[2]));
    assert!(same(two_sided.texture_back(), &backs[1]));
}

#[test]
fn setting_one_face_leaves_the_other_empty() {
    let mut two_sided = TwoSidedMaterial::new(Material::new_standard(Vec4::ONE));
    two_sided.set_texture_front(texture("front"));

    assert!(two_sided.texture_front().is_some());
    assert!(two_sided.texture_back().is_none());
}

#[test]
fn setters_flag_textures_for_reupload() {
    let shared = texture("shared");
    let mut two_sided = TwoSidedMaterial::new(Material::new_standard(Vec4::ONE));

    assert_eq!(shared.version(), 0);
    two_sided.set_texture_front(shared.clone());
    assert_eq!(shared.version(), 1);
    two_sided.set_texture_back(shared.clone());
    assert_eq!(shared.version(), 2);
}

#[test]
fn set_textures_matches_individual_setters() {
    let t1 = texture("front");
    let t2 = texture("back");

    let mut two_sided = TwoSidedMaterial::new(Material::new_lambert(Vec4::ONE));
    two_sided.set_textures(t1.clone(), t2.clone());

    assert!(same(two_sided.material().map(), &t1));
    assert!(same(two_sided.texture_front(), &t1));
    assert!(same(two_sided.texture_back(), &t2));
}

// ============================================================================
// Compile hook
// ============================================================================

#[test]
fn hook_registers_both_slots_and_patches_fragment() {
    let two_sided = TwoSidedMaterial::new(Material::new_standard(Vec4::ONE));
    let material = two_sided.material();

    let mut description = ShaderDescription::from_material(material).unwrap();
    assert!(description.fragment_shader.contains(MAP_FRAGMENT_MARKER));

    material.on_before_compile().unwrap().call(&mut description);

    assert!(description.uniforms.texture(TEXTURE_FRONT).is_some());
    assert!(description.uniforms.texture(TEXTURE_BACK).is_some());
    assert!(description.fragment_shader.starts_with(FRONT_BACK_DECLARATIONS));
    assert!(!description.fragment_shader.contains(MAP_FRAGMENT_MARKER));
    assert_eq!(description.fragment_shader.matches(BRANCH).count(), 1);
}

#[test]
fn hook_without_marker_only_prepends_declarations() {
    let two_sided = TwoSidedMaterial::new(Material::new(MaterialType::Normal));
    let material = two_sided.material();

    let mut description = ShaderDescription::from_material(material).unwrap();
    let original = description.fragment_shader.clone();
    assert!(!original.contains(MAP_FRAGMENT_MARKER));

    material.on_before_compile().unwrap().call(&mut description);

    assert_eq!(
        description.fragment_shader.strip_prefix(FRONT_BACK_DECLARATIONS),
        Some(original.as_str())
    );
}

#[test]
fn compiled_program_contains_branch_and_bindings() {
    let mut two_sided = TwoSidedMaterial::new(Material::new_standard(Vec4::ONE));
    two_sided.set_textures(texture("front"), texture("back"));

    let mut cache = ProgramCache::default();
    let program = cache.get_or_compile(two_sided.material()).unwrap();

    assert_eq!(program.source.matches(BRANCH).count(), 1);
    assert!(!program.source.contains("sampled_diffuse_color"));
    assert!(!program.source.contains("{$"));
    assert!(program.source.contains("@group(2) @binding(3) var t_texture_front: texture_2d<f32>;"));
    assert!(program.source.contains("@group(2) @binding(6) var s_texture_back: sampler;"));
    assert_eq!(program.bindings.get("map"), Some(1));
    assert_eq!(program.bindings.get(TEXTURE_FRONT), Some(3));
    assert_eq!(program.bindings.get(TEXTURE_BACK), Some(5));
    assert_eq!(program.cull_mode, None);
}

#[test]
fn branch_is_inactive_until_a_texture_enables_the_map() {
    let two_sided = TwoSidedMaterial::new(Material::new_basic(Vec4::ONE));

    let mut cache = ProgramCache::default();
    let program = cache.get_or_compile(two_sided.material()).unwrap();

    assert!(!program.source.contains("texture_color_front"));
    assert!(program.source.contains("@group(2) @binding(1) var t_texture_front: texture_2d<f32>;"));
    assert_eq!(program.bindings.get("map"), None);
}

#[test]
fn material_without_sampling_point_compiles_without_branch() {
    let mut two_sided = TwoSidedMaterial::new(Material::new(MaterialType::Normal));
    two_sided.set_textures(texture("front"), texture("back"));

    let mut cache = ProgramCache::default();
    let program = cache.get_or_compile(two_sided.material()).unwrap();

    assert!(!program.source.contains(BRANCH));
    assert!(program.uniforms.texture(TEXTURE_FRONT).is_some());
}

// ============================================================================
// Recompilation & shared slots
// ============================================================================

#[test]
fn recompile_rebuilds_branch_from_scratch() {
    let mut two_sided = TwoSidedMaterial::new(Material::new_standard(Vec4::ONE));
    let mut cache = ProgramCache::default();

    cache.get_or_compile(two_sided.material()).unwrap();
    cache.get_or_compile(two_sided.material()).unwrap();
    assert_eq!(cache.compile_count(), 1);

    // Enabling the map flips `use_map` and forces a rebuild.
    two_sided.set_texture_front(texture("front"));
    let program = cache.get_or_compile(two_sided.material()).unwrap();
    assert_eq!(program.source.matches(BRANCH).count(), 1);
    assert_eq!(program.source.matches("var t_texture_front").count(), 1);
    assert_eq!(cache.compile_count(), 2);

    // The map is already set, so this only touches the shared slot.
    two_sided.set_texture_back(texture("back"));
    cache.get_or_compile(two_sided.material()).unwrap();
    assert_eq!(cache.compile_count(), 2);
}

#[test]
fn compiled_program_sees_later_slot_updates() {
    let mut two_sided = TwoSidedMaterial::new(Material::new_standard(Vec4::ONE));
    two_sided.set_texture_front(texture("front"));

    let mut cache = ProgramCache::default();
    cache.get_or_compile(two_sided.material()).unwrap();

    let back = texture("back");
    let replacement = texture("front2");
    two_sided.set_texture_back(back.clone());
    two_sided.set_texture_front(replacement.clone());

    let program = cache.get(&two_sided.material().uuid).unwrap();
    assert!(same(program.uniforms.texture(TEXTURE_BACK).unwrap().get(), &back));
    assert!(same(program.uniforms.texture(TEXTURE_FRONT).unwrap().get(), &replacement));
    assert_eq!(cache.compile_count(), 1);
}

#[test]
fn into_material_keeps_the_hook() {
    let mut two_sided = TwoSidedMaterial::new(Material::new_toon(Vec4::ONE));
    two_sided.set_texture_front(texture("front"));

    let material = two_sided.into_material();
    let mut cache = ProgramCache::default();
    let program = cache.get_or_compile(&material).unwrap();

    assert_eq!(material.side(), Side::Double);
    assert_eq!(program.source.matches(BRANCH).count(), 1);
}
