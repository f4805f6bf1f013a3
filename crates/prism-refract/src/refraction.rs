//! Refraction material: WGSL program plus the CPU form of its sampling math.
//!
//! Projection: the capture is a screen-aligned copy of the backdrop, so the
//! fragment's screen UV (`frag_xy / resolution`, top-left origin) addresses
//! the backdrop directly behind it. The refracted ray, rotated into view
//! space, shifts that UV by `(d.x, -d.y) * REFRACTION_STRENGTH`. A Schlick
//! Fresnel term blends in the reflected sample at grazing angles.

use std::sync::{Arc, OnceLock};

use glam::{Mat4, Vec2, Vec3};
use prism_engine::scene::{
    DefaultUniforms, Material, ShaderMaterial, ShaderProgram, TextureRef, UniformTable,
};

/// Index of refraction (diamond).
pub const IOR: f32 = 2.42;

/// Screen-UV shift per unit of view-space ray direction.
pub const REFRACTION_STRENGTH: f32 = 0.2;

const REFRACTION_WGSL: &str = include_str!("shaders/refraction.wgsl");

/// Shared program; one pipeline serves every refraction material.
pub fn refraction_program() -> Arc<ShaderProgram> {
    static PROGRAM: OnceLock<Arc<ShaderProgram>> = OnceLock::new();
    Arc::clone(PROGRAM.get_or_init(|| ShaderProgram::new("refraction", REFRACTION_WGSL)))
}

/// Builds the material with its uniform table assembled once: host
/// defaults plus `env_map` pointing at the environment target.
pub fn refraction_material(defaults: DefaultUniforms, env_map: TextureRef) -> Material {
    Material::Shader(ShaderMaterial {
        program: refraction_program(),
        uniforms: UniformTable::new(defaults, Some(env_map)),
    })
}

/// Normal-incidence reflectance for `ior` against air.
pub fn base_reflectance(ior: f32) -> f32 {
    let r = (1.0 - ior) / (1.0 + ior);
    r * r
}

/// Refracts unit `incident` through a surface with unit normal `normal`;
/// `eta` is the ratio of indices. Zero on total internal reflection.
pub fn refract(incident: Vec3, normal: Vec3, eta: f32) -> Vec3 {
    let cos_i = normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        eta * incident - (eta * cos_i + k.sqrt()) * normal
    }
}

pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

pub fn fresnel_schlick(cos_theta: f32, f0: f32) -> f32 {
    f0 + (1.0 - f0) * (1.0 - cos_theta.clamp(0.0, 1.0)).powi(5)
}

/// Environment UV for a world-space direction seen from `screen_uv`.
pub fn env_uv(screen_uv: Vec2, dir_world: Vec3, view: Mat4) -> Vec2 {
    let d = view.transform_vector3(dir_world);
    screen_uv + Vec2::new(d.x, -d.y) * REFRACTION_STRENGTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_engine::scene::{TargetId, UniformSlot, UniformValue};

    #[test]
    fn wgsl_constants_match() {
        assert!(REFRACTION_WGSL.contains(&format!("const IOR: f32 = {IOR};")));
        assert!(REFRACTION_WGSL.contains(&format!("const REFRACTION_STRENGTH: f32 = {REFRACTION_STRENGTH};")));
    }

    #[test]
    fn program_compiles_with_prelude() {
        let material = refraction_material(DefaultUniforms::default(), TextureRef::Target(TargetId::fresh()));
        prism_engine::render::validate_material(&material).unwrap();
    }

    #[test]
    fn head_on_ray_passes_straight_through() {
        let t = refract(-Vec3::Z, Vec3::Z, 1.0 / IOR);
        assert!((t - -Vec3::Z).length() < 1e-6);

        // Straight through: the backdrop directly behind is sampled unshifted.
        let uv = env_uv(Vec2::new(0.25, 0.75), Vec3::new(0.0, 0.0, -1.0), Mat4::IDENTITY);
        assert_eq!(uv, Vec2::new(0.25, 0.75));
    }

    #[test]
    fn oblique_ray_bends_toward_normal() {
        let i = Vec3::new(1.0, 0.0, -1.0).normalize();
        let t = refract(i, Vec3::Z, 1.0 / IOR);
        assert!((t.length() - 1.0).abs() < 1e-5);
        assert!(t.x > 0.0 && t.x < i.x);
    }

    #[test]
    fn total_internal_reflection_yields_zero() {
        let i = Vec3::new(1.0, 0.0, -0.2).normalize();
        assert_eq!(refract(i, Vec3::Z, IOR), Vec3::ZERO);
    }

    #[test]
    fn fresnel_limits() {
        let f0 = base_reflectance(IOR);
        assert!((f0 - 0.1724).abs() < 1e-3);
        assert!((fresnel_schlick(1.0, f0) - f0).abs() < 1e-6);
        assert!((fresnel_schlick(0.0, f0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn upward_ray_shifts_uv_up_the_screen() {
        let uv = env_uv(Vec2::splat(0.5), Vec3::Y, Mat4::IDENTITY);
        assert!(uv.y < 0.5);
        assert_eq!(uv.x, 0.5);
    }

    #[test]
    fn material_binds_env_map_once() {
        let env = TextureRef::Target(TargetId::fresh());
        let material = refraction_material(DefaultUniforms::default(), env);
        let shader = material.as_shader().unwrap();
        assert_eq!(shader.uniforms.get(UniformSlot::EnvMap), UniformValue::Texture(Some(env)));
        assert!(Arc::ptr_eq(&shader.program, &refraction_program()));
        assert_eq!(reflect(-Vec3::Z, Vec3::Z), Vec3::Z);
    }
}
