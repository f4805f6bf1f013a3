use glam::{Vec2, Vec3};
use prism_engine::assets::AssetLoader;
use prism_engine::camera::{OrbitControls, OrthographicCamera, PerspectiveCamera};
use prism_engine::coords::Viewport;
use prism_engine::render::{OffscreenTarget, TargetAllocator};
use prism_engine::scene::{
    BasicMaterial, ColorSpace, DefaultUniforms, Layers, Material, Mesh, Node, Scene,
};

use crate::config::{ControlsConfig, SceneConfig};
use crate::error::InitError;
use crate::lifecycle::Lifecycle;
use crate::refraction::refraction_material;
use crate::RenderContext;

/// Builds the session: environment target, backdrop quad, refractive model
/// and both cameras. Awaits the texture, then the model; any failure aborts.
///
/// `defaults` seeds the refraction uniform table; its `resolution` is
/// replaced by the viewport's physical size.
pub async fn initialize<L: AssetLoader>(
    loader: &L,
    allocator: &mut dyn TargetAllocator,
    config: &SceneConfig,
    viewport: Viewport,
    defaults: DefaultUniforms,
) -> Result<RenderContext, InitError> {
    let mut lifecycle = Lifecycle::Uninitialized;
    lifecycle.transition(Lifecycle::Loading)?;

    let viewport = viewport.clamped();
    let (pw, ph) = viewport.physical_size();
    let env_target = OffscreenTarget::new(pw, ph, allocator.max_target_dimension())
        .map_err(InitError::TargetAllocation)?;
    allocator.allocate_target(&env_target).map_err(InitError::TargetAllocation)?;
    report_progress(0.1);

    let mut scene = Scene::new();

    let mut texture = loader
        .load_texture(&config.texture_path)
        .await
        .map_err(InitError::TextureLoad)?;
    texture.color_space = ColorSpace::Srgb;
    let map = scene.add_texture(texture);

    let mut quad = Node::new("backdrop", Mesh::plane(), Material::Basic(BasicMaterial::with_map(map)));
    quad.layers = Layers::BACKGROUND;
    quad.transform.scale = Vec3::new(viewport.height * config.backdrop_aspect, viewport.height, 1.0);
    let quad = scene.add(quad);
    report_progress(0.5);

    let defaults = DefaultUniforms { resolution: Vec2::new(pw as f32, ph as f32), ..defaults };
    let material = refraction_material(defaults, env_target.texture());

    let asset = loader
        .load_model(&config.model_path)
        .await
        .map_err(InitError::ModelLoad)?;
    let child = asset
        .first_mesh_child()
        .ok_or_else(|| InitError::EmptyModel(config.model_path.clone()))?;
    let Some(data) = child.mesh.clone() else {
        return Err(InitError::EmptyModel(config.model_path.clone()));
    };

    let mut model = Node::new(child.name.clone(), Mesh::new(data)?, material);
    model.layers = Layers::DEFAULT;
    model.transform = child.transform;
    let model = scene.add(model);

    let cam = &config.camera;
    let mut camera = PerspectiveCamera::new(cam.fov, cam.near, cam.far, Vec3::from_array(cam.position));
    camera.set_aspect(viewport.aspect());
    let controls = orbit_controls(&camera, &config.controls);

    let mut ortho = OrthographicCamera::centered(viewport.width, viewport.height, config.ortho.near, config.ortho.far);
    ortho.position.z = config.ortho.z;
    ortho.layers = Layers::BACKGROUND;

    lifecycle.transition(Lifecycle::Ready)?;
    report_progress(1.0);

    Ok(RenderContext {
        scene,
        ortho,
        camera,
        controls,
        env_target,
        quad,
        model,
        viewport,
        backdrop_aspect: config.backdrop_aspect,
        angular_velocity: config.angular_velocity,
        lifecycle,
    })
}

fn orbit_controls(camera: &PerspectiveCamera, config: &ControlsConfig) -> OrbitControls {
    let mut controls = OrbitControls::for_camera(camera);
    controls.enable_damping = config.enable_damping;
    controls.damping_factor = config.damping_factor;
    controls.rotate_speed = config.rotate_speed;
    controls.zoom_speed = config.zoom_speed;
    controls.min_distance = config.min_distance;
    controls.max_distance = config.max_distance;
    controls
}

fn report_progress(fraction: f32) {
    log::info!("loading {:>3.0}%", fraction * 100.0);
}
