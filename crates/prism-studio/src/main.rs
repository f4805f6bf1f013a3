use std::path::PathBuf;

use anyhow::Context;
use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};
use prism_refract::{RefractionApp, SceneConfig};
use winit::dpi::LogicalSize;

/// `prism-studio [scene.json]`
///
/// Asset paths in the scene config resolve against the config file's
/// directory, or the working directory when no config is given.
fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let (config, asset_root) = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let config = SceneConfig::from_json_file(&path)
                .with_context(|| format!("failed to read scene config {}", path.display()))?;
            let root = path.parent().map(PathBuf::from).unwrap_or_default();
            (config, root)
        }
        None => (SceneConfig::default(), PathBuf::from(".")),
    };
    log::info!("assets from {}", asset_root.display());

    let runtime = RuntimeConfig {
        title: "Prism".to_string(),
        initial_size: LogicalSize::new(1280.0, 720.0),
    };
    Runtime::run(runtime, GpuInit::default(), RefractionApp::new(config, asset_root))
}
