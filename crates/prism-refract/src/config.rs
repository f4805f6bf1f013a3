use std::path::Path;

use serde::Deserialize;

/// Scene configuration. Every field has a default; a JSON file only needs
/// the keys it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Backdrop image (PNG/JPEG), sampled as sRGB.
    pub texture_path: String,
    /// Refractive model (glTF/GLB); its first root node with geometry is used.
    pub model_path: String,
    /// Width / height of the backdrop quad, matching the backdrop image.
    pub backdrop_aspect: f32,
    /// Model spin about +Y, radians per second.
    pub angular_velocity: f32,
    pub camera: CameraConfig,
    pub ortho: OrthoConfig,
    pub controls: ControlsConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_path: "assets/leaves.jpg".to_string(),
            model_path: "assets/diamond.glb".to_string(),
            backdrop_aspect: 2.0,
            angular_velocity: 1.0,
            camera: CameraConfig::default(),
            ortho: OrthoConfig::default(),
            controls: ControlsConfig::default(),
        }
    }
}

/// Perspective camera factory arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view, degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { fov: 50.0, near: 1.0, far: 1000.0, position: [0.0, 0.0, 5.0] }
    }
}

/// Backdrop camera depth range and placement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrthoConfig {
    pub near: f32,
    pub far: f32,
    pub z: f32,
}

impl Default for OrthoConfig {
    fn default() -> Self {
        Self { near: 1.0, far: 1000.0, z: 5.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            min_distance: 1.0,
            max_distance: 1000.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("config value `{field}` out of range: {value}")]
    Invalid { field: &'static str, value: f32 },
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::parse(json, "<inline>")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: display.clone(), source })?;
        Self::parse(&text, &display)
    }

    fn parse(json: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|source| ConfigError::Parse { path: path.to_string(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would drive the orbit camera to NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controls.validate()
    }
}

impl ControlsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = self;
        if !(0.0..=1.0).contains(&c.damping_factor) {
            return Err(invalid("controls.damping_factor", c.damping_factor));
        }
        if !(0.0..1.0).contains(&c.zoom_speed) {
            return Err(invalid("controls.zoom_speed", c.zoom_speed));
        }
        if c.min_distance.is_nan() || c.min_distance <= 0.0 {
            return Err(invalid("controls.min_distance", c.min_distance));
        }
        if c.max_distance.is_nan() || c.max_distance < c.min_distance {
            return Err(invalid("controls.max_distance", c.max_distance));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, value: f32) -> ConfigError {
    ConfigError::Invalid { field, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_bundled_scene() {
        let c = SceneConfig::default();
        assert_eq!(c.backdrop_aspect, 2.0);
        assert_eq!(c.angular_velocity, 1.0);
        assert_eq!(c.camera, CameraConfig { fov: 50.0, near: 1.0, far: 1000.0, position: [0.0, 0.0, 5.0] });
        assert!(c.controls.enable_damping);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = SceneConfig::from_json_str(r#"{ "angular_velocity": 0.5, "camera": { "fov": 35 } }"#).unwrap();
        assert_eq!(c.angular_velocity, 0.5);
        assert_eq!(c.camera.fov, 35.0);
        assert_eq!(c.camera.far, 1000.0);
        assert_eq!(c.texture_path, "assets/leaves.jpg");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SceneConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    fn rejected_field(json: &str) -> (&'static str, f32) {
        match SceneConfig::from_json_str(json) {
            Err(ConfigError::Invalid { field, value }) => (field, value),
            other => panic!("expected an out-of-range error, got {other:?}"),
        }
    }

    #[test]
    fn damping_factor_above_one_is_rejected() {
        let (field, value) = rejected_field(r#"{ "controls": { "damping_factor": 1.5 } }"#);
        assert_eq!(field, "controls.damping_factor");
        assert_eq!(value, 1.5);
        assert_eq!(rejected_field(r#"{ "controls": { "damping_factor": -0.1 } }"#).0, "controls.damping_factor");
    }

    #[test]
    fn zoom_speed_must_stay_below_one() {
        assert_eq!(rejected_field(r#"{ "controls": { "zoom_speed": 1.0 } }"#).0, "controls.zoom_speed");
        assert_eq!(rejected_field(r#"{ "controls": { "zoom_speed": -0.5 } }"#).0, "controls.zoom_speed");
        assert!(SceneConfig::from_json_str(r#"{ "controls": { "zoom_speed": 0.0 } }"#).is_ok());
    }

    #[test]
    fn min_distance_must_be_positive() {
        assert_eq!(rejected_field(r#"{ "controls": { "min_distance": 0.0 } }"#).0, "controls.min_distance");
        assert_eq!(rejected_field(r#"{ "controls": { "min_distance": -2.0 } }"#).0, "controls.min_distance");
    }

    #[test]
    fn max_distance_below_min_is_rejected() {
        let (field, value) = rejected_field(r#"{ "controls": { "min_distance": 10.0, "max_distance": 5.0 } }"#);
        assert_eq!(field, "controls.max_distance");
        assert_eq!(value, 5.0);
        assert!(SceneConfig::from_json_str(r#"{ "controls": { "min_distance": 5.0, "max_distance": 5.0 } }"#).is_ok());
    }

    #[test]
    fn invalid_file_reports_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{ "controls": { "damping_factor": 2.0 } }"#).unwrap();
        let err = SceneConfig::from_json_file(&path).unwrap_err();
        assert!(err.to_string().contains("controls.damping_factor"), "{err}");
    }
}
