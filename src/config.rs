use anyhow::{Context, Result};
use glam::Vec3;
use roomstage_camera::Camera;
use roomstage_core::{BoxPart, RoomShell};
use roomstage_interaction::DragConfig;
use roomstage_layout::{Anchor, PlacementRule};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_STAGE_PATH: &str = "config/stage.toml";

/// Everything needed to stage a furnished room.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StageConfig {
    pub room: RoomShell,
    pub camera: CameraConfig,
    pub viewport: ViewportConfig,
    pub drag: DragConfig,
    pub assets: Vec<AssetConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectionKind {
    #[default]
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub projection: ProjectionKind,
    /// Vertical field of view in degrees (perspective only).
    pub fov_degrees: f32,
    /// Half of the visible height in world units (orthographic only). The
    /// width follows the viewport aspect.
    pub half_height: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    pub name: String,
    /// Wavefront OBJ file measured for the bounding box.
    pub model: Option<PathBuf>,
    /// Size used when no model is configured or the model file is missing.
    pub size: Vec3,
    /// Uniform scale applied to the model before measuring.
    pub scale: f32,
    /// Rotation about +Y in radians, applied after scaling.
    pub yaw: f32,
    pub placement: PlacementRule,
    pub draggable: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        let floor = BoxPart::new(Vec3::new(6.0, 0.2, 6.0), Vec3::new(0.0, -1.25, 0.0));
        let walls = BoxPart::new(Vec3::new(12.75, 5.75, 0.5), Vec3::new(0.0, 0.0, 0.5));
        let ceiling = BoxPart::new(Vec3::new(6.0, 0.2, 6.0), Vec3::new(0.0, 1.25, 0.0));
        Self {
            room: RoomShell::new(floor, walls, ceiling),
            camera: CameraConfig::default(),
            viewport: ViewportConfig::default(),
            drag: DragConfig::default(),
            assets: vec![
                AssetConfig {
                    name: "lamp".to_string(),
                    model: Some(PathBuf::from("assets/models/lamp.obj")),
                    size: Vec3::new(0.5, 1.6, 0.5),
                    scale: 0.0025,
                    yaw: -3.5,
                    placement: PlacementRule::new(Anchor::FrontRightCorner).with_gap(0.5),
                    draggable: true,
                },
                AssetConfig {
                    name: "chair".to_string(),
                    model: Some(PathBuf::from("assets/models/chair.obj")),
                    size: Vec3::new(0.8, 1.0, 0.8),
                    scale: 0.002,
                    yaw: -3.0,
                    placement: PlacementRule::new(Anchor::RightWall).with_gap(0.25),
                    draggable: false,
                },
                AssetConfig {
                    name: "sofa".to_string(),
                    model: Some(PathBuf::from("assets/models/sofa.obj")),
                    size: Vec3::new(2.0, 0.9, 0.9),
                    scale: 0.0012,
                    yaw: 0.0,
                    placement: PlacementRule::new(Anchor::LeftWall).with_gap(0.25),
                    draggable: false,
                },
            ],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Perspective,
            fov_degrees: 75.0,
            half_height: 3.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            model: None,
            size: Vec3::ONE,
            scale: 1.0,
            yaw: 0.0,
            placement: PlacementRule::default(),
            draggable: false,
        }
    }
}

impl ViewportConfig {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl CameraConfig {
    /// Build the camera for a viewport of the given size.
    pub fn build(&self, viewport: &ViewportConfig) -> Camera {
        let aspect = viewport.aspect();
        match self.projection {
            ProjectionKind::Perspective => Camera::perspective(
                self.position,
                self.target,
                self.fov_degrees.to_radians(),
                aspect,
                self.near,
                self.far,
            ),
            ProjectionKind::Orthographic => Camera::orthographic(
                self.position,
                self.target,
                self.half_height * aspect,
                self.half_height,
                self.near,
                self.far,
            ),
        }
    }
}

impl StageConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        let config = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<StageConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    StageConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_STAGE_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Stage config not found at {}. Using defaults", path.display());
                }
                StageConfig::default()
            }
        };

        if let Err(err) = config.validate() {
            warn!("Invalid stage config {}: {err:#}. Using defaults", path.display());
            return StageConfig::default();
        }
        config
    }

    /// Load and validate configuration, returning errors to the caller.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading stage config {}", path.display()))?;
        let config: StageConfig = toml::from_str(&contents)
            .with_context(|| format!("parsing stage config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Check asset names and the draggable designation.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for asset in &self.assets {
            if asset.name.is_empty() {
                anyhow::bail!("asset entries need a name");
            }
            if !names.insert(asset.name.as_str()) {
                anyhow::bail!("duplicate asset name {:?}", asset.name);
            }
        }

        let draggable: Vec<&str> = self
            .assets
            .iter()
            .filter(|asset| asset.draggable)
            .map(|asset| asset.name.as_str())
            .collect();
        if draggable.len() > 1 {
            anyhow::bail!(
                "only one asset may be draggable, found {}: {}",
                draggable.len(),
                draggable.join(", ")
            );
        }
        Ok(())
    }

    /// Name of the draggable asset, if any.
    pub fn draggable_asset(&self) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.draggable)
            .map(|asset| asset.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_reproduce_the_showroom() {
        let config = StageConfig::default();
        assert_eq!(config.room.floor.position, Vec3::new(0.0, -1.25, 0.0));
        assert_eq!(config.room.walls.size, Vec3::new(12.75, 5.75, 0.5));
        assert_eq!(config.draggable_asset(), Some("lamp"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_STAGE_PATH);
        let shipped = StageConfig::from_path(&path).expect("shipped config loads");
        let defaults = StageConfig::default();
        assert_eq!(shipped.room, defaults.room);
        assert_eq!(shipped.drag, defaults.drag);
        assert_eq!(shipped.assets.len(), defaults.assets.len());
        for (a, b) in shipped.assets.iter().zip(&defaults.assets) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.placement, b.placement);
            assert_eq!(a.draggable, b.draggable);
        }
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested/stage.toml");
        let config = StageConfig::default();
        config.save_to_path(&path).expect("save");

        let loaded = StageConfig::from_path(&path).expect("load");
        assert_eq!(loaded.room, config.room);
        assert_eq!(loaded.assets.len(), 3);
        assert_eq!(loaded.assets[0].placement, config.assets[0].placement);
        assert_eq!(loaded.drag, config.drag);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("stage.toml");
        fs::write(
            &path,
            r#"
[drag]
sensitivity = 0.02
screen_y = "ignore"

[[assets]]
name = "crate"
size = [1.0, 1.0, 1.0]
draggable = true
placement = { anchor = "back-left-corner", wall_gap = 0.1 }
"#,
        )
        .expect("write");

        let config = StageConfig::from_path(&path).expect("load");
        assert_eq!(config.drag.sensitivity, 0.02);
        assert_eq!(config.assets.len(), 1);
        assert_eq!(config.assets[0].placement.anchor, Anchor::BackLeftCorner);
        assert_eq!(config.assets[0].scale, 1.0);
        assert_eq!(config.camera.fov_degrees, 75.0);
    }

    #[test]
    fn two_draggable_assets_are_rejected() {
        let mut config = StageConfig::default();
        config.assets[1].draggable = true;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("only one asset may be draggable"));
    }

    #[test]
    fn lenient_loader_falls_back_on_garbage() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("stage.toml");
        fs::write(&path, "room = 12").expect("write");
        let config = StageConfig::load_from_path(&path);
        assert_eq!(config.assets.len(), StageConfig::default().assets.len());
    }

    #[test]
    fn orthographic_camera_follows_viewport_aspect() {
        let camera = CameraConfig {
            projection: ProjectionKind::Orthographic,
            half_height: 2.0,
            ..CameraConfig::default()
        };
        let built = camera.build(&ViewportConfig {
            width: 800,
            height: 400,
        });
        match built.projection {
            roomstage_camera::Projection::Orthographic {
                half_width,
                half_height,
                ..
            } => {
                assert_eq!(half_width, 4.0);
                assert_eq!(half_height, 2.0);
            }
            other => panic!("unexpected projection {other:?}"),
        }
    }
}
