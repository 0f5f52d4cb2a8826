use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::ContainerBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "cropme";
const APP_CONFIG_FILE: &str = "config.json";

pub const MIN_SCALE: u8 = 1;
pub const MAX_SCALE: u8 = 5;
const DENSITY_DEFAULT: u32 = 160;
const COLOR_DENSITY: f32 = 255.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("crop width fraction must be within (0, 1], got {0}")]
    WidthFraction(f32),
    #[error("crop height fraction must be within (0, 1], got {0}")]
    HeightFraction(f32),
    #[error("max scale must be within [1, 5], got {0}")]
    MaxScale(u8),
    #[error("background alpha must be within [0, 1], got {0}")]
    BackgroundAlpha(f32),
    #[error("corner drag size must be positive, got {dp}dp at {density_dpi}dpi")]
    CornerDragSize { dp: f32, density_dpi: u32 },
    #[error("container must have a positive size, got {width}x{height}")]
    Container { width: f32, height: f32 },
}

/// Crop settings fixed for the lifetime of one controller, read from `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub width_fraction: f32,
    pub height_fraction: f32,
    pub max_scale: u8,
    pub background_alpha: f32,
    pub with_border: bool,
    /// Corner handles resize the crop rectangle; when off every gesture pans the image.
    pub adjustable: bool,
    pub corner_drag_dp: f32,
    pub density_dpi: u32,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.8,
            height_fraction: 0.8,
            max_scale: 2,
            background_alpha: 0.8,
            with_border: true,
            adjustable: true,
            corner_drag_dp: 20.0,
            density_dpi: DENSITY_DEFAULT,
        }
    }
}

fn fraction_in_range(value: f32) -> bool {
    value > 0.0 && value <= 1.0
}

impl CropConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !fraction_in_range(self.width_fraction) {
            return Err(ConfigError::WidthFraction(self.width_fraction));
        }
        if !fraction_in_range(self.height_fraction) {
            return Err(ConfigError::HeightFraction(self.height_fraction));
        }
        if !(MIN_SCALE..=MAX_SCALE).contains(&self.max_scale) {
            return Err(ConfigError::MaxScale(self.max_scale));
        }
        if !(0.0..=1.0).contains(&self.background_alpha) {
            return Err(ConfigError::BackgroundAlpha(self.background_alpha));
        }
        if !(self.corner_drag_size() > 0.0 && self.corner_drag_size().is_finite()) {
            return Err(ConfigError::CornerDragSize {
                dp: self.corner_drag_dp,
                density_dpi: self.density_dpi,
            });
        }
        Ok(())
    }

    /// Hit-zone edge length converted from dp to surface pixels.
    pub fn corner_drag_size(&self) -> f32 {
        dp_to_px(self.corner_drag_dp, self.density_dpi)
    }

    pub fn background_alpha_u8(&self) -> u8 {
        (self.background_alpha.clamp(0.0, 1.0) * COLOR_DENSITY) as u8
    }
}

pub fn dp_to_px(dp: f32, density_dpi: u32) -> f32 {
    dp * (density_dpi as f32 / DENSITY_DEFAULT as f32)
}

pub(crate) fn validate_container(container: ContainerBounds) -> Result<(), ConfigError> {
    let positive = |value: f32| value > 0.0 && value.is_finite();
    if positive(container.width) && positive(container.height) {
        Ok(())
    } else {
        Err(ConfigError::Container {
            width: container.width,
            height: container.height,
        })
    }
}

pub fn load_crop_config() -> CropConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_crop_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_crop_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> CropConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return CropConfig::default(),
    };
    if !path.exists() {
        return CropConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            CropConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            CropConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CropConfig::default();
        config.validate().expect("defaults should validate");
        assert_eq!(config.corner_drag_size(), 20.0);
        assert_eq!(config.background_alpha_u8(), 204);
    }

    #[test]
    fn fractions_outside_unit_interval_are_rejected() {
        let config = CropConfig {
            width_fraction: 1.2,
            ..CropConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::WidthFraction(1.2)));

        let config = CropConfig {
            height_fraction: 0.0,
            ..CropConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::HeightFraction(0.0)));

        let config = CropConfig {
            width_fraction: 1.0,
            height_fraction: 1.0,
            ..CropConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn max_scale_outside_range_is_rejected() {
        for max_scale in [0, 6] {
            let config = CropConfig {
                max_scale,
                ..CropConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::MaxScale(max_scale)));
        }
    }

    #[test]
    fn zero_density_is_rejected() {
        let config = CropConfig {
            density_dpi: 0,
            ..CropConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CornerDragSize { density_dpi: 0, .. })
        ));
    }

    #[test]
    fn dp_to_px_scales_with_density() {
        assert_eq!(dp_to_px(20.0, 320), 40.0);
        assert_eq!(dp_to_px(20.0, 160), 20.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: CropConfig =
            serde_json::from_str(r#"{"width_fraction": 0.5, "max_scale": 4}"#)
                .expect("config should parse");
        assert_eq!(config.width_fraction, 0.5);
        assert_eq!(config.max_scale, 4);
        assert_eq!(config.height_fraction, 0.8);
        assert!(config.with_border);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let root = std::env::temp_dir().join("cropme-config-test-missing");
        let config = load_crop_config_with(Some(&root), None);
        assert_eq!(config, CropConfig::default());
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "cropme",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/cropme/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path("cropme", "config.json", None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/cropme/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("cropme", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }
}
