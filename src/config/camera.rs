//! Typed camera parameters
//!
//! The file keeps camera values as strings ("0.0, 1.0, 0.0") for format
//! compatibility. They are parsed once here; a value that doesn't parse falls
//! back to its compiled default rather than reaching the host malformed.
//! Values that do parse reach the host as the text the file holds.

use anyhow::{Context, Result, anyhow};
use glam::Vec3;
use tracing::warn;

use crate::config::schema::CameraConfig;
use crate::constants::defaults;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub offset: Vec3,
    pub field_of_view: f32,
    pub distance: f32,
    /// Arguments for the host's camera console commands
    pub console_args: CameraConfig,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 1.0, 0.0),
            field_of_view: 106.1227,
            distance: 2.0,
            console_args: CameraConfig::default(),
        }
    }
}

impl CameraSettings {
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut settings = Self::default();

        match parse_vec3(&config.offset) {
            Ok(offset) => {
                settings.offset = offset;
                settings.console_args.offset = config.offset.trim().to_string();
            }
            Err(e) => {
                warn!(offset = %config.offset, default = defaults::CAMERA_OFFSET, error = %e, "Invalid camera offset, using default")
            }
        }
        match parse_number(&config.field_of_view) {
            Ok(field_of_view) => {
                settings.field_of_view = field_of_view;
                settings.console_args.field_of_view = config.field_of_view.trim().to_string();
            }
            Err(e) => {
                warn!(field_of_view = %config.field_of_view, default = defaults::CAMERA_FIELD_OF_VIEW, error = %e, "Invalid camera field of view, using default")
            }
        }
        match parse_number(&config.distance) {
            Ok(distance) => {
                settings.distance = distance;
                settings.console_args.distance = config.distance.trim().to_string();
            }
            Err(e) => {
                warn!(distance = %config.distance, default = defaults::CAMERA_DISTANCE, error = %e, "Invalid camera distance, using default")
            }
        }

        settings
    }
}

/// Parse "x, y, z" (whitespace around components is ignored)
pub fn parse_vec3(s: &str) -> Result<Vec3> {
    let components = s
        .split(',')
        .map(parse_number)
        .collect::<Result<Vec<f32>>>()?;

    match components.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        other => Err(anyhow!("expected 3 components, found {}", other.len())),
    }
}

fn parse_number(s: &str) -> Result<f32> {
    let value: f32 = s
        .trim()
        .parse()
        .with_context(|| format!("'{s}' is not a number"))?;
    if !value.is_finite() {
        return Err(anyhow!("'{s}' is not finite"));
    }
    Ok(value)
}
