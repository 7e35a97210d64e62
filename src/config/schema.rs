//! On-disk configuration schema
//!
//! `Configuration` is the canonical, fully-populated form written back to disk.
//! `StoredConfig` is what an arbitrary (possibly older) file deserializes into:
//! every field optional, so migration can tell "absent" from "customized".

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::constants::{defaults, plugin};

/// Which event sources toggle the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThirdPersonMode {
    /// Secondary-fire press/release
    #[default]
    AlwaysThirdPerson,
    /// Mounting and dismounting allowlisted vehicles
    VehicleOnly,
    /// The chat command only
    CommandOnly,
}

impl ThirdPersonMode {
    const ALL: [Self; 3] = [Self::AlwaysThirdPerson, Self::VehicleOnly, Self::CommandOnly];

    pub fn name(self) -> &'static str {
        match self {
            Self::AlwaysThirdPerson => "AlwaysThirdPerson",
            Self::VehicleOnly => "VehicleOnly",
            Self::CommandOnly => "CommandOnly",
        }
    }

    /// Hand-edited files may spell the mode in any case or use its index
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Self::ALL
                .into_iter()
                .find(|mode| mode.name().eq_ignore_ascii_case(name.trim())),
            Value::Number(index) => index
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| Self::ALL.get(i).copied()),
            _ => None,
        }
    }

    /// Mapping for installs that predate the mode enumeration and only
    /// carried a vehicle-only boolean
    pub fn from_legacy_vehicle_only(vehicle_only: bool) -> Self {
        if vehicle_only {
            Self::VehicleOnly
        } else {
            Self::AlwaysThirdPerson
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(rename = "Offset")]
    pub offset: String,
    #[serde(rename = "Field Of View")]
    pub field_of_view: String,
    #[serde(rename = "Distance")]
    pub distance: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: defaults::CAMERA_OFFSET.to_string(),
            field_of_view: defaults::CAMERA_FIELD_OF_VIEW.to_string(),
            distance: defaults::CAMERA_DISTANCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Third Person Mode")]
    pub mode: ThirdPersonMode,
    #[serde(rename = "Vehicle Short Prefab Names")]
    pub vehicle_short_prefab_names: Vec<String>,
    #[serde(rename = "Chat Command To Toggle Third Person")]
    pub toggle_command: String,
    #[serde(rename = "Camera")]
    pub camera: CameraConfig,
}

pub fn default_vehicle_short_prefab_names() -> Vec<String> {
    defaults::VEHICLE_SHORT_PREFAB_NAMES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: plugin::VERSION.to_string(),
            mode: ThirdPersonMode::default(),
            vehicle_short_prefab_names: default_vehicle_short_prefab_names(),
            toggle_command: defaults::TOGGLE_COMMAND.to_string(),
            camera: CameraConfig::default(),
        }
    }
}

impl Configuration {
    /// Whether mounting/dismounting this vehicle may toggle the view
    pub fn vehicle_qualifies(&self, short_prefab_name: &str) -> bool {
        self.vehicle_short_prefab_names.is_empty()
            || self
                .vehicle_short_prefab_names
                .iter()
                .any(|name| name == short_prefab_name)
    }
}

/// Partially-known file contents, before migration. A field with a value
/// of the wrong shape is dropped on its own and refilled from the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredConfig {
    #[serde(rename = "Version", default, deserialize_with = "lenient_text")]
    pub version: Option<String>,
    #[serde(rename = "Third Person Mode", default, deserialize_with = "lenient_mode")]
    pub mode: Option<ThirdPersonMode>,
    /// Pre-1.3.0 boolean that the mode enumeration replaced
    #[serde(rename = "Vehicle Only", default)]
    pub legacy_vehicle_only: Option<bool>,
    #[serde(rename = "Vehicle Short Prefab Names", default)]
    pub vehicle_short_prefab_names: Option<Vec<String>>,
    #[serde(rename = "Chat Command To Toggle Third Person", default)]
    pub toggle_command: Option<String>,
    #[serde(rename = "Camera", default)]
    pub camera: Option<StoredCamera>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredCamera {
    #[serde(rename = "Offset", default, deserialize_with = "lenient_text")]
    pub offset: Option<String>,
    #[serde(rename = "Field Of View", default, deserialize_with = "lenient_text")]
    pub field_of_view: Option<String>,
    #[serde(rename = "Distance", default, deserialize_with = "lenient_text")]
    pub distance: Option<String>,
}

/// Text field that also takes a bare number (`"Distance": 2`)
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(other) => {
            warn!(value = %other, "Ignoring config value that is not text or a number");
            None
        }
    })
}

fn lenient_mode<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ThirdPersonMode>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(value) => {
            let mode = ThirdPersonMode::from_value(&value);
            if mode.is_none() {
                warn!(value = %value, "Unknown third person mode, using default");
            }
            mode
        }
    })
}

impl StoredCamera {
    /// Fill whatever the file left out from the defaults
    pub fn complete(self) -> CameraConfig {
        let defaults = CameraConfig::default();
        CameraConfig {
            offset: self.offset.unwrap_or(defaults.offset),
            field_of_view: self.field_of_view.unwrap_or(defaults.field_of_view),
            distance: self.distance.unwrap_or(defaults.distance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration_literals() {
        let config = Configuration::default();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.mode, ThirdPersonMode::AlwaysThirdPerson);
        assert_eq!(config.toggle_command, "3rd");
        assert_eq!(config.vehicle_short_prefab_names.len(), 8);
        assert_eq!(config.vehicle_short_prefab_names[0], "1module_cockpit");
        assert_eq!(config.vehicle_short_prefab_names[7], "rowboat");
        assert_eq!(config.camera.offset, "0.0, 1.0, 0.0");
        assert_eq!(config.camera.field_of_view, "106.1227");
        assert_eq!(config.camera.distance, "2");
    }

    #[test]
    fn test_serialized_keys_match_file_format() {
        let json = serde_json::to_value(Configuration::default()).unwrap();
        assert_eq!(json["Version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["Third Person Mode"], "AlwaysThirdPerson");
        assert_eq!(json["Chat Command To Toggle Third Person"], "3rd");
        assert_eq!(json["Vehicle Short Prefab Names"][6], "rhib");
        assert_eq!(json["Camera"]["Offset"], "0.0, 1.0, 0.0");
        assert_eq!(json["Camera"]["Field Of View"], "106.1227");
        assert_eq!(json["Camera"]["Distance"], "2");
    }

    #[test]
    fn test_mode_parses_from_name() {
        let mode: ThirdPersonMode = serde_json::from_str("\"CommandOnly\"").unwrap();
        assert_eq!(mode, ThirdPersonMode::CommandOnly);
        assert!(serde_json::from_str::<ThirdPersonMode>("\"Sometimes\"").is_err());
    }

    #[test]
    fn test_mode_from_value_ignores_case_and_takes_index() {
        let mode = |json: &str| ThirdPersonMode::from_value(&serde_json::from_str(json).unwrap());
        assert_eq!(mode("\"vehicleonly\""), Some(ThirdPersonMode::VehicleOnly));
        assert_eq!(mode("\"COMMANDONLY\""), Some(ThirdPersonMode::CommandOnly));
        assert_eq!(mode("0"), Some(ThirdPersonMode::AlwaysThirdPerson));
        assert_eq!(mode("2"), Some(ThirdPersonMode::CommandOnly));
        assert_eq!(mode("3"), None);
        assert_eq!(mode("-1"), None);
        assert_eq!(mode("\"Sometimes\""), None);
    }

    #[test]
    fn test_stored_camera_accepts_numbers() {
        let stored: StoredConfig = serde_json::from_str(
            r#"{ "Camera": { "Offset": "0.0, 1.0, 0.0", "Field Of View": 90, "Distance": 2.5 } }"#,
        )
        .unwrap();
        let camera = stored.camera.unwrap();
        assert_eq!(camera.offset.as_deref(), Some("0.0, 1.0, 0.0"));
        assert_eq!(camera.field_of_view.as_deref(), Some("90"));
        assert_eq!(camera.distance.as_deref(), Some("2.5"));
    }

    #[test]
    fn test_stored_config_drops_bad_fields_individually() {
        let stored: StoredConfig = serde_json::from_str(
            r#"{
                "Version": "1.3.0",
                "Third Person Mode": "Sometimes",
                "Chat Command To Toggle Third Person": "view",
                "Camera": { "Distance": [1, 2] }
            }"#,
        )
        .unwrap();
        assert!(stored.mode.is_none());
        assert_eq!(stored.toggle_command.as_deref(), Some("view"));
        assert!(stored.camera.unwrap().distance.is_none());
    }

    #[test]
    fn test_legacy_boolean_mapping() {
        assert_eq!(ThirdPersonMode::from_legacy_vehicle_only(true), ThirdPersonMode::VehicleOnly);
        assert_eq!(
            ThirdPersonMode::from_legacy_vehicle_only(false),
            ThirdPersonMode::AlwaysThirdPerson
        );
    }

    #[test]
    fn test_vehicle_qualifies_with_allowlist() {
        let config = Configuration {
            vehicle_short_prefab_names: vec!["rowboat".to_string()],
            ..Configuration::default()
        };
        assert!(config.vehicle_qualifies("rowboat"));
        assert!(!config.vehicle_qualifies("rhib"));
    }

    #[test]
    fn test_empty_allowlist_accepts_every_vehicle() {
        let config = Configuration {
            vehicle_short_prefab_names: Vec::new(),
            ..Configuration::default()
        };
        assert!(config.vehicle_qualifies("minicopter"));
    }

    #[test]
    fn test_stored_config_tolerates_missing_fields() {
        let stored: StoredConfig = serde_json::from_str(r#"{ "Version": "1.0.0" }"#).unwrap();
        assert_eq!(stored.version.as_deref(), Some("1.0.0"));
        assert!(stored.mode.is_none());
        assert!(stored.camera.is_none());
    }

    #[test]
    fn test_stored_camera_completes_from_defaults() {
        let camera = StoredCamera {
            distance: Some("4".to_string()),
            ..StoredCamera::default()
        }
        .complete();
        assert_eq!(camera.distance, "4");
        assert_eq!(camera.offset, "0.0, 1.0, 0.0");
    }
}
