//! Application-wide constants
//!
//! Literal values shared by the config store, the view policy and the CLI.
//! Defaults here are written to existing deployments during migration, so
//! changing one changes what upgraded servers end up with.

/// Plugin identity
pub mod plugin {
    /// Name used for the config file and lang files
    pub const NAME: &str = "DynamicThirdPerson";

    /// Version of the running software (stamped into migrated configs)
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Config file location
pub mod config {
    /// Directory under the user's config dir
    pub const APP_DIR: &str = "dynamic-third-person";

    /// Config file name
    pub const FILENAME: &str = "DynamicThirdPerson.json";

    /// Directory holding per-language message files
    pub const LANG_DIR: &str = "lang";
}

/// Compiled-in configuration defaults
pub mod defaults {
    /// Vehicles that toggle the view on mount/dismount
    pub const VEHICLE_SHORT_PREFAB_NAMES: &[&str] = &[
        "1module_cockpit",
        "1module_cockpit_armored",
        "1module_cockpit_with_engine",
        "motorbike",
        "motorbike_sidecar",
        "pedalbike",
        "rhib",
        "rowboat",
    ];

    /// Chat command bound to the manual toggle
    pub const TOGGLE_COMMAND: &str = "3rd";

    /// Camera offset, "x, y, z"
    pub const CAMERA_OFFSET: &str = "0.0, 1.0, 0.0";

    /// Camera field of view in degrees
    pub const CAMERA_FIELD_OF_VIEW: &str = "106.1227";

    /// Camera distance from the player
    pub const CAMERA_DISTANCE: &str = "2";
}

/// Versions at which schema fields were introduced
pub mod schema {
    /// First release; anything older is replaced wholesale
    pub const INITIAL: &str = "1.0.0";

    /// Added the `Camera` section
    pub const CAMERA: &str = "1.1.0";

    /// Added the vehicle allowlist and the chat command
    pub const VEHICLES_AND_COMMAND: &str = "1.2.0";

    /// Replaced the vehicle-only boolean with `Third Person Mode`
    pub const MODE: &str = "1.3.0";
}

/// Permission names
pub mod permissions {
    /// Grant required for every automatic and manual toggle
    pub const USE: &str = "dynamicthirdperson.use";
}

/// Host console commands applied when third person is enabled
pub mod camera_commands {
    pub const OFFSET: &str = "camoffset";
    pub const FIELD_OF_VIEW: &str = "camfov";
    pub const DISTANCE: &str = "camdist";
}

/// Localization
pub mod lang {
    /// Language every other language falls back to
    pub const DEFAULT_LANGUAGE: &str = "en";

    /// Perspective names substituted into the toggle reply
    pub const FIRST_PERSON: &str = "1st person";
    pub const THIRD_PERSON: &str = "3rd person";
}
