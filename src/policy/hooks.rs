//! Which host hooks are live for each mode
//!
//! Built once at startup. A hook that is off for the active mode drops its
//! events before any permission or player lookup happens.

use crate::config::ThirdPersonMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    PlayerInput,
    EntityMounted,
    EntityDismounted,
    /// Always registered; the handler itself rejects it outside CommandOnly
    ChatCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookTable {
    pub player_input: bool,
    pub entity_mounted: bool,
    pub entity_dismounted: bool,
}

impl HookTable {
    pub const fn for_mode(mode: ThirdPersonMode) -> Self {
        match mode {
            ThirdPersonMode::AlwaysThirdPerson => Self {
                player_input: true,
                entity_mounted: false,
                entity_dismounted: false,
            },
            ThirdPersonMode::VehicleOnly => Self {
                player_input: false,
                entity_mounted: true,
                entity_dismounted: true,
            },
            ThirdPersonMode::CommandOnly => Self {
                player_input: false,
                entity_mounted: false,
                entity_dismounted: false,
            },
        }
    }

    pub fn is_active(&self, hook: Hook) -> bool {
        match hook {
            Hook::PlayerInput => self.player_input,
            Hook::EntityMounted => self.entity_mounted,
            Hook::EntityDismounted => self.entity_dismounted,
            Hook::ChatCommand => true,
        }
    }
}
