//! Seams to the game server hosting the plugin
//!
//! Everything the policy needs from the host goes through these traits so the
//! policy can run against the in-memory `SimulatedServer` in tests and in the
//! `simulate` CLI command.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod input;
pub mod simulated;

pub use input::{Button, InputState};
pub use simulated::SimulatedServer;

/// Account id of a connected player (a Steam id on real servers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host player flags this plugin reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerFlag {
    IsAdmin,
    ThirdPersonViewmode,
}

/// Player session access
pub trait PlayerHost {
    /// Every player currently connected
    fn connected_players(&self) -> Vec<PlayerId>;

    fn is_connected(&self, player: PlayerId) -> bool;

    fn has_flag(&self, player: PlayerId, flag: PlayerFlag) -> bool;

    fn set_flag(&mut self, player: PlayerId, flag: PlayerFlag, value: bool);

    /// Replicate the player's state to their own client right away
    fn send_network_update_immediate(&mut self, player: PlayerId);

    /// Run a client console command as the player (admin-restricted on the host)
    fn send_console_command(&mut self, player: PlayerId, command: &str, arg: &str);

    /// Chat reply to a single player
    fn send_reply(&mut self, player: PlayerId, message: &str);

    /// Player's language code, if the host knows it
    fn language(&self, _player: PlayerId) -> Option<String> {
        None
    }
}

/// Capability checks against the host's permission system
pub trait Permissions {
    fn register(&mut self, permission: &str);

    fn has_permission(&self, player: PlayerId, permission: &str) -> bool;
}
