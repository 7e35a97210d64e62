//! Events the host delivers and what the policy did with them

use serde::{Deserialize, Serialize};

use crate::host::{InputState, PlayerId};
use crate::lang::LangKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Per-tick input snapshot
    Input { player: PlayerId, input: InputState },
    /// `vehicle` is the short prefab name of the mountable's parent vehicle,
    /// `None` for seats that aren't part of a vehicle
    Mounted {
        player: PlayerId,
        #[serde(default)]
        vehicle: Option<String>,
    },
    Dismounted {
        player: PlayerId,
        #[serde(default)]
        vehicle: Option<String>,
    },
    /// Chat command without the leading slash
    ChatCommand {
        player: PlayerId,
        command: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl GameEvent {
    pub fn player(&self) -> PlayerId {
        match self {
            Self::Input { player, .. }
            | Self::Mounted { player, .. }
            | Self::Dismounted { player, .. }
            | Self::ChatCommand { player, .. } => *player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IgnoreReason {
    HookInactive,
    Disconnected,
    NoPermission,
    Admin,
    NoVehicle,
    VehicleNotAllowed,
    NoRelevantInput,
    UnknownCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventOutcome {
    /// View flag was written
    Toggled { third_person: bool },
    /// Nothing happened and nobody was told
    Ignored(IgnoreReason),
    /// Command refused; the player got this message
    Rejected(LangKey),
}
