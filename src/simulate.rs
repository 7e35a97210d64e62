//! Replay a scripted event stream against the in-memory host
//!
//! Script format:
//!
//! ```json
//! {
//!   "players": [ { "id": 1, "permitted": true, "admin": false, "third_person": false } ],
//!   "events":  [ { "type": "ChatCommand", "player": 1, "command": "3rd" } ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::constants::permissions;
use crate::host::simulated::SimulatedPlayer;
use crate::host::{PlayerId, SimulatedServer};
use crate::permissions::PermissionRegistry;
use crate::policy::{EventOutcome, GameEvent, PluginContext, ViewModePolicy};

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub players: Vec<ScriptPlayer>,
    #[serde(default)]
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPlayer {
    pub id: PlayerId,
    #[serde(default = "default_permitted")]
    pub permitted: bool,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub third_person: bool,
    #[serde(default)]
    pub language: Option<String>,
}

fn default_permitted() -> bool {
    true
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }
}

/// One line of the replay log
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub index: usize,
    pub player: PlayerId,
    pub outcome: EventOutcome,
}

/// What the replay did, and where every player ended up
#[derive(Debug, Serialize)]
pub struct Report {
    pub steps: Vec<Step>,
    /// Players returned to first person on unload
    pub unloaded: usize,
    pub players: Vec<(PlayerId, SimulatedPlayer)>,
}

/// Run every event, then unload the policy the way a server shutdown would
pub fn run(
    script: Script,
    ctx: PluginContext<PermissionRegistry>,
) -> Result<Report> {
    let mut policy = ViewModePolicy::new(ctx);
    let mut server = SimulatedServer::new();

    for player in &script.players {
        if player.permitted {
            policy.permissions_mut().grant(player.id, permissions::USE)?;
        }
        server.connect(
            player.id,
            SimulatedPlayer {
                admin: player.admin,
                third_person: player.third_person,
                language: player.language.clone(),
                ..SimulatedPlayer::default()
            },
        );
    }

    let steps = script
        .events
        .iter()
        .enumerate()
        .map(|(index, event)| Step {
            index,
            player: event.player(),
            outcome: policy.handle(&mut server, event),
        })
        .collect::<Vec<_>>();
    info!(events = steps.len(), mode = ?policy.config().mode, "Replayed script");

    let unloaded = policy.unload(&mut server);

    let players = server
        .players()
        .map(|(id, player)| (*id, player.clone()))
        .collect();

    Ok(Report {
        steps,
        unloaded,
        players,
    })
}
