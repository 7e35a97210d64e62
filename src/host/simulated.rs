//! In-memory host used by the `simulate` command and by tests
//!
//! Records every call the policy makes so the order of the admin bracket can
//! be checked, not just its end state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::{PlayerFlag, PlayerHost, PlayerId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatedPlayer {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub third_person: bool,
    #[serde(default)]
    pub language: Option<String>,
    /// Last argument of each console command run for this player
    #[serde(default, skip_deserializing)]
    pub console: BTreeMap<String, String>,
    #[serde(default, skip_deserializing)]
    pub replies: Vec<String>,
    #[serde(default, skip_deserializing)]
    pub network_updates: u32,
}

/// One observable host call
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetFlag(PlayerId, PlayerFlag, bool),
    NetworkUpdate(PlayerId),
    ConsoleCommand(PlayerId, String, String),
    Reply(PlayerId, String),
}

#[derive(Debug, Default)]
pub struct SimulatedServer {
    players: BTreeMap<PlayerId, SimulatedPlayer>,
    journal: Vec<HostCall>,
}

impl SimulatedServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, id: PlayerId, player: SimulatedPlayer) {
        debug!(player = %id, admin = player.admin, "Player connected");
        self.players.insert(id, player);
    }

    #[cfg(test)]
    pub fn disconnect(&mut self, id: PlayerId) {
        debug!(player = %id, "Player disconnected");
        self.players.remove(&id);
    }

    #[cfg(test)]
    pub fn player(&self, id: PlayerId) -> Option<&SimulatedPlayer> {
        self.players.get(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = (&PlayerId, &SimulatedPlayer)> {
        self.players.iter()
    }

    #[cfg(test)]
    pub fn journal(&self) -> &[HostCall] {
        &self.journal
    }

    #[cfg(test)]
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    #[cfg(test)]
    pub fn last_reply(&self, id: PlayerId) -> Option<&str> {
        self.players
            .get(&id)
            .and_then(|p| p.replies.last())
            .map(String::as_str)
    }
}

impl PlayerHost for SimulatedServer {
    fn connected_players(&self) -> Vec<PlayerId> {
        self.players.keys().copied().collect()
    }

    fn is_connected(&self, player: PlayerId) -> bool {
        self.players.contains_key(&player)
    }

    fn has_flag(&self, player: PlayerId, flag: PlayerFlag) -> bool {
        self.players.get(&player).is_some_and(|p| match flag {
            PlayerFlag::IsAdmin => p.admin,
            PlayerFlag::ThirdPersonViewmode => p.third_person,
        })
    }

    fn set_flag(&mut self, player: PlayerId, flag: PlayerFlag, value: bool) {
        if let Some(p) = self.players.get_mut(&player) {
            match flag {
                PlayerFlag::IsAdmin => p.admin = value,
                PlayerFlag::ThirdPersonViewmode => p.third_person = value,
            }
            self.journal.push(HostCall::SetFlag(player, flag, value));
        }
    }

    fn send_network_update_immediate(&mut self, player: PlayerId) {
        if let Some(p) = self.players.get_mut(&player) {
            p.network_updates += 1;
            self.journal.push(HostCall::NetworkUpdate(player));
        }
    }

    fn send_console_command(&mut self, player: PlayerId, command: &str, arg: &str) {
        if let Some(p) = self.players.get_mut(&player) {
            p.console.insert(command.to_string(), arg.to_string());
            self.journal
                .push(HostCall::ConsoleCommand(player, command.to_string(), arg.to_string()));
        }
    }

    fn send_reply(&mut self, player: PlayerId, message: &str) {
        if let Some(p) = self.players.get_mut(&player) {
            p.replies.push(message.to_string());
            self.journal.push(HostCall::Reply(player, message.to_string()));
        }
    }

    fn language(&self, player: PlayerId) -> Option<String> {
        self.players.get(&player).and_then(|p| p.language.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_roundtrip_for_connected_player() {
        let mut server = SimulatedServer::new();
        server.connect(PlayerId(1), SimulatedPlayer::default());

        server.set_flag(PlayerId(1), PlayerFlag::ThirdPersonViewmode, true);
        assert!(server.has_flag(PlayerId(1), PlayerFlag::ThirdPersonViewmode));
        assert!(!server.has_flag(PlayerId(1), PlayerFlag::IsAdmin));
        assert_eq!(
            server.journal(),
            &[HostCall::SetFlag(PlayerId(1), PlayerFlag::ThirdPersonViewmode, true)]
        );
    }

    #[test]
    fn test_calls_for_unknown_player_are_dropped() {
        let mut server = SimulatedServer::new();
        server.set_flag(PlayerId(9), PlayerFlag::IsAdmin, true);
        server.send_reply(PlayerId(9), "hello");

        assert!(!server.is_connected(PlayerId(9)));
        assert!(!server.has_flag(PlayerId(9), PlayerFlag::IsAdmin));
        assert!(server.journal().is_empty());
    }

    #[test]
    fn test_connected_players_sorted() {
        let mut server = SimulatedServer::new();
        server.connect(PlayerId(30), SimulatedPlayer::default());
        server.connect(PlayerId(10), SimulatedPlayer::default());
        server.connect(PlayerId(20), SimulatedPlayer::default());
        server.disconnect(PlayerId(20));

        assert_eq!(server.connected_players(), vec![PlayerId(10), PlayerId(30)]);
    }

    #[test]
    fn test_console_command_keeps_last_argument() {
        let mut server = SimulatedServer::new();
        server.connect(PlayerId(1), SimulatedPlayer::default());
        server.send_console_command(PlayerId(1), "camfov", "90");
        server.send_console_command(PlayerId(1), "camfov", "100");

        let player = server.player(PlayerId(1)).unwrap();
        assert_eq!(player.console.get("camfov").map(String::as_str), Some("100"));
    }
}
