//! View-mode toggle policy
//!
//! Decides per event whether a player's camera goes to first or third person
//! and performs the switch through the host.
//!
//! The host only lets admins change view mode and camera parameters, so a
//! toggle briefly marks the player as admin. That bracket runs under one
//! exclusive borrow of the host; nothing can interleave another toggle for the
//! same player. Players who really are admins are never touched.

use tracing::{debug, info};

use crate::config::{CameraSettings, Configuration, ThirdPersonMode};
use crate::constants::{camera_commands, lang, permissions};
use crate::host::{Button, InputState, Permissions, PlayerFlag, PlayerHost, PlayerId};
use crate::lang::{LangKey, MessageCatalog};

pub mod events;
pub mod hooks;

pub use events::{EventOutcome, GameEvent, IgnoreReason};
pub use hooks::{Hook, HookTable};

/// Everything the policy reads, handed over once at construction
pub struct PluginContext<P> {
    pub config: Configuration,
    /// Parsed from `config.camera`
    pub camera: CameraSettings,
    pub permissions: P,
    pub messages: MessageCatalog,
}

impl<P: Permissions> PluginContext<P> {
    pub fn new(config: Configuration, permissions: P, messages: MessageCatalog) -> Self {
        let camera = CameraSettings::from_config(&config.camera);
        Self {
            config,
            camera,
            permissions,
            messages,
        }
    }
}

pub struct ViewModePolicy<P> {
    ctx: PluginContext<P>,
    hooks: HookTable,
}

impl<P: Permissions> ViewModePolicy<P> {
    pub fn new(mut ctx: PluginContext<P>) -> Self {
        ctx.permissions.register(permissions::USE);
        let hooks = HookTable::for_mode(ctx.config.mode);
        info!(
            mode = ?ctx.config.mode,
            command = %ctx.config.toggle_command,
            vehicles = ctx.config.vehicle_short_prefab_names.len(),
            "View mode policy ready"
        );
        Self { ctx, hooks }
    }

    pub fn config(&self) -> &Configuration {
        &self.ctx.config
    }

    #[cfg(test)]
    pub fn permissions(&self) -> &P {
        &self.ctx.permissions
    }

    pub fn permissions_mut(&mut self) -> &mut P {
        &mut self.ctx.permissions
    }

    /// Route one host event to its handler
    pub fn handle(&self, host: &mut impl PlayerHost, event: &GameEvent) -> EventOutcome {
        let outcome = match event {
            GameEvent::Input { player, input } => self.on_player_input(host, *player, input),
            GameEvent::Mounted { player, vehicle } => {
                self.on_entity_mounted(host, *player, vehicle.as_deref())
            }
            GameEvent::Dismounted { player, vehicle } => {
                self.on_entity_dismounted(host, *player, vehicle.as_deref())
            }
            GameEvent::ChatCommand {
                player,
                command,
                args,
            } => self.on_chat_command(host, *player, command, args),
        };

        if let EventOutcome::Ignored(reason) = outcome {
            debug!(player = %event.player(), ?reason, "Event ignored");
        }
        outcome
    }

    /// Aiming (secondary fire pressed) drops to first person; letting go
    /// goes back to third person. Holding the button changes nothing.
    pub fn on_player_input(
        &self,
        host: &mut impl PlayerHost,
        player: PlayerId,
        input: &InputState,
    ) -> EventOutcome {
        if !self.hooks.is_active(Hook::PlayerInput) {
            return EventOutcome::Ignored(IgnoreReason::HookInactive);
        }
        if let Err(reason) = self.check_automatic(&*host, player) {
            return EventOutcome::Ignored(reason);
        }

        let pressed = input.is_down(Button::FireSecondary) && !input.was_down(Button::FireSecondary);
        if pressed {
            self.set_third_person(host, player, false);
            EventOutcome::Toggled { third_person: false }
        } else if input.was_just_released(Button::FireSecondary) {
            self.set_third_person(host, player, true);
            EventOutcome::Toggled { third_person: true }
        } else {
            EventOutcome::Ignored(IgnoreReason::NoRelevantInput)
        }
    }

    pub fn on_entity_mounted(
        &self,
        host: &mut impl PlayerHost,
        player: PlayerId,
        vehicle: Option<&str>,
    ) -> EventOutcome {
        if !self.hooks.is_active(Hook::EntityMounted) {
            return EventOutcome::Ignored(IgnoreReason::HookInactive);
        }
        self.on_vehicle_change(host, player, vehicle, true)
    }

    pub fn on_entity_dismounted(
        &self,
        host: &mut impl PlayerHost,
        player: PlayerId,
        vehicle: Option<&str>,
    ) -> EventOutcome {
        if !self.hooks.is_active(Hook::EntityDismounted) {
            return EventOutcome::Ignored(IgnoreReason::HookInactive);
        }
        self.on_vehicle_change(host, player, vehicle, false)
    }

    fn on_vehicle_change(
        &self,
        host: &mut impl PlayerHost,
        player: PlayerId,
        vehicle: Option<&str>,
        third_person: bool,
    ) -> EventOutcome {
        if let Err(reason) = self.check_automatic(&*host, player) {
            return EventOutcome::Ignored(reason);
        }

        let Some(vehicle) = vehicle else {
            return EventOutcome::Ignored(IgnoreReason::NoVehicle);
        };
        if !self.ctx.config.vehicle_qualifies(vehicle) {
            return EventOutcome::Ignored(IgnoreReason::VehicleNotAllowed);
        }

        self.set_third_person(host, player, third_person);
        EventOutcome::Toggled { third_person }
    }

    /// Manual toggle, CommandOnly mode only
    pub fn on_chat_command(
        &self,
        host: &mut impl PlayerHost,
        player: PlayerId,
        command: &str,
        args: &[String],
    ) -> EventOutcome {
        if !self.hooks.is_active(Hook::ChatCommand) {
            return EventOutcome::Ignored(IgnoreReason::HookInactive);
        }
        if !host.is_connected(player) {
            return EventOutcome::Ignored(IgnoreReason::Disconnected);
        }
        if !command.eq_ignore_ascii_case(&self.ctx.config.toggle_command) {
            return EventOutcome::Ignored(IgnoreReason::UnknownCommand);
        }

        if !self.ctx.permissions.has_permission(player, permissions::USE) {
            return self.reject(host, player, LangKey::NoPermission, &[]);
        }
        if self.ctx.config.mode != ThirdPersonMode::CommandOnly {
            return self.reject(host, player, LangKey::ThirdPersonCommandDisabled, &[]);
        }
        if !args.is_empty() {
            let usage = format!("/{}", self.ctx.config.toggle_command);
            return self.reject(host, player, LangKey::CommandSyntaxError, &[&usage]);
        }
        if host.has_flag(player, PlayerFlag::IsAdmin) {
            return self.reject(host, player, LangKey::AdminToggleDenied, &[]);
        }

        let was_third_person = host.has_flag(player, PlayerFlag::ThirdPersonViewmode);
        self.set_third_person(host, player, !was_third_person);

        let perspective = if was_third_person {
            lang::FIRST_PERSON
        } else {
            lang::THIRD_PERSON
        };
        self.reply(host, player, LangKey::ToggleSuccess, &[perspective]);

        EventOutcome::Toggled {
            third_person: !was_third_person,
        }
    }

    /// Switch the view, bracketed by a temporary admin flag.
    ///
    /// Always ends with the admin flag cleared; never call this for real
    /// admins (every handler filters them out first).
    pub fn set_third_person(&self, host: &mut impl PlayerHost, player: PlayerId, enable: bool) {
        if !host.is_connected(player) {
            return;
        }

        host.set_flag(player, PlayerFlag::IsAdmin, true);
        host.send_network_update_immediate(player);

        host.set_flag(player, PlayerFlag::ThirdPersonViewmode, enable);
        if enable {
            let args = &self.ctx.camera.console_args;
            host.send_console_command(player, camera_commands::OFFSET, &args.offset);
            host.send_console_command(player, camera_commands::FIELD_OF_VIEW, &args.field_of_view);
            host.send_console_command(player, camera_commands::DISTANCE, &args.distance);
        }

        host.set_flag(player, PlayerFlag::IsAdmin, false);
        host.send_network_update_immediate(player);

        info!(player = %player, third_person = enable, "Toggled view mode");
    }

    /// Put every connected non-admin back in first person and drop the
    /// configuration. Returns how many players were reset.
    pub fn unload(self, host: &mut impl PlayerHost) -> usize {
        let mut reset = 0;
        for player in host.connected_players() {
            if host.has_flag(player, PlayerFlag::IsAdmin) {
                continue;
            }
            self.set_third_person(host, player, false);
            reset += 1;
        }
        info!(players = reset, "Unloaded, players returned to first person");
        reset
    }

    /// Shared gate for input and vehicle hooks
    fn check_automatic(&self, host: &impl PlayerHost, player: PlayerId) -> Result<(), IgnoreReason> {
        if !host.is_connected(player) {
            return Err(IgnoreReason::Disconnected);
        }
        if !self.ctx.permissions.has_permission(player, permissions::USE) {
            return Err(IgnoreReason::NoPermission);
        }
        if host.has_flag(player, PlayerFlag::IsAdmin) {
            return Err(IgnoreReason::Admin);
        }
        Ok(())
    }

    fn reject(
        &self,
        host: &mut impl PlayerHost,
        player: PlayerId,
        key: LangKey,
        args: &[&str],
    ) -> EventOutcome {
        debug!(player = %player, reason = key.as_str(), "Command rejected");
        self.reply(host, player, key, args);
        EventOutcome::Rejected(key)
    }

    fn reply(&self, host: &mut impl PlayerHost, player: PlayerId, key: LangKey, args: &[&str]) {
        let language = host.language(player);
        let message = self.ctx.messages.format(key, language.as_deref(), args);
        host.send_reply(player, &message);
    }
}
