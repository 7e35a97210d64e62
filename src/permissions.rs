//! In-memory permission registry
//!
//! Mirrors how a host permission system behaves: a permission has to be
//! registered by its owner before it can be granted.

use anyhow::{Result, bail};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::host::{Permissions, PlayerId};

#[derive(Debug, Default, Clone)]
pub struct PermissionRegistry {
    registered: HashSet<String>,
    grants: HashMap<PlayerId, HashSet<String>>,
}

impl PermissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered(&self, permission: &str) -> bool {
        self.registered.contains(permission)
    }

    pub fn grant(&mut self, player: PlayerId, permission: &str) -> Result<()> {
        if !self.is_registered(permission) {
            bail!("Permission '{permission}' is not registered");
        }
        info!(player = %player, permission, "Granted permission");
        self.grants
            .entry(player)
            .or_default()
            .insert(permission.to_string());
        Ok(())
    }

    /// Returns whether the player held the permission
    #[cfg(test)]
    pub fn revoke(&mut self, player: PlayerId, permission: &str) -> bool {
        let removed = self
            .grants
            .get_mut(&player)
            .is_some_and(|granted| granted.remove(permission));
        if removed {
            info!(player = %player, permission, "Revoked permission");
        }
        removed
    }
}

impl Permissions for PermissionRegistry {
    fn register(&mut self, permission: &str) {
        if self.registered.insert(permission.to_string()) {
            debug!(permission, "Registered permission");
        }
    }

    fn has_permission(&self, player: PlayerId, permission: &str) -> bool {
        self.grants
            .get(&player)
            .is_some_and(|granted| granted.contains(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::permissions::USE;

    #[test]
    fn test_grant_requires_registration() {
        let mut registry = PermissionRegistry::new();
        assert!(registry.grant(PlayerId(1), USE).is_err());

        registry.register(USE);
        registry.grant(PlayerId(1), USE).unwrap();
        assert!(registry.has_permission(PlayerId(1), USE));
        assert!(!registry.has_permission(PlayerId(2), USE));
    }

    #[test]
    fn test_revoke() {
        let mut registry = PermissionRegistry::new();
        registry.register(USE);
        registry.grant(PlayerId(1), USE).unwrap();

        assert!(registry.revoke(PlayerId(1), USE));
        assert!(!registry.has_permission(PlayerId(1), USE));
        assert!(!registry.revoke(PlayerId(1), USE));
    }

    #[test]
    fn test_register_twice_is_harmless() {
        let mut registry = PermissionRegistry::new();
        registry.register(USE);
        registry.register(USE);
        assert!(registry.is_registered(USE));
    }
}
