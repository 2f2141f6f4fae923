//! Name-color roles for `!setcolor`, `!resetcolor` and `!colors`.
//!
//! Each palette entry corresponds to a role named after the color ("Gold"). A member
//! holds at most one color role at a time. Roles are created on first use unless the
//! host has denied role creation, in which case only pre-existing roles can be handed out.
use log::{info, warn};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use super::transport::UserId;
use crate::config::ColorsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRole {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

impl ColorRole {
    /// Role name as shown on the platform: "Gold".
    pub fn role_name(&self) -> String {
        capitalize(self.name)
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.rgb.0, self.rgb.1, self.rgb.2)
    }
}

pub const PALETTE: [ColorRole; 8] = [
    ColorRole { name: "silver", rgb: (192, 192, 192) },
    ColorRole { name: "gold", rgb: (255, 215, 0) },
    ColorRole { name: "purple", rgb: (155, 89, 182) },
    ColorRole { name: "yellow", rgb: (255, 255, 0) },
    ColorRole { name: "green", rgb: (46, 204, 113) },
    ColorRole { name: "red", rgb: (231, 76, 60) },
    ColorRole { name: "azure", rgb: (0, 127, 255) },
    ColorRole { name: "orange", rgb: (255, 165, 0) },
];

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn lookup(name: &str) -> Option<ColorRole> {
    PALETTE
        .iter()
        .copied()
        .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
}

/// "Silver, Gold, Purple, ..."
pub fn palette_list() -> String {
    PALETTE
        .iter()
        .map(|c| c.role_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("That color is not available. Please choose from: {}", palette_list())]
    UnknownColor(String),
    #[error("I don't have permission to create roles.")]
    PermissionDenied,
}

#[derive(Default)]
struct RoleState {
    existing: BTreeSet<&'static str>,
    assigned: HashMap<UserId, &'static str>,
}

pub struct ColorRoles {
    allow_role_creation: bool,
    state: Mutex<RoleState>,
}

impl ColorRoles {
    pub fn new(config: &ColorsConfig) -> Self {
        let mut state = RoleState::default();
        for name in &config.existing_roles {
            match lookup(name) {
                Some(c) => {
                    state.existing.insert(c.name);
                }
                None => warn!("colors: ignoring unknown pre-existing role '{}'", name),
            }
        }
        ColorRoles {
            allow_role_creation: config.allow_role_creation,
            state: Mutex::new(state),
        }
    }

    fn guard(&self) -> MutexGuard<'_, RoleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Give `user` the color role `name`, replacing any color they had.
    pub fn set_color(&self, user: &UserId, name: &str) -> Result<ColorRole, ColorError> {
        let color = lookup(name).ok_or_else(|| ColorError::UnknownColor(name.to_string()))?;
        let mut state = self.guard();
        if !state.existing.contains(color.name) {
            if !self.allow_role_creation {
                warn!("colors: role creation denied for '{}'", color.role_name());
                return Err(ColorError::PermissionDenied);
            }
            state.existing.insert(color.name);
            info!("colors: created role {} ({})", color.role_name(), color.hex());
        }
        state.assigned.insert(user.clone(), color.name);
        Ok(color)
    }

    /// Strip every color role from `user`; returns the color they had.
    pub fn reset_color(&self, user: &UserId) -> Option<ColorRole> {
        self.guard().assigned.remove(user).and_then(lookup)
    }

    pub fn color_of(&self, user: &UserId) -> Option<ColorRole> {
        self.guard().assigned.get(user).copied().and_then(lookup)
    }
}
