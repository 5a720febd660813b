use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::slots::Slot;

/// Partial mapping from role to EP value. Roles absent from the map value the
/// item at 0.
pub type EpByRole = HashMap<Role, f64>;

/// Builds an EP map from literal pairs. Convenience for dataset entry.
pub fn ep_by_role(entries: &[(Role, f64)]) -> EpByRole {
    entries.iter().copied().collect()
}

/// A piece of loot: unique name, the slot it occupies, and its EP value per
/// role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub slot: Slot,
    #[serde(default)]
    pub ep: EpByRole,
}

impl Item {
    pub fn new(name: impl Into<String>, slot: Slot, ep: EpByRole) -> Self {
        Self {
            name: name.into(),
            slot,
            ep,
        }
    }

    /// EP value of this item for `role`; 0 when the item is unscored for it.
    pub fn ep_for(&self, role: Role) -> f64 {
        self.ep.get(&role).copied().unwrap_or(0.0)
    }
}
