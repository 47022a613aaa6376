//! Resource pools — the haul the player carries and the stock at the base.

use bevy::prelude::*;

use crate::shared::*;

/// Speed lost per unit of resource carried.
pub const SPEED_PENALTY_PER_UNIT: f32 = 2.0;

impl ResourcePool {
    pub fn held(&self, material: Material) -> u32 {
        self.counts.get(&material).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, material: Material, amount: u32) {
        let count = self.counts.entry(material).or_insert(0);
        *count = count.saturating_add(amount);
    }

    pub fn total(&self) -> u32 {
        self.counts.values().fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Move everything from `other` into `self`, leaving `other` at zero for
    /// every material.
    pub fn absorb(&mut self, other: &mut ResourcePool) {
        for (material, count) in other.counts.iter_mut() {
            let moved = std::mem::take(count);
            self.credit(*material, moved);
        }
    }
}

impl PlayerResources {
    /// Movement speed under the current load. Recomputed on every call; it
    /// never goes below zero.
    pub fn effective_speed(&self, base_speed: f32) -> f32 {
        (base_speed - SPEED_PENALTY_PER_UNIT * self.total() as f32).max(0.0)
    }
}

/// Hand the whole haul to the base and stop the player dead.
pub fn deposit(haul: &mut PlayerResources, stock: &mut BaseResources, body: &mut PlayerBody) -> u32 {
    let moved = haul.total();
    stock.absorb(&mut haul.0);
    body.momentum = Vec2::ZERO;
    moved
}
