//! Ledger domain — the haul, the base stock, and player progression.
//!
//! All cross-domain communication goes through `crate::shared::*` events and
//! resources. Mining credits the haul directly when a tile breaks; this
//! plugin owns the deposit transfer and announces level-ups.

use bevy::prelude::*;
use crate::shared::*;

pub mod leveling;
pub mod pool;

pub use pool::{deposit, SPEED_PENALTY_PER_UNIT};

pub struct LedgerPlugin;

impl Plugin for LedgerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerResources>()
            .init_resource::<BaseResources>()
            .init_resource::<PlayerProgression>()
            .init_resource::<PlayerBody>();

        app.add_event::<DepositEvent>().add_event::<LevelUpEvent>();

        app.add_systems(Update, (handle_deposit, announce_level_ups));
    }
}

/// Applies DepositEvents. Deposits only count while digging; touching the
/// base while manning it (or after it fell) does nothing.
pub fn handle_deposit(
    mut events: EventReader<DepositEvent>,
    state: Res<State<GameState>>,
    mut haul: ResMut<PlayerResources>,
    mut stock: ResMut<BaseResources>,
    mut body: ResMut<PlayerBody>,
) {
    if *state.get() != GameState::Playing {
        events.clear();
        return;
    }

    for _ in events.read() {
        let moved = deposit(&mut haul, &mut stock, &mut body);
        if moved > 0 {
            info!(
                "[Ledger] Deposited {} units. Base stock: {} stone, {} iron",
                moved,
                stock.held(Material::Stone),
                stock.held(Material::Iron)
            );
        }
    }
}

pub fn announce_level_ups(
    mut events: EventReader<LevelUpEvent>,
) {
    for ev in events.read() {
        info!(
            "[Ledger] Leveled up to level {}! Next level at {} XP.",
            ev.level, ev.next_level_threshold
        );
    }
}
