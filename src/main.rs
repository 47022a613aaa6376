//! Headless demo: generates a world, digs straight down the entry shaft for
//! a few rows, hauls the load back to the base, and logs the result.
//!
//! The systems in this file stand in for the host application: they play
//! the role of physics (reporting contacts, moving the body) and input.

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use bevy::app::{AppExit, ScheduleRunnerPlugin};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use delvekeep::config::WorldConfig;
use delvekeep::shared::*;
use delvekeep::terrain::TileGrid;
use delvekeep::CorePlugin;

const CONFIG_PATH: &str = "assets/config/world.ron";
const DEMO_ROWS: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Digging,
    Hauling,
    Done,
}

#[derive(Resource, Debug)]
struct Digger {
    row: i32,
    phase: Phase,
}

impl Default for Digger {
    fn default() -> Self {
        Self {
            row: 2,
            phase: Phase::Digging,
        }
    }
}

fn main() -> AppExit {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
        LogPlugin::default(),
        StatesPlugin,
    ));

    // Logging is up, so a bad config file gets reported.
    app.insert_resource(WorldConfig::load_or_default(CONFIG_PATH));
    app.add_plugins(CorePlugin);

    app.init_resource::<Digger>();
    app.add_systems(OnEnter(GameState::Playing), push_joystick_down);
    app.add_systems(Update, drive_digger.run_if(in_state(GameState::Playing)));

    app.run()
}

fn push_joystick_down(mut joystick: EventWriter<JoystickEvent>) {
    joystick.send(JoystickEvent::Drag { angle: FRAC_PI_2 });
}

#[allow(clippy::too_many_arguments)]
fn drive_digger(
    mut digger: ResMut<Digger>,
    config: Res<WorldConfig>,
    grid: Res<TileGrid>,
    haul: Res<PlayerResources>,
    stock: Res<BaseResources>,
    progression: Res<PlayerProgression>,
    mut body: ResMut<PlayerBody>,
    mut contacts: EventWriter<TileContactEvent>,
    mut joystick: EventWriter<JoystickEvent>,
    mut deposits: EventWriter<DepositEvent>,
    mut exit: EventWriter<AppExit>,
) {
    match digger.phase {
        Phase::Digging => {
            let row = digger.row;
            let remaining: Vec<TileCoord> = config
                .shaft_columns()
                .map(|col| TileCoord::new(col, row))
                .filter(|coord| grid.contains(*coord))
                .collect();

            if remaining.is_empty() {
                digger.row += 1;
                if digger.row >= (2 + DEMO_ROWS).min(grid.rows()) {
                    info!(
                        "[Demo] Dug {} rows, hauling {} units (speed now {:.0})",
                        DEMO_ROWS,
                        haul.total(),
                        haul.effective_speed(config.base_speed)
                    );
                    digger.phase = Phase::Hauling;
                    return;
                }
            }

            // Stand on top of the row being dug.
            let row_top = config.tile_position(TileCoord::new(0, digger.row)).y;
            body.position.y = row_top - config.tile_size;
            for coord in remaining {
                contacts.send(TileContactEvent { tile: coord });
            }
        }
        Phase::Hauling => {
            joystick.send(JoystickEvent::Release);
            body.position = config.base_position();
            deposits.send(DepositEvent);
            digger.phase = Phase::Done;
        }
        Phase::Done => {
            info!(
                "[Demo] Base stock: {} stone, {} iron. Level {} ({} / {} XP)",
                stock.held(Material::Stone),
                stock.held(Material::Iron),
                progression.level,
                progression.experience,
                progression.next_level_threshold
            );
            exit.send(AppExit::Success);
        }
    }
}
