//! Maze Chase headless entry point
//!
//! Runs one session at the fixed tick rate with a wandering autopilot in
//! place of a human, logging events as they happen. Pass a settings JSON path
//! as the first argument to override the defaults.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use maze_chase::Settings;
use maze_chase::sim::{Direction, GamePhase, GameState, TickInput, tick};

/// Give up after this many simulated minutes
const MAX_MINUTES: u64 = 10;

/// Picks a random non-reversing turn whenever the player sits on a cell center
struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
        }
    }

    fn steer(&mut self, state: &GameState) -> Option<Direction> {
        let player = &state.player;
        if !player
            .motion
            .at_intersection(state.grid.cell_size(), player.speed)
        {
            return None;
        }
        let mut options = state.grid.valid_directions(player.pos());
        if options.len() > 1 {
            let back = player.direction().opposite();
            options.retain(|&d| d != back);
        }
        if options.is_empty() {
            return None;
        }
        Some(options[self.rng.random_range(0..options.len())])
    }
}

fn main() {
    env_logger::init();
    log::info!("Maze Chase (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => Settings::default(),
    };

    let mut state = match GameState::new(settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start session: {}", e);
            std::process::exit(if e.is_config() { 2 } else { 1 });
        }
    };
    let mut autopilot = Autopilot::new(state.settings().seed);
    let max_ticks = MAX_MINUTES * 60 * state.settings().tick_rate as u64;

    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );

    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        let input = TickInput {
            direction: autopilot.steer(&state),
            ..Default::default()
        };
        for event in tick(&mut state, &input) {
            log::debug!("[tick {}] {:?}", state.time_ticks, event);
        }
    }

    log::info!(
        "Finished in {:?} after {} ticks: score {}, lives {}, {}/{} collected",
        state.phase,
        state.time_ticks,
        state.score,
        state.lives,
        state.collected,
        state.total_collectibles()
    );
    for adversary in &state.adversaries {
        log::info!(
            "  {:<6} at {:?} heading {:?}{}",
            adversary.personality().as_str(),
            adversary.pos(),
            adversary.direction(),
            if adversary.frightened { " (frightened)" } else { "" }
        );
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
