//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one frame. Order within a tick is
//! fixed: player, pellets, power countdown, adversaries, collisions.

use super::grid::Collectible;
use super::motion::Direction;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Requested player heading
    pub direction: Option<Direction>,
    /// Leave the menu
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// New session after game over / win
    pub restart: bool,
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.start {
        state.start_from_menu();
    }
    if input.restart {
        state.restart_after_end();
    }
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.pause();
                return events;
            }
            GamePhase::Paused => {
                state.resume();
            }
            _ => {}
        }
    }

    // Everything below only runs while playing
    if state.phase != GamePhase::Playing {
        return events;
    }

    if let Some(direction) = input.direction {
        state.queue_direction(direction);
    }

    state.time_ticks += 1;

    state.player.update(&state.grid);

    if let Some(collectible) = state.grid.consume_pellet(state.player.pos()) {
        collect(state, collectible, &mut events);
    }

    // A cleared maze ends the round before any adversary moves
    if state.collected >= state.total_collectibles() {
        state.phase = GamePhase::Win;
        log::info!("Maze cleared with score {}", state.score);
        events.push(GameEvent::Win);
        return events;
    }

    if state.tick_power_mode() {
        events.push(GameEvent::PowerModeEnded);
    }

    move_adversaries(state);
    resolve_collisions(state, &mut events);

    events
}

fn collect(state: &mut GameState, collectible: Collectible, events: &mut Vec<GameEvent>) {
    state.collected += 1;
    match collectible {
        Collectible::Pellet => {
            state.score += PELLET_SCORE;
            events.push(GameEvent::PelletEaten);
        }
        Collectible::PowerPellet => {
            state.score += POWER_PELLET_SCORE;
            state.activate_power_mode();
            events.push(GameEvent::PowerPelletEaten);
        }
    }
}

fn move_adversaries(state: &mut GameState) {
    let player = state.player_view();
    for adversary in &mut state.adversaries {
        adversary.update(
            &state.grid,
            player,
            state.power_mode,
            &state.settings,
            &mut state.rng,
        );
    }
}

/// Check every adversary against the player, in roster order
fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_bounds = state.player.bounds();

    for index in 0..state.adversaries.len() {
        if !state.adversaries[index].bounds().overlaps(&player_bounds) {
            continue;
        }

        if state.power_mode && state.adversaries[index].frightened {
            let spawn = state.grid.adversary_spawn(index);
            state.adversaries[index].reset(spawn, &mut state.rng);
            state.score += ADVERSARY_SCORE;
            log::debug!("Adversary {} eaten", index);
            events.push(GameEvent::AdversaryEaten { index });
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        log::debug!("Life lost to adversary {}, {} left", index, state.lives);
        events.push(GameEvent::LifeLost {
            lives_remaining: state.lives,
        });

        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", state.score);
            events.push(GameEvent::GameOver);
        } else {
            state.reset_positions();
        }
        // Positions changed (or the game ended): nobody else can be touching
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_center;
    use crate::settings::Settings;
    use crate::sim::adversary::Personality;
    use glam::{IVec2, Vec2};

    const CELL: f32 = 30.0;

    fn center(x: i32, y: i32) -> Vec2 {
        cell_center(IVec2::new(x, y), CELL)
    }

    fn playing() -> GameState {
        let mut state = GameState::new(Settings::default()).unwrap();
        state.start_from_menu();
        state
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Park every adversary far from the player, facing into a wall-free corridor
    fn park_adversaries(state: &mut GameState) {
        for adversary in &mut state.adversaries {
            adversary.motion.pos = center(18, 13);
            adversary.motion.direction = Direction::Left;
        }
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let spawn = state.player.pos();

        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.player.pos(), spawn);
        assert_eq!(state.time_ticks, 0);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
        assert_ne!(state.player.pos(), spawn);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = playing();
        tick(&mut state, &idle());

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        let player = state.player.pos();
        let adversaries: Vec<_> = state.adversaries.iter().map(|a| a.pos()).collect();
        let ticks = state.time_ticks;
        for _ in 0..10 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.player.pos(), player);
        assert_eq!(state.time_ticks, ticks);
        let after: Vec<_> = state.adversaries.iter().map(|a| a.pos()).collect();
        assert_eq!(after, adversaries);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_pellet_scores() {
        let mut state = playing();
        park_adversaries(&mut state);
        // One step short of the (4,3) pellet's cell, heading into it
        state.player.motion.pos = center(5, 3) - Vec2::new(14.0, 0.0);
        state.player.motion.direction = Direction::Left;

        let events = tick(&mut state, &idle());
        assert_eq!(events, vec![GameEvent::PelletEaten]);
        assert_eq!(state.score, 10);
        assert_eq!(state.collected, 1);

        // Same cell again: nothing left to eat
        let events = tick(&mut state, &idle());
        assert!(!events.contains(&GameEvent::PelletEaten));
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_power_pellet_frightens_adversaries() {
        let mut state = playing();
        park_adversaries(&mut state);
        // Walking up into the (1,2) power pellet from (1,3)
        state.player.motion.pos = center(1, 3);
        state.player.motion.direction = Direction::Up;
        state.player.pending = None;

        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(tick(&mut state, &idle()));
        }
        assert!(events.contains(&GameEvent::PowerPelletEaten));
        assert!(state.power_mode);
        assert!(state.adversaries.iter().all(|a| a.frightened));
        assert!(state.score >= POWER_PELLET_SCORE);
        assert!(state.power_ticks < state.settings().power_mode_ticks());
    }

    #[test]
    fn test_power_mode_runs_out() {
        let settings = Settings {
            power_mode_seconds: 0.1,
            ..Default::default()
        };
        let mut state = GameState::new(settings).unwrap();
        state.start_from_menu();
        park_adversaries(&mut state);
        state.activate_power_mode();

        let mut ended = false;
        for _ in 0..6 {
            if tick(&mut state, &idle()).contains(&GameEvent::PowerModeEnded) {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert!(!state.power_mode);
        assert!(state.adversaries.iter().all(|a| !a.frightened));
    }

    // Chase adversary at (5,5), player at (10,5): Right beats Down
    #[test]
    fn test_scenario_chase_selects_right() {
        let rows: [[u8; 12]; 8] = [
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 5, 0, 0, 0, 0, 4, 1],
            [1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ];
        let mut state = GameState::with_layout(Settings::default(), &rows).unwrap();
        state.start_from_menu();
        // A pellet the player can't reach keeps the round going
        assert_eq!(state.total_collectibles(), 1);

        let chase = &mut state.adversaries[0];
        assert_eq!(chase.personality(), Personality::Chase);
        assert_eq!(chase.pos(), center(5, 5));
        chase.motion.direction = Direction::Down;
        assert_eq!(
            chase.options(&state.grid),
            vec![Direction::Down, Direction::Right]
        );

        // The player is boxed in at (10,5) facing a wall, so it stays put
        state.player.motion.direction = Direction::Right;
        // Park the other three out of the way inside the spawn's dead end
        for adversary in state.adversaries.iter_mut().skip(1) {
            adversary.motion.pos = center(5, 6);
            adversary.motion.direction = Direction::Down;
        }

        tick(&mut state, &idle());
        assert_eq!(state.player.pos(), center(10, 5));
        assert_eq!(state.adversaries[0].direction(), Direction::Right);
    }

    #[test]
    fn test_layout_without_collectibles_wins_at_once() {
        let rows: [[u8; 5]; 3] = [[1, 1, 1, 1, 1], [1, 4, 0, 5, 1], [1, 1, 1, 1, 1]];
        let mut state = GameState::with_layout(Settings::default(), &rows).unwrap();
        assert_eq!(state.total_collectibles(), 0);
        let adversary_start = state.adversaries[0].pos();

        let events = tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(events, vec![GameEvent::Win]);
        assert_eq!(state.phase, GamePhase::Win);
        assert_eq!(state.lives, 3);
        // Adversaries never got to move
        assert_eq!(state.adversaries[0].pos(), adversary_start);

        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Win);
    }

    // One life left, non-frightened collision: game over, then a clean restart
    #[test]
    fn test_scenario_last_life_game_over_and_restart() {
        let mut state = playing();
        let total = state.total_collectibles();
        state.lives = 1;
        state.score = 1234;
        state.grid.consume_pellet(center(4, 3));
        state.collected = 1;

        // Drop an adversary on top of the player
        let player_pos = state.player.pos();
        state.adversaries[2].motion.pos = player_pos + Vec2::new(2.0, 0.0);
        state.adversaries[2].motion.direction = Direction::Left;

        let events = tick(&mut state, &idle());
        assert!(events.contains(&GameEvent::LifeLost { lives_remaining: 0 }));
        assert!(events.contains(&GameEvent::GameOver));
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Ticks do nothing until restart
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::GameOver);

        assert!(state.restart_after_end());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.collected, 0);
        assert!(!state.power_mode);
        assert_eq!(state.grid.remaining_collectibles(), total);
        assert_eq!(state.total_collectibles(), total);
        assert!(state.grid.pellets().contains(&IVec2::new(4, 3)));
        assert_eq!(state.player.pos(), state.grid.player_spawn());

        // The restart input goes through the same path from GameOver
        state.phase = GamePhase::GameOver;
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert!(state.score <= PELLET_SCORE);
    }

    #[test]
    fn test_life_lost_resets_everyone() {
        let mut state = playing();
        state.player.motion.pos = center(4, 3);
        state.player.motion.direction = Direction::Up;
        state.adversaries[0].motion.pos = center(4, 3) + Vec2::new(0.0, 3.0);
        state.adversaries[0].motion.direction = Direction::Up;
        state.adversaries[3].motion.pos = center(15, 5);

        let events = tick(&mut state, &idle());
        assert_eq!(events, vec![GameEvent::PelletEaten, GameEvent::LifeLost { lives_remaining: 2 }]);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos(), state.grid.player_spawn());
        assert_eq!(state.player.direction(), Direction::Right);
        for (i, adversary) in state.adversaries.iter().enumerate() {
            assert_eq!(adversary.pos(), state.grid.adversary_spawn(i));
        }
    }

    // Eating the last pellet wins on that tick, even with an adversary on top
    #[test]
    fn test_scenario_last_pellet_wins_before_collision() {
        let mut state = playing();
        // Clear every collectible except the pellet at (4,3)
        let mut remaining: Vec<IVec2> = state.grid.pellets().to_vec();
        remaining.extend_from_slice(state.grid.power_pellets());
        for cell in remaining {
            if cell != IVec2::new(4, 3) {
                state.grid.consume_pellet(center(cell.x, cell.y));
                state.collected += 1;
            }
        }
        assert_eq!(state.collected, state.total_collectibles() - 1);

        state.player.motion.pos = center(5, 3) - Vec2::new(14.0, 0.0);
        state.player.motion.direction = Direction::Left;
        state.adversaries[0].motion.pos = center(4, 3);
        state.adversaries[0].motion.direction = Direction::Right;
        let score = state.score;

        let events = tick(&mut state, &idle());
        assert_eq!(events, vec![GameEvent::PelletEaten, GameEvent::Win]);
        assert_eq!(state.phase, GamePhase::Win);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, score + PELLET_SCORE);

        // Further ticks are inert until restart
        let events = tick(&mut state, &idle());
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Win);
    }

    // Frightened adversary during power mode: +200, back to spawn, lives unchanged
    #[test]
    fn test_scenario_eat_frightened_adversary() {
        let mut state = playing();
        park_adversaries(&mut state);
        state.activate_power_mode();

        state.player.motion.pos = center(13, 11);
        state.player.motion.direction = Direction::Right;
        state.adversaries[1].motion.pos = center(13, 11) - Vec2::new(5.0, 0.0);
        let score = state.score;

        let events = tick(&mut state, &idle());
        assert_eq!(events, vec![GameEvent::AdversaryEaten { index: 1 }]);
        assert_eq!(state.score, score + ADVERSARY_SCORE);
        assert_eq!(state.lives, 3);
        assert_eq!(state.adversaries[1].pos(), state.grid.adversary_spawn(1));
        assert!(!state.adversaries[1].frightened);

        // Power mode is still on, so the next tick frightens it again
        tick(&mut state, &idle());
        assert!(state.adversaries[1].frightened);
    }

    #[test]
    fn test_calm_adversary_refrightened_before_collision() {
        let mut state = playing();
        park_adversaries(&mut state);
        state.activate_power_mode();
        state.adversaries[1].frightened = false;
        state.player.motion.pos = center(13, 11);
        state.adversaries[1].motion.pos = center(13, 11);
        state.adversaries[1].motion.direction = Direction::Left;

        let events = tick(&mut state, &idle());
        // Its own update sees power mode and frightens it again
        assert_eq!(events, vec![GameEvent::AdversaryEaten { index: 1 }]);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                direction: Some(Direction::Left),
                ..Default::default()
            },
            TickInput {
                direction: Some(Direction::Up),
                ..Default::default()
            },
        ];

        let mut a = GameState::new(Settings::default()).unwrap();
        let mut b = GameState::new(Settings::default()).unwrap();
        for step in 0..2000 {
            let input = inputs[(step / 300).min(inputs.len() - 1)];
            let ea = tick(&mut a, &input);
            let eb = tick(&mut b, &input);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
