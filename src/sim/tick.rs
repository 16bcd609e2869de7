//! Fixed timestep simulation tick
//!
//! Phase order is part of the contract: intents, effects, movement,
//! collisions, restore, round-end check, spawn/despawn. Reordering changes
//! outcomes.

use glam::Vec2;

use super::actor::{Actor, Direction};
use super::collision::detect_collision;
use super::effects;
use super::geometry::Rect;
use super::spawn;
use super::state::{GameState, RoundPhase};
use crate::consts::SCROLL_SPEED;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional intent per player, indexed like `GameState::players`.
    /// Missing entries mean no input.
    pub intents: Vec<Option<Direction>>,
}

impl TickInput {
    pub fn new(intents: Vec<Option<Direction>>) -> Self {
        Self { intents }
    }

    pub fn intent(&self, index: usize) -> Option<Direction> {
        self.intents.get(index).copied().flatten()
    }
}

/// Advance the round by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_over() {
        return;
    }
    state.time_ticks += 1;

    let intents = collect_intents(state, input);
    effects::begin_tick(state);
    move_entities(state, &intents);
    resolve_collisions(state);
    effects::end_tick(state);
    update_round_phase(state);

    spawn::despawn_obstacles(state);
    spawn::expire_idle_items(state);
    spawn::spawn_obstacles(state);
    spawn::spawn_items(state);
    state.scroll = (state.scroll + SCROLL_SPEED) % state.config.height;
}

/// Raw intent per player after controller filtering
fn collect_intents(state: &mut GameState, input: &TickInput) -> Vec<Option<Direction>> {
    state
        .players
        .iter_mut()
        .enumerate()
        .map(|(i, player)| player.make_action(input.intent(i)))
        .collect()
}

fn move_entities(state: &mut GameState, intents: &[Option<Direction>]) {
    for (player, intent) in state.players.iter_mut().zip(intents) {
        if let Some(input) = intent {
            if player.is_alive() {
                player.steer(*input);
            }
        }
    }
    for obstacle in &mut state.obstacles {
        obstacle.advance();
    }
}

/// Per player, in order: bounds, other players, idle items, obstacles
fn resolve_collisions(state: &mut GameState) {
    let (width, height) = (state.config.width, state.config.height);
    let field = Rect::new(0.0, 0.0, width, height);

    for i in 0..state.players.len() {
        // (a) bounds: sides kill, top/bottom clamp
        let player = &mut state.players[i];
        let (x_out, y_out) = player.body.is_out_of_bound(0.0, width - 1.0, 0.0, height - 1.0);
        if x_out {
            player.kill(state.avoided);
        } else if y_out && player.is_alive() {
            let clamped = player.body.bounds().clamped_into(&field);
            player.set_position(clamped);
        }

        // (b) other players: undo the last move, whoever caused it
        for j in 0..state.players.len() {
            if i != j && detect_collision(&state.players[i], &state.players[j]) {
                state.players[i].cancel_action();
            }
        }

        // (c) idle items
        let mut k = 0;
        while k < state.items.len() {
            if detect_collision(&state.players[i], &state.items[k]) {
                let item = state.items.remove(k);
                let activator = state.players[i].id;
                effects::activate(state, item, activator);
            } else {
                k += 1;
            }
        }

        // (d) obstacles
        let avoided = state.avoided;
        let player = &mut state.players[i];
        for obstacle in &mut state.obstacles {
            if detect_collision(&*player, &*obstacle) {
                obstacle.destroy();
                player.hurt(avoided);
            }
        }
    }
}

fn update_round_phase(state: &mut GameState) {
    let now = state.time_ticks;
    match state.phase {
        RoundPhase::Playing => {
            if state
                .config
                .end_rule
                .is_met(state.alive_count(), state.players.len())
            {
                log::info!("Round end flagged at tick {} ({} alive)", now, state.alive_count());
                state.phase = RoundPhase::Ending { since: now };
            }
        }
        RoundPhase::Ending { since } => {
            let grace = state.config.ticks(state.config.end_grace_secs);
            if now.saturating_sub(since) >= grace {
                let avoided = state.avoided;
                for player in state.players.iter_mut().filter(|p| p.is_alive()) {
                    player.latch_score(avoided);
                }
                state.phase = RoundPhase::Over;
                log::info!("Round over at tick {} with {} avoided", now, avoided);
            }
        }
        RoundPhase::Over => {}
    }
}

/// Drive the round with `next_input` until it is over or `max_ticks` pass.
/// Returns the number of ticks run.
pub fn run_round<F>(state: &mut GameState, max_ticks: u64, mut next_input: F) -> u64
where
    F: FnMut(&GameState) -> TickInput,
{
    let mut ticks = 0;
    while !state.is_over() && ticks < max_ticks {
        let input = next_input(state);
        tick(state, &input);
        ticks += 1;
    }
    ticks
}

/// Centre of the player's sprite, used by simple input scripts
pub fn player_center(state: &GameState, index: usize) -> Option<Vec2> {
    state
        .players
        .get(index)
        .map(|p| p.body.anchor() + p.body.size / 2.0)
}
