//! Timed item effects on the player set
//!
//! Each tick runs `begin_tick` before movement and `end_tick` after
//! collisions. Between the two, transient effects are visible on the players;
//! `end_tick` puts every backed-up field back. One-shot effects change fields
//! outside the backup, so `Item::apply` runs them only once.

use super::item::Item;
use super::player::Player;
use super::state::GameState;

/// Move an idle item into the activated list on behalf of `activator`
pub fn activate(state: &mut GameState, mut item: Item, activator: u8) {
    item.activate(activator, state.time_ticks);
    state.active_items.push(item);
}

/// Back up players, drop expired effects, then run the rest in activation
/// order on the current player snapshot
pub fn begin_tick(state: &mut GameState) {
    let now = state.time_ticks;
    backup_players(&mut state.players);

    state.active_items.retain(|item| {
        let expired = item.times_up(now);
        if expired {
            log::debug!("Item {} ({:?}) effect expired", item.id, item.kind);
        }
        !expired
    });

    for item in &mut state.active_items {
        item.apply(&mut state.players, now);
    }
}

/// Undo this tick's transient overrides
pub fn end_tick(state: &mut GameState) {
    for player in &mut state.players {
        player.restore();
    }
}

fn backup_players(players: &mut [Player]) {
    for player in players {
        player.backup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::RoundConfig;
    use crate::sim::actor::Direction;
    use crate::sim::item::ItemKind;
    use crate::sim::player::KeyBindings;
    use glam::Vec2;

    fn state(players: u8) -> GameState {
        GameState::new(RoundConfig::with_players(players))
    }

    fn item(state: &mut GameState, kind: ItemKind) -> Item {
        let id = state.next_entity_id();
        Item::new(id, kind, Vec2::ZERO, state.time_ticks, state.config.tick_rate)
    }

    #[test]
    fn test_slow_visible_until_restore() {
        let mut state = state(3);
        let slow = item(&mut state, ItemKind::Slow);
        activate(&mut state, slow, 1);

        state.time_ticks += 1;
        begin_tick(&mut state);
        assert_eq!(state.players[0].speed(), PLAYER_SPEED);
        assert_eq!(state.players[1].speed(), PLAYER_SPEED / 2.0);
        assert_eq!(state.players[2].speed(), PLAYER_SPEED / 2.0);

        end_tick(&mut state);
        assert!(state.players.iter().all(|p| p.speed() == PLAYER_SPEED));
    }

    #[test]
    fn test_slow_does_not_compound_across_ticks() {
        let mut state = state(2);
        let slow = item(&mut state, ItemKind::Slow);
        activate(&mut state, slow, 1);
        for _ in 0..10 {
            state.time_ticks += 1;
            begin_tick(&mut state);
            assert_eq!(state.players[1].speed(), PLAYER_SPEED / 2.0);
            end_tick(&mut state);
        }
    }

    #[test]
    fn test_two_slows_compose() {
        let mut state = state(2);
        let a = item(&mut state, ItemKind::Slow);
        let b = item(&mut state, ItemKind::Slow);
        activate(&mut state, a, 1);
        activate(&mut state, b, 1);
        state.time_ticks += 1;
        begin_tick(&mut state);
        assert_eq!(state.players[1].speed(), PLAYER_SPEED / 4.0);
        end_tick(&mut state);
        assert_eq!(state.players[1].speed(), PLAYER_SPEED);
    }

    #[test]
    fn test_extra_life_once_over_lifetime() {
        let mut state = state(2);
        let life = item(&mut state, ItemKind::ExtraLife);
        activate(&mut state, life, 2);
        let duration = state.active_items[0].duration_ticks;
        for _ in 0..duration + 5 {
            state.time_ticks += 1;
            begin_tick(&mut state);
            end_tick(&mut state);
        }
        assert_eq!(state.players[1].lives, PLAYER_LIVES + 1);
        assert_eq!(state.players[0].lives, PLAYER_LIVES);
        assert!(state.active_items.is_empty());
    }

    #[test]
    fn test_invert_restores_original_bindings() {
        let mut state = state(2);
        let invert = item(&mut state, ItemKind::InvertControls);
        activate(&mut state, invert, 1);
        for _ in 0..3 {
            state.time_ticks += 1;
            begin_tick(&mut state);
            let live = state.players[0].bindings().copied().unwrap();
            assert_eq!(live.up, Direction::South);
            end_tick(&mut state);
            assert_eq!(state.players[0].bindings(), Some(&KeyBindings::default()));
        }
    }

    #[test]
    fn test_expiry_removes_from_activated_list() {
        let mut state = state(2);
        let slow = item(&mut state, ItemKind::Slow);
        activate(&mut state, slow, 1);
        let duration = state.active_items[0].duration_ticks;

        // Last applied tick
        state.time_ticks += duration;
        begin_tick(&mut state);
        assert_eq!(state.active_items.len(), 1);
        assert_eq!(state.players[1].speed(), PLAYER_SPEED / 2.0);
        end_tick(&mut state);

        state.time_ticks += 1;
        begin_tick(&mut state);
        assert!(state.active_items.is_empty());
        assert_eq!(state.players[1].speed(), PLAYER_SPEED);
        end_tick(&mut state);
    }

    #[test]
    fn test_slow_leaves_dead_player_idle() {
        let mut state = state(2);
        state.players[1].kill(0);
        let slow = item(&mut state, ItemKind::Slow);
        activate(&mut state, slow, 1);
        for _ in 0..5 {
            state.time_ticks += 1;
            begin_tick(&mut state);
            end_tick(&mut state);
            assert_eq!(state.players[1].speed(), PLAYER_IDLE_SPEED);
        }
    }

    #[test]
    fn test_extra_life_at_one_tick_per_second() {
        let mut config = RoundConfig::with_players(2);
        config.tick_rate = 1.0;
        let mut state = GameState::new(config);
        let life = item(&mut state, ItemKind::ExtraLife);
        assert_eq!(life.duration_ticks, 1);
        activate(&mut state, life, 1);
        for _ in 0..5 {
            state.time_ticks += 1;
            begin_tick(&mut state);
            end_tick(&mut state);
        }
        assert_eq!(state.players[0].lives, PLAYER_LIVES + 1);
        assert!(state.active_items.is_empty());
    }

    #[test]
    fn test_expiry_keeps_order_of_survivors() {
        let mut state = state(2);
        let life = item(&mut state, ItemKind::ExtraLife);
        let slow = item(&mut state, ItemKind::Slow);
        let invert = item(&mut state, ItemKind::InvertControls);
        let ids = [slow.id, invert.id];
        activate(&mut state, life, 1);
        activate(&mut state, slow, 1);
        activate(&mut state, invert, 2);

        // Past the 1 s life item, inside the 5 s others
        state.time_ticks += 61;
        begin_tick(&mut state);
        let left: Vec<u32> = state.active_items.iter().map(|i| i.id).collect();
        assert_eq!(left, ids);
        end_tick(&mut state);
    }
}
