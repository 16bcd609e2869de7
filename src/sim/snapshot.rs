//! Draw-ready view of the round
//!
//! The renderer gets positions, sprite states and rotations in back-to-front
//! order and nothing else.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::item::ItemKind;
use super::state::GameState;

/// Which sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Player { skin: u8, alive: bool },
    Obstacle { destroyed: bool },
    Item(ItemKind),
}

/// A single sprite draw request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub sprite: Sprite,
    /// Top-left corner
    pub pos: Vec2,
    /// Degrees
    pub rotation: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawList {
    /// Vertical background scroll offset
    pub background_offset: f32,
    /// Back to front: idle items, obstacles, players
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn from_state(state: &GameState) -> Self {
        let mut commands = Vec::with_capacity(
            state.items.len() + state.obstacles.len() + state.players.len(),
        );
        commands.extend(state.items.iter().map(|item| DrawCommand {
            sprite: Sprite::Item(item.kind),
            pos: item.body.anchor(),
            rotation: item.body.rotation,
        }));
        commands.extend(state.obstacles.iter().map(|obstacle| DrawCommand {
            sprite: Sprite::Obstacle {
                destroyed: obstacle.destroyed,
            },
            pos: obstacle.body.anchor(),
            rotation: obstacle.body.rotation,
        }));
        commands.extend(state.players.iter().map(|player| DrawCommand {
            sprite: Sprite::Player {
                skin: player.skin,
                alive: player.is_alive(),
            },
            pos: player.body.anchor(),
            rotation: player.body.rotation,
        }));
        Self {
            background_offset: state.scroll,
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RoundConfig;
    use crate::sim::item::Item;
    use crate::sim::obstacle::Obstacle;

    #[test]
    fn test_draw_order() {
        let mut state = GameState::new(RoundConfig::with_players(2));
        let mut obstacle = Obstacle::new(1, Vec2::new(10.0, 20.0), 3.0, 0.0, 0.0);
        obstacle.destroy();
        state.obstacles.push(obstacle);
        state
            .items
            .push(Item::new(2, ItemKind::ExtraLife, Vec2::new(5.0, 5.0), 0, 60.0));
        state.players[1].kill(0);
        state.scroll = 12.0;

        let list = DrawList::from_state(&state);
        assert_eq!(list.background_offset, 12.0);
        let sprites: Vec<Sprite> = list.commands.iter().map(|c| c.sprite).collect();
        assert_eq!(
            sprites,
            vec![
                Sprite::Item(ItemKind::ExtraLife),
                Sprite::Obstacle { destroyed: true },
                Sprite::Player { skin: 1, alive: true },
                Sprite::Player { skin: 2, alive: false },
            ]
        );
        assert_eq!(list.commands[1].pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_activated_items_not_drawn() {
        let mut state = GameState::new(RoundConfig::with_players(1));
        let mut item = Item::new(1, ItemKind::Slow, Vec2::ZERO, 0, 60.0);
        item.activate(1, 0);
        state.active_items.push(item);
        let list = DrawList::from_state(&state);
        assert_eq!(list.commands.len(), 1);
    }
}
