//! Fixed-tick simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only, time is the tick counter
//! - Seeded RNG only
//! - No rendering, input-device or platform dependencies

pub mod actor;
pub mod collision;
pub mod effects;
pub mod geometry;
pub mod item;
pub mod obstacle;
pub mod player;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use actor::{Actor, Body, Direction};
pub use collision::detect_collision;
pub use geometry::{HitboxSet, Rect};
pub use item::{Item, ItemKind, Persistence};
pub use obstacle::Obstacle;
pub use player::{Controller, KeyBindings, Player};
pub use snapshot::{DrawCommand, DrawList, Sprite};
pub use spawn::SpawnController;
pub use state::{GameState, RoundPhase};
pub use tick::{TickInput, run_round, tick};
