//! End-of-round ranking
//!
//! Handed to the results screen, which lives outside this crate.

use serde::{Deserialize, Serialize};

use crate::sim::Player;

/// One line of the results table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub player_id: u8,
    /// Obstacles avoided
    pub score: u32,
    /// Still alive when the round closed
    pub survived: bool,
}

/// Players ordered by descending score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundResult {
    pub entries: Vec<ResultEntry>,
}

impl RoundResult {
    /// Rank players by score, ties broken by player id. Players without a
    /// latched score are credited with `avoided`.
    pub fn from_players(players: &[Player], avoided: u32) -> Self {
        let mut entries: Vec<ResultEntry> = players
            .iter()
            .map(|p| ResultEntry {
                player_id: p.id,
                score: p.score.unwrap_or(avoided),
                survived: p.is_alive(),
            })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.player_id.cmp(&b.player_id)));
        Self { entries }
    }

    /// Top entry
    pub fn winner(&self) -> Option<&ResultEntry> {
        self.entries.first()
    }

    pub fn survivors(&self) -> impl Iterator<Item = &ResultEntry> {
        self.entries.iter().filter(|e| e.survived)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
