//! Contestants: the human move path and CPU move selection/scheduling.

use crate::board::Board;
use crate::error::MoveError;
use crate::types::Symbol;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Simulated thinking time bounds for CPU moves, in milliseconds.
const THINK_TIME_MS: Range<u64> = 1000..3000;

/// Configuration for one contestant, supplied by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// The mark this player places.
    pub symbol: Symbol,
    /// Whether moves come from the CPU scheduler instead of `submit_move`.
    pub is_cpu: bool,
    /// Display name, carried opaquely for the presentation layer.
    pub display_name: Option<String>,
}

/// A CPU move en route to the controller.
///
/// Captures the game generation at scheduling time so the controller can
/// discard deliveries that outlive their game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuDelivery {
    /// Generation of the game this move was chosen for.
    pub generation: u64,
    /// Target cell, empty at selection time.
    pub cell_index: usize,
    /// The scheduling player's mark.
    pub symbol: Symbol,
}

/// One contestant, bound to a symbol for the lifetime of a game.
#[derive(Debug)]
pub struct Player {
    symbol: Symbol,
    is_cpu: bool,
    display_name: Option<String>,
    rng: ChaCha8Rng,
    think_time: Range<u64>,
}

impl Player {
    /// Builds a player from its configuration with an entropy-seeded RNG.
    pub fn from_config(config: PlayerConfig) -> Self {
        Self {
            symbol: config.symbol,
            is_cpu: config.is_cpu,
            display_name: config.display_name,
            rng: ChaCha8Rng::from_entropy(),
            think_time: THINK_TIME_MS,
        }
    }

    /// Reseeds the RNG for deterministic move selection.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Overrides the simulated thinking time range, in milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty.
    #[must_use]
    pub fn with_think_time(mut self, think_time: Range<u64>) -> Self {
        assert!(!think_time.is_empty(), "thinking time range must be non-empty");
        self.think_time = think_time;
        self
    }

    /// The mark this player places. Immutable for the player's lifetime.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Whether this player's moves are scheduled rather than submitted.
    pub fn is_cpu(&self) -> bool {
        self.is_cpu
    }

    /// Display name, if the presentation layer supplied one.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Human inbound path: validates and applies a move through the board's
    /// single mutation point.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` or `CellOccupied`; both leave the board unchanged
    /// so the caller can re-prompt.
    #[instrument(skip(self, board), fields(symbol = %self.symbol))]
    pub fn request_move(&self, board: &mut Board, cell_index: usize) -> Result<(), MoveError> {
        board.place_symbol(cell_index, self.symbol)
    }

    /// CPU path: picks a random empty cell now, then delivers it after a
    /// simulated thinking delay.
    ///
    /// The caller guarantees the board is not full. Exactly one delivery is
    /// sent per call; a closed channel drops it silently.
    #[instrument(skip(self, board, deliveries), fields(symbol = %self.symbol))]
    pub fn schedule_move(
        &mut self,
        board: &Board,
        generation: u64,
        deliveries: mpsc::UnboundedSender<CpuDelivery>,
    ) {
        debug_assert!(!board.is_full(), "CPU move scheduled on a full board");

        let cell_index = self.choose_empty_cell(board);
        let delay = Duration::from_millis(self.rng.gen_range(self.think_time.clone()));
        let delivery = CpuDelivery {
            generation,
            cell_index,
            symbol: self.symbol,
        };

        debug!(
            cell_index,
            delay_ms = delay.as_millis() as u64,
            generation,
            "scheduled cpu move"
        );

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = deliveries.send(delivery);
        });
    }

    /// Uniformly random empty cell by reject-and-resample over the whole
    /// index range. Terminates because the board is not full.
    fn choose_empty_cell(&mut self, board: &Board) -> usize {
        let cell_count = board.size() * board.size();
        loop {
            let candidate = self.rng.gen_range(0..cell_count);
            if board.is_empty(candidate) {
                return candidate;
            }
        }
    }
}
