//! Turn sequencing, outcome transitions, and CPU scheduling.

use crate::board::Board;
use crate::error::MoveError;
use crate::player::{CpuDelivery, Player, PlayerConfig};
use crate::rules::find_winner;
use crate::types::Symbol;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Where the game stands. Owned exclusively by the controller.
///
/// `InProgress` holds exactly while the board has no winning line and is not
/// full; `Won` and `Draw` are terminal until the next game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are being accepted.
    InProgress,
    /// A line was completed by the given symbol.
    Won(Symbol),
    /// The board filled with no line.
    Draw,
}

/// Notifications pushed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A symbol landed on a cell; redraw that one cell.
    MoveApplied {
        /// Linear index of the updated cell.
        cell_index: usize,
        /// The symbol now occupying it.
        symbol: Symbol,
    },
    /// The game reached a terminal state. Fired exactly once per game.
    GameOver {
        /// The winning symbol, or `None` for a draw.
        winner: Option<Symbol>,
    },
}

/// Orchestrates turn order between two players over one board.
///
/// The controller is the exclusive owner of the board and the game status;
/// every accepted move funnels through [`Board::place_symbol`] and the shared
/// after-move tail. Human moves arrive through
/// [`submit_move`](Self::submit_move); CPU moves are scheduled on a tokio
/// timer and come back through the delivery channel handed out by
/// [`new`](Self::new), tagged with the game generation that scheduled them.
#[derive(Debug)]
pub struct GameController {
    board: Board,
    players: [Player; 2],
    turn: usize,
    status: GameStatus,
    generation: u64,
    events: mpsc::UnboundedSender<GameEvent>,
    deliveries: mpsc::UnboundedSender<CpuDelivery>,
}

impl GameController {
    /// Creates a controller and starts the first game.
    ///
    /// Returns the controller together with the receiving half of the CPU
    /// delivery channel; the embedder pumps received deliveries back into
    /// [`apply_cpu_delivery`](Self::apply_cpu_delivery). CPU thinking delays
    /// run on the ambient tokio runtime, so a controller with a CPU player
    /// must be created inside one.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or the two configs share a symbol.
    #[instrument(skip(events))]
    pub fn new(
        size: usize,
        configs: [PlayerConfig; 2],
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> (Self, mpsc::UnboundedReceiver<CpuDelivery>) {
        let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();
        let mut controller = Self {
            board: Board::new(size),
            players: Self::build_players(configs),
            turn: 0,
            status: GameStatus::InProgress,
            generation: 0,
            events,
            deliveries: delivery_tx,
        };
        info!(size, generation = controller.generation, "game started");
        controller.kick_off();
        (controller, delivery_rx)
    }

    /// Resets the board and begins a fresh game with the given players.
    ///
    /// Any CPU move still pending from the previous game is invalidated: its
    /// delivery carries the old generation and is dropped on arrival.
    ///
    /// # Panics
    ///
    /// Panics if the two configs share a symbol.
    #[instrument(skip(self))]
    pub fn start_new_game(&mut self, configs: [PlayerConfig; 2]) {
        self.generation += 1;
        self.board.reset();
        self.players = Self::build_players(configs);
        self.turn = 0;
        self.status = GameStatus::InProgress;
        info!(generation = self.generation, "new game started");
        self.kick_off();
    }

    /// Inbound move from the presentation layer for the current human player.
    ///
    /// # Errors
    ///
    /// `GameAlreadyOver` in a terminal state, `WrongPlayer` while a CPU move
    /// is pending, `OutOfRange`/`CellOccupied` for invalid targets. The board
    /// and turn are unchanged on every error.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, cell_index: usize) -> Result<(), MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameAlreadyOver);
        }
        let turn = self.turn;
        if self.players[turn].is_cpu() {
            return Err(MoveError::WrongPlayer(self.players[turn].symbol()));
        }

        self.players[turn].request_move(&mut self.board, cell_index)?;
        let symbol = self.players[turn].symbol();
        self.move_applied(cell_index, symbol);
        Ok(())
    }

    /// Applies a CPU move that finished its thinking delay.
    ///
    /// The target was empty at selection time; it is still re-checked through
    /// the board's mutation point, since a reset could have intervened.
    ///
    /// # Errors
    ///
    /// `StaleDelivery` for a superseded generation or a mismatched turn,
    /// `GameAlreadyOver` after a terminal state, `OutOfRange`/`CellOccupied`
    /// if the target is no longer available. Callers treat all of these as
    /// a dropped delivery, not a fault.
    #[instrument(skip(self))]
    pub fn apply_cpu_delivery(&mut self, delivery: CpuDelivery) -> Result<(), MoveError> {
        if delivery.generation != self.generation {
            debug!(
                delivery.generation,
                current = self.generation,
                "dropping stale cpu delivery"
            );
            return Err(MoveError::StaleDelivery);
        }
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameAlreadyOver);
        }
        let turn = self.turn;
        if !self.players[turn].is_cpu() || self.players[turn].symbol() != delivery.symbol {
            warn!(?delivery, "cpu delivery does not match the current turn");
            return Err(MoveError::StaleDelivery);
        }

        self.board.place_symbol(delivery.cell_index, delivery.symbol)?;
        self.move_applied(delivery.cell_index, delivery.symbol);
        Ok(())
    }

    /// Current game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Read access to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Index of the player whose turn it is (0 or 1).
    pub fn current_turn_index(&self) -> usize {
        self.turn
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.turn]
    }

    /// One of the two players. `index` must be 0 or 1.
    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    /// Generation counter of the current game.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn build_players(configs: [PlayerConfig; 2]) -> [Player; 2] {
        assert_ne!(
            configs[0].symbol, configs[1].symbol,
            "players must use distinct symbols"
        );
        configs.map(Player::from_config)
    }

    /// Schedules the opening move when the starting player is a CPU.
    fn kick_off(&mut self) {
        if self.players[self.turn].is_cpu() {
            self.schedule_current_cpu();
        }
    }

    fn schedule_current_cpu(&mut self) {
        let generation = self.generation;
        let deliveries = self.deliveries.clone();
        let turn = self.turn;
        self.players[turn].schedule_move(&self.board, generation, deliveries);
    }

    /// Shared tail of both move paths: notify, detect the outcome, then
    /// either end the game or hand the turn over.
    fn move_applied(&mut self, cell_index: usize, symbol: Symbol) {
        let _ = self.events.send(GameEvent::MoveApplied { cell_index, symbol });

        if let Some(winner) = find_winner(&self.board) {
            self.status = GameStatus::Won(winner);
            info!(%winner, "game won");
            let _ = self.events.send(GameEvent::GameOver {
                winner: Some(winner),
            });
            return;
        }
        if self.board.is_full() {
            self.status = GameStatus::Draw;
            info!("game drawn");
            let _ = self.events.send(GameEvent::GameOver { winner: None });
            return;
        }

        self.turn = (self.turn + 1) % 2;
        if self.players[self.turn].is_cpu() {
            self.schedule_current_cpu();
        }
    }
}
