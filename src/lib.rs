//! Two-player grid game engine with human and CPU contestants.
//!
//! # Architecture
//!
//! - **Board**: owns the grid of cells behind a single mutation point
//! - **Rules**: pure win/draw detection over board lines
//! - **Player**: a contestant bound to a symbol; CPU players pick a
//!   uniformly random legal move after a simulated thinking delay
//! - **Controller**: turn sequencing, outcome transitions, and invalidation
//!   of CPU moves that outlive their game
//!
//! The engine pushes [`GameEvent`]s to the presentation layer over a tokio
//! channel and accepts human moves through
//! [`GameController::submit_move`]; CPU moves come back on a delivery
//! channel the embedder pumps into
//! [`GameController::apply_cpu_delivery`].
//!
//! # Example
//!
//! ```
//! use gridduel::{GameController, PlayerConfig, Symbol};
//! use tokio::sync::mpsc;
//!
//! let (event_tx, _event_rx) = mpsc::unbounded_channel();
//! let configs = [
//!     PlayerConfig { symbol: Symbol::X, is_cpu: false, display_name: None },
//!     PlayerConfig { symbol: Symbol::O, is_cpu: false, display_name: None },
//! ];
//! let (mut controller, _deliveries) = GameController::new(3, configs, event_tx);
//! controller.submit_move(4).unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod controller;
mod error;
mod player;
mod rules;
mod types;

pub use board::{Board, Diagonal};
pub use controller::{GameController, GameEvent, GameStatus};
pub use error::MoveError;
pub use player::{CpuDelivery, Player, PlayerConfig};
pub use rules::{find_winner, is_draw};
pub use types::{Cell, Symbol};
