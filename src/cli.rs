//! Command-line interface for the gridduel driver.

use clap::Parser;

/// Gridduel - play a grid game against the CPU or watch two CPUs duel
#[derive(Parser, Debug)]
#[command(name = "gridduel")]
#[command(about = "Two-player grid game in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Board side length
    #[arg(long, default_value = "3")]
    pub size: usize,

    /// Display name for the X player
    #[arg(long, default_value = "Player 1")]
    pub name_x: String,

    /// Display name for the O player
    #[arg(long, default_value = "Player 2")]
    pub name_o: String,

    /// X is CPU-controlled
    #[arg(long)]
    pub cpu_x: bool,

    /// O is CPU-controlled
    #[arg(long)]
    pub cpu_o: bool,

    /// Print raw engine events as JSON lines instead of the board
    #[arg(long)]
    pub json: bool,
}
