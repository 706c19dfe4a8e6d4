//! Terminal driver for the gridduel engine.
//!
//! Renders the board after each applied move, reads human moves from stdin,
//! and pumps CPU deliveries back into the controller.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use gridduel::{GameController, GameEvent, GameStatus, PlayerConfig, Symbol};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let configs = [
        PlayerConfig {
            symbol: Symbol::X,
            is_cpu: cli.cpu_x,
            display_name: Some(cli.name_x.clone()),
        },
        PlayerConfig {
            symbol: Symbol::O,
            is_cpu: cli.cpu_o,
            display_name: Some(cli.name_o.clone()),
        },
    ];

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (mut controller, mut delivery_rx) = GameController::new(cli.size, configs, event_tx);

    if !cli.json {
        println!("{}", controller.board().display());
    }
    prompt_if_human(&cli, &controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            delivery = delivery_rx.recv() => {
                let Some(delivery) = delivery else { break };
                if let Err(error) = controller.apply_cpu_delivery(delivery) {
                    debug!(%error, "dropped cpu delivery");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                handle_input(&mut controller, line.trim());
            }
        }

        while let Ok(event) = event_rx.try_recv() {
            render(&cli, &controller, &event);
            if let GameEvent::GameOver { .. } = event {
                return Ok(());
            }
        }
        prompt_if_human(&cli, &controller);
    }

    Ok(())
}

fn handle_input(controller: &mut GameController, input: &str) {
    if input.is_empty() {
        return;
    }
    match input.parse::<usize>() {
        Ok(index) => {
            if let Err(error) = controller.submit_move(index) {
                println!("Rejected: {error}");
            }
        }
        Err(_) => {
            let last = controller.board().size() * controller.board().size() - 1;
            println!("Enter the index of an empty cell (0-{last})");
        }
    }
}

fn render(cli: &Cli, controller: &GameController, event: &GameEvent) {
    if cli.json {
        if let Ok(line) = serde_json::to_string(event) {
            println!("{line}");
        }
        return;
    }
    match event {
        GameEvent::MoveApplied { cell_index, symbol } => {
            println!("\n{symbol} -> cell {cell_index}");
            println!("{}", controller.board().display());
        }
        GameEvent::GameOver { winner } => match winner {
            Some(symbol) => println!("{} wins! Congratulations!", player_name(controller, *symbol)),
            None => println!("It's a draw."),
        },
    }
}

fn player_name(controller: &GameController, symbol: Symbol) -> String {
    for index in 0..2 {
        let player = controller.player(index);
        if player.symbol() == symbol {
            if let Some(name) = player.display_name() {
                return name.to_string();
            }
        }
    }
    symbol.to_string()
}

fn prompt_if_human(cli: &Cli, controller: &GameController) {
    if cli.json {
        return;
    }
    if controller.status() == GameStatus::InProgress && !controller.current_player().is_cpu() {
        println!(
            "{} to move - enter a cell index:",
            controller.current_player().symbol()
        );
    }
}
