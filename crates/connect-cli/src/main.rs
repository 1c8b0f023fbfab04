//! Terminal front-end for the connect-N engine.

use anyhow::Context;
use connect_core::{Game, GameConfig};
use std::io::{self, BufRead};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod controller;
mod view;

use controller::{CommandError, Controller};
use view::{JsonView, TerminalView};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the board on stdout
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match std::env::var("CONNECT_CONFIG") {
        Ok(path) => GameConfig::load_or_default(Path::new(&path))
            .with_context(|| format!("loading config from {}", path))?,
        Err(_) => GameConfig::default(),
    };

    info!(
        "Starting {}x{} connect-{} for {} players",
        config.n_rows, config.n_columns, config.connect_n, config.n_players
    );

    let mut game = Game::new(config)?;
    match std::env::var("CONNECT_OUTPUT").as_deref() {
        Ok("json") => game.attach(JsonView::new(io::stdout())),
        _ => game.attach(TerminalView::new(io::stdout())),
    };
    game.notify();

    let mut controller = Controller::new(game);
    for line in io::stdin().lock().lines() {
        let line = line?;
        match controller.handle_line(&line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(CommandError::Empty) => {}
            Err(e) => warn!("{}", e),
        }
    }

    info!("Final score: {}", controller.game().score_line());
    Ok(())
}
