//! WebAssembly bindings for the connect-N engine.
//!
//! A browser front-end acts as the input source: it forwards clicks to
//! `drop`/`restart` and re-reads `getState` after every call that returned a
//! change.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::{Game, GamePhase};

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game from a JSON config; `"{}"` gives the standard game
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmGame, JsValue> {
        let config = GameConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        let game = Game::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmGame { game })
    }

    /// Drop the current player's token; returns the outcome as JSON, or
    /// `null` when the move was ignored
    #[wasm_bindgen(js_name = drop)]
    pub fn drop_token(&mut self, column: usize) -> String {
        match self.game.drop(column) {
            Some(outcome) => {
                serde_json::to_string(&outcome).unwrap_or_else(|_| "null".to_string())
            }
            None => "null".to_string(),
        }
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.game.to_json().unwrap_or_else(|_| "{}".to_string())
    }

    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> u8 {
        self.game.current_player().id
    }

    #[wasm_bindgen(js_name = legalColumns)]
    pub fn legal_columns(&self) -> Vec<u32> {
        self.game
            .legal_columns()
            .into_iter()
            .map(|column| column as u32)
            .collect()
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    /// Get the winner (if the round was won)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<u8> {
        match self.game.phase() {
            GamePhase::Won { winner } => Some(winner),
            _ => None,
        }
    }

    #[wasm_bindgen(js_name = scoreLine)]
    pub fn score_line(&self) -> String {
        self.game.score_line()
    }
}
