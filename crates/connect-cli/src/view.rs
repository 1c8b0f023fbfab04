//! Observers that print the game after every change.

use connect_core::{Game, GamePhase, Observer};
use std::io::Write;
use tracing::warn;

/// Render the grid, column labels, scores and status as text
pub fn render(game: &Game) -> String {
    // Wide enough for the largest player id, so labels stay over their cells
    let width = game.players().len().to_string().len();
    let modulus = 10usize.pow(width as u32);
    let labels: Vec<String> = (1..=game.grid().n_columns())
        .map(|column| format!("{:>width$}", column % modulus, width = width))
        .collect();

    let status = match game.phase() {
        GamePhase::InProgress => format!("{} to move", game.current_player()),
        GamePhase::Won { .. } => match game.winner() {
            Some(player) => format!("{} wins! (r to restart)", player),
            None => "round won".to_string(),
        },
        GamePhase::Drawn => "draw! (r to restart)".to_string(),
    };

    format!(
        "{}\n{}score: {}\n{}\n",
        labels.join(" "),
        game.grid().render(width),
        game.score_line(),
        status
    )
}

/// Writes a text rendering of the game to `out`
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Observer for TerminalView<W> {
    fn on_update(&mut self, game: &Game) {
        let frame = render(game);
        if let Err(e) = writeln!(self.out, "{}", frame).and_then(|_| self.out.flush()) {
            warn!("Failed to draw game: {}", e);
        }
    }
}

/// Writes one JSON snapshot per line, for scripted front-ends
pub struct JsonView<W: Write> {
    out: W,
}

impl<W: Write> JsonView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Observer for JsonView<W> {
    fn on_update(&mut self, game: &Game) {
        let result = match game.to_json() {
            Ok(json) => writeln!(self.out, "{}", json).and_then(|_| self.out.flush()),
            Err(e) => {
                warn!("Failed to serialize game: {}", e);
                return;
            }
        };
        if let Err(e) = result {
            warn!("Failed to write snapshot: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_core::{GameConfig, GameSnapshot};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Writer that keeps its bytes readable after being moved into an observer
    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    #[test]
    fn test_render_in_progress() {
        let mut game = Game::new(GameConfig::new(2, 3, 2, 2)).unwrap();
        game.drop(1);

        assert_eq!(
            render(&game),
            "1 2 3\n. . .\n. 1 .\nscore: 0 / 0\nplayer 2 to move\n"
        );
    }

    #[test]
    fn test_render_win() {
        let mut game = Game::new(GameConfig::new(2, 3, 2, 2)).unwrap();
        game.drop(0);
        game.drop(2);
        game.drop(1);

        let frame = render(&game);
        assert!(frame.contains("score: 1 / 0"));
        assert!(frame.ends_with("player 1 wins! (r to restart)\n"));
    }

    #[test]
    fn test_render_aligns_two_digit_ids() {
        let mut game = Game::new(GameConfig::new(2, 6, 2, 12)).unwrap();

        // Players 1 to 11 each drop one token, so nobody connects
        for column in [0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4] {
            game.drop(column).unwrap();
        }

        let frame = render(&game);
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines[0], " 1  2  3  4  5  6");
        assert_eq!(lines[1], " 7  8  9 10 11  .");
        assert_eq!(lines[2], " 1  2  3  4  5  6");
        assert_eq!(lines[4], "player 12 to move");
        assert!(lines.iter().take(3).all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_terminal_view_draws_on_every_change() {
        let buffer = SharedBuffer::default();
        let mut game = Game::standard();
        game.attach(TerminalView::new(buffer.clone()));

        game.drop(0);
        game.restart();

        assert_eq!(buffer.contents().matches("score: 0 / 0").count(), 2);
    }

    #[test]
    fn test_json_view_writes_snapshots() {
        let buffer = SharedBuffer::default();
        let mut game = Game::standard();
        game.attach(JsonView::new(buffer.clone()));

        game.drop(3);

        let contents = buffer.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        let snapshot = GameSnapshot::from_json(lines[0]).unwrap();
        assert_eq!(snapshot, game.snapshot());
    }
}
