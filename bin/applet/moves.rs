use crate::io::{Io, Pipe};
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Board, Color, Square};
use lib::rules::Game;
use tokio::io::{empty, stdout};
use tracing::{instrument, warn};

/// Lists the squares a piece may move to.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Moves {
    /// The arrangement of pieces as the placement field of FEN.
    #[clap(short, long, default_value_t)]
    board: Board,

    /// The side to move.
    #[clap(short, long, default_value_t = Color::White)]
    turn: Color,

    /// The square of the piece to move.
    square: Square,
}

impl Moves {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let mut io = Pipe::new(stdout(), empty());
        self.list(&mut io).await
    }

    async fn list<T: Io + Send>(&self, io: &mut T) -> Result<(), Anyhow> {
        let game = Game::new(self.board, self.turn);

        match game.board()[self.square] {
            None => warn!("there is no piece on {}", self.square),
            Some(f) if f.color() != self.turn => warn!("it's not {}'s turn to move", f.color()),
            Some(_) => {}
        }

        let targets: Vec<_> = game
            .legal_targets(self.square)
            .iter()
            .map(Square::to_string)
            .collect();

        io.send(&targets.join(" ")).await?;
        io.flush().await?;
        Ok(())
    }
}
