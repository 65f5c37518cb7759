use crate::{config::Config, io::Io, io::Pipe};
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use derive_more::{Display, Error, From};
use lib::chess::{Board, Color, Notation, ParseNotationError, ParseSquareError, Promotion, Square};
use lib::rules::{Game, Move, Rejection};
use std::{str::FromStr, time::Duration};
use tokio::io::{stdin, stdout};
use tokio::select;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, instrument, warn};

/// Plays a game of chess by reading moves from the standard input.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The game configuration.
    #[clap(short, long, default_value_t)]
    config: Config,

    /// The initial arrangement of pieces as the placement field of FEN.
    #[clap(short, long, default_value_t)]
    board: Board,

    /// The side to move first.
    #[clap(short, long, default_value_t = Color::White)]
    turn: Color,
}

impl Default for Play {
    fn default() -> Self {
        Play {
            config: Config::default(),
            board: Board::default(),
            turn: Color::White,
        }
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let io = Pipe::new(stdout(), stdin());
        let game = Game::new(self.board, self.turn);
        Session::new(game, self.config, io).run().await
    }
}

/// A line of input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    Quit,
    Board,
    Moves(Square),
    Coords(Square, Square),
    Notation(Notation),
}

#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
enum ParseCommandError {
    #[display(fmt = "invalid square")]
    InvalidSquare(ParseSquareError),

    #[display(fmt = "invalid move")]
    InvalidNotation(ParseNotationError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_whitespace().collect::<Vec<_>>()[..] {
            ["quit"] | ["exit"] => Ok(Command::Quit),
            ["board"] => Ok(Command::Board),
            ["moves", sq] => Ok(Command::Moves(sq.parse()?)),
            [m] if m.is_ascii() && m.len() == 4 => {
                Ok(Command::Coords(m[..2].parse()?, m[2..].parse()?))
            }
            _ => Ok(Command::Notation(s.trim().parse()?)),
        }
    }
}

struct Session<T: Io> {
    game: Game,
    config: Config,
    io: T,
    checks: [bool; 2],
}

impl<T: Io> Session<T> {
    fn new(game: Game, config: Config, io: T) -> Self {
        let checks = [game.is_check(Color::White), game.is_check(Color::Black)];

        Session {
            game,
            config,
            io,
            checks,
        }
    }

    async fn run(&mut self) -> Result<(), Anyhow> {
        self.show().await?;
        self.io.flush().await?;

        let mut refresh = interval(self.config.refresh.max(Duration::from_millis(1)));
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            select! {
                biased;

                line = self.io.recv() => match line.context("failed to read the standard input")? {
                    None => break Ok(()),
                    Some(line) => {
                        if !self.interpret(line.trim()).await? {
                            break Ok(());
                        }
                    }
                },

                _ = refresh.tick() => self.refresh(),
            }

            self.io.flush().await?;
        }
    }

    /// Acts on a line of input and returns whether the session should go on.
    async fn interpret(&mut self, line: &str) -> Result<bool, Anyhow> {
        if line.is_empty() {
            return Ok(true);
        }

        if let Some((side, square)) = self.game.pending_promotion() {
            match line.parse() {
                Ok(p) => self.promote(side, square, p).await?,
                Err(e) => {
                    warn!("{:?}", Anyhow::new(e));
                    self.ask(square).await?;
                }
            }

            return Ok(true);
        }

        match line.parse() {
            Err(e) => warn!("{:?}", Anyhow::new(e).context(format!("ignored '{line}'"))),
            Ok(Command::Quit) => return Ok(false),
            Ok(Command::Board) => self.show().await?,
            Ok(Command::Moves(whence)) => {
                let targets = self.game.legal_targets(whence);
                let targets: Vec<_> = targets.iter().map(Square::to_string).collect();
                self.io.send(&targets.join(" ")).await?;
            }

            Ok(Command::Coords(whence, whither)) => {
                let result = self.game.request_move(whence, whither);
                self.conclude(result).await?;
            }

            Ok(Command::Notation(n)) => {
                let result = self.game.request_notation(&n);
                self.conclude(result).await?;
            }
        }

        Ok(true)
    }

    async fn conclude(&mut self, result: Result<Move, Rejection>) -> Result<(), Anyhow> {
        let m = match result {
            Ok(m) => m,
            Err(e) => {
                warn!("{e}");
                return Ok(());
            }
        };

        info!(%m, piece = %m.piece(), captured = ?m.captured().map(|p| p.to_string()));
        self.refresh();

        match (self.game.pending_promotion(), self.config.promotion) {
            (Some((side, square)), Some(p)) => self.promote(side, square, p).await,
            (Some((_, square)), None) => {
                self.show().await?;
                self.ask(square).await
            }

            (None, _) => self.show().await,
        }
    }

    async fn promote(&mut self, side: Color, square: Square, p: Promotion) -> Result<(), Anyhow> {
        let piece = self
            .game
            .promote(side, square, p)
            .context("failed to promote pawn")?;

        info!(%square, %piece, "promoted");
        self.refresh();
        self.show().await
    }

    async fn ask(&mut self, square: Square) -> Result<(), Anyhow> {
        let msg = format!("promote the pawn on {square} to? [q/r/b/n]");
        self.io.send(&msg).await?;
        Ok(())
    }

    async fn show(&mut self) -> Result<(), Anyhow> {
        let turn = self.game.turn();
        let diagram = self.game.board().diagram().to_string();
        self.io.send(&diagram).await?;

        if self.game.is_check(turn) {
            self.io.send(&format!("{turn} to move, in check")).await?;
        } else {
            self.io.send(&format!("{turn} to move")).await?;
        }

        Ok(())
    }

    /// Recomputes the check flags and reports any change.
    fn refresh(&mut self) {
        self.game.refresh();

        for side in Color::iter() {
            let check = self.game.is_check(side);
            if check != self.checks[side.index()] {
                self.checks[side.index()] = check;
                if check {
                    info!(%side, "in check");
                } else {
                    info!(%side, "no longer in check");
                }
            }
        }
    }
}
