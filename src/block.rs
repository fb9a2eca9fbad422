use crate::error::{GameLogError, GameLogResult};
use crate::{Color, GameLog, MoveRecord, Outcome, Player, END_MARKER, WON_FLAG};

/// The blank-line separated sections of a game log, in file order.
/// Any section after the result block is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Header,
    Roster,
    Moves,
    Result,
    Trailing,
}

impl Block {
    /// the block that follows a blank separator row
    pub fn next(self) -> Block {
        match self {
            Block::Header => Block::Roster,
            Block::Roster => Block::Moves,
            Block::Moves => Block::Result,
            Block::Result | Block::Trailing => Block::Trailing,
        }
    }
}

/// How the won flags of the result block turn into an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultPolicy {
    /// First row is the first player, second row the second player;
    /// both flagged is a draw. Stops after the second row.
    #[default]
    DrawOnBoth,
    /// The first flagged row wins, whatever follows.
    FirstFlag,
}

impl std::str::FromStr for ResultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draw-on-both" => Ok(ResultPolicy::DrawOnBoth),
            "first-flag" => Ok(ResultPolicy::FirstFlag),
            other => Err(format!("unknown result policy: {}", other)),
        }
    }
}

/// Tells the reader whether more rows are wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Row-by-row parser of one game log.
#[derive(Debug, Clone)]
pub struct BlockParser {
    block: Block,
    expect_header: bool,
    policy: ResultPolicy,
    result_rows: usize,
    winner: Option<usize>,
    draw: bool,
    players: Vec<Player>,
    black_moves: Vec<MoveRecord>,
    white_moves: Vec<MoveRecord>,
}

impl BlockParser {
    pub fn new(policy: ResultPolicy) -> BlockParser {
        BlockParser {
            block: Block::Header,
            expect_header: true,
            policy,
            result_rows: 0,
            winner: None,
            draw: false,
            players: Vec::with_capacity(2),
            black_moves: Vec::with_capacity(128),
            white_moves: Vec::with_capacity(128),
        }
    }

    pub fn block(&self) -> Block {
        self.block
    }

    /// Feeds one row; `line` is 1-based and only used for error reporting.
    /// An empty `fields` slice is a blank row.
    pub fn feed(&mut self, line: usize, fields: &[&str]) -> GameLogResult<Flow> {
        if self.expect_header {
            self.expect_header = false;
            return Ok(Flow::Continue);
        }
        if fields.is_empty() {
            self.block = self.block.next();
            self.expect_header = true;
            return Ok(Flow::Continue);
        }
        match self.block {
            Block::Header | Block::Trailing => Ok(Flow::Continue),
            Block::Roster => self.on_roster(line, fields),
            Block::Moves => self.on_move(line, fields),
            Block::Result => self.on_result(line, fields),
        }
    }

    fn on_roster(&mut self, line: usize, fields: &[&str]) -> GameLogResult<Flow> {
        let color = Color::from_flag(field(line, fields, 0)?);
        let seed = number(line, fields, 1)?;
        let name = field(line, fields, 2)?.to_string();
        self.players.push(Player { color, seed, name });
        Ok(Flow::Continue)
    }

    fn on_move(&mut self, line: usize, fields: &[&str]) -> GameLogResult<Flow> {
        if field(line, fields, 0)? == END_MARKER {
            return Ok(Flow::Continue);
        }
        let color = Color::from_flag(field(line, fields, 1)?);
        let record = MoveRecord {
            remaining_time: number(line, fields, 2)?,
            time_per_move: number(line, fields, 6)?,
        };
        match color {
            Color::Black => self.black_moves.push(record),
            Color::White => self.white_moves.push(record),
        }
        Ok(Flow::Continue)
    }

    fn on_result(&mut self, line: usize, fields: &[&str]) -> GameLogResult<Flow> {
        let row = self.result_rows;
        self.result_rows += 1;
        let won = field(line, fields, 4)? == WON_FLAG;
        match self.policy {
            ResultPolicy::DrawOnBoth => {
                if row == 0 {
                    if won {
                        self.winner = Some(0);
                    }
                    Ok(Flow::Continue)
                } else {
                    if won {
                        if self.winner.is_none() {
                            self.winner = Some(1);
                        } else {
                            self.winner = None;
                            self.draw = true;
                        }
                    }
                    Ok(Flow::Stop)
                }
            }
            ResultPolicy::FirstFlag => {
                if won {
                    self.winner = Some(row);
                    Ok(Flow::Stop)
                } else {
                    Ok(Flow::Continue)
                }
            }
        }
    }

    /// Closes the parse; an undecided result block is a draw.
    pub fn finish(self) -> GameLogResult<GameLog> {
        let outcome = match self.winner {
            Some(index) if !self.draw => {
                if index >= self.players.len() {
                    return Err(GameLogError::UnknownWinner(index));
                }
                Outcome::Winner(index)
            }
            _ => Outcome::Draw,
        };
        Ok(GameLog {
            players: self.players,
            black_moves: self.black_moves,
            white_moves: self.white_moves,
            outcome,
        })
    }
}

fn field<'a>(line: usize, fields: &[&'a str], index: usize) -> GameLogResult<&'a str> {
    fields
        .get(index)
        .copied()
        .ok_or(GameLogError::MissingField { line, index })
}

fn number(line: usize, fields: &[&str], index: usize) -> GameLogResult<i64> {
    let raw = field(line, fields, index)?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| GameLogError::InvalidNumber {
            line,
            index,
            value: raw.to_string(),
        })
}
