use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
pub mod batch;
pub mod block;
pub mod chart;
pub mod discover;
pub mod error;
pub mod plot;

use block::{BlockParser, Flow, ResultPolicy};
use error::{GameLogError, GameLogResult};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const FIELD_DELIMITER: char = ';';
pub const BLACK_CHAR: &str = "0";
pub const WHITE_CHAR: &str = "1";
pub const END_MARKER: &str = "end";
pub const WON_FLAG: &str = "1";

/// remaining time above this value is clamped on the chart
pub const REMAINING_TIME_CEILING: i64 = 120000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// any flag other than the black one is white
    pub fn from_flag(flag: &str) -> Color {
        if flag == BLACK_CHAR {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub color: Color,
    pub seed: i64,
    pub name: String,
}

impl Player {
    /// legend entry, name followed by the seed
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.seed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub remaining_time: i64,
    pub time_per_move: i64,
}

/// Winner holds the index of the winning player in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(usize),
    Draw,
}

/// The main struct for one game: roster, clock usage per color and result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLog {
    pub players: Vec<Player>,
    pub black_moves: Vec<MoveRecord>,
    pub white_moves: Vec<MoveRecord>,
    pub outcome: Outcome,
}

impl GameLog {
    /// Init a GameLog from a semicolon separated log file.
    /// Stops reading as soon as the result block decides the outcome.
    pub fn from_csv(fin: &Path, policy: ResultPolicy) -> GameLogResult<GameLog> {
        let io_err = |source: std::io::Error| GameLogError::Io {
            path: fin.to_path_buf(),
            source,
        };
        let file = File::open(fin).map_err(io_err)?;
        let buf = BufReader::new(file);
        GameLog::from_reader(buf, policy).map_err(|e| match e {
            GameLogError::Io { source, .. } => io_err(source),
            other => other,
        })
    }

    /// same as from_csv for any buffered reader, io errors carry an empty path
    pub fn from_reader<R: BufRead>(buf: R, policy: ResultPolicy) -> GameLogResult<GameLog> {
        let mut parser = BlockParser::new(policy);
        for (i, l) in buf.lines().enumerate() {
            let l = l.map_err(|source| GameLogError::Io {
                path: Default::default(),
                source,
            })?;
            let fields = split_row(&l);
            if parser.feed(i + 1, &fields)? == Flow::Stop {
                debug!("outcome decided at line {}, ignoring the rest", i + 1);
                break;
            }
        }
        debug!("parse finished in block {:?}", parser.block());
        parser.finish()
    }

    pub fn moves(&self, color: Color) -> &[MoveRecord] {
        match color {
            Color::Black => &self.black_moves,
            Color::White => &self.white_moves,
        }
    }

    /// first roster entry playing the given color
    pub fn player(&self, color: Color) -> Option<&Player> {
        self.players.iter().find(|p| p.color == color)
    }

    /// color played by the player with exactly this name
    pub fn color_of(&self, name: &str) -> Option<Color> {
        self.players.iter().find(|p| p.name == name).map(|p| p.color)
    }

    /// one-line outcome for the legend
    pub fn caption(&self) -> String {
        match self.outcome {
            Outcome::Winner(i) => match self.players.get(i) {
                Some(p) => format!("Game won by {}", p.name),
                None => format!("Game won by player {}", i + 1),
            },
            Outcome::Draw => "Game ended in a draw".to_string(),
        }
    }
}

impl std::fmt::Display for GameLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.players.iter().map(|p| p.label()).collect();
        write!(
            f,
            "{}; {} black moves, {} white moves; {}",
            names.join(" vs "),
            self.black_moves.len(),
            self.white_moves.len(),
            self.caption()
        )
    }
}

/// Splits a log line on the field delimiter; a blank line gives no fields.
/// One pair of surrounding double quotes is removed from each field.
/// Delimiters inside quotes and doubled quotes are not handled.
pub fn split_row(line: &str) -> Vec<&str> {
    let line = line.trim_end_matches('\r');
    if line.is_empty() {
        return Vec::new();
    }
    line.split(FIELD_DELIMITER).map(unquote).collect()
}

fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOG: &str = "game;round\r\n\
        \r\n\
        color;seed;name\r\n\
        0;1;A\r\n\
        1;2;B\r\n\
        \r\n\
        marker;color;remaining;x;x;x;per_move\r\n\
        m;0;119000;x;x;x;1000\r\n\
        m;1;118500;x;x;x;1500\r\n\
        m;0;117000;x;x;x;2000\r\n\
        end;;;;;;\r\n\
        \r\n\
        x;x;x;x;won\r\n\
        x;x;x;x;1\r\n\
        x;x;x;x;0\r\n";

    fn game(result: &str) -> GameLog {
        let text = LOG.replace("x;x;x;x;1\r\nx;x;x;x;0", result);
        GameLog::from_reader(Cursor::new(text), ResultPolicy::DrawOnBoth).unwrap()
    }

    #[test]
    fn test_split_row() {
        assert!(split_row("").is_empty());
        assert!(split_row("\r").is_empty());
        assert_eq!(split_row("a;b;;c\r"), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_split_row_strips_quotes() {
        assert_eq!(
            split_row("0;\"1\";\"Alpha\";\"\""),
            vec!["0", "1", "Alpha", ""]
        );
        assert_eq!(split_row("\"open;close\""), vec!["\"open", "close\""]);
    }

    #[test]
    fn test_quoted_name_matches_filter() {
        let text = LOG.replace("0;1;A", "0;1;\"Alpha\"");
        let log = GameLog::from_reader(Cursor::new(text), ResultPolicy::DrawOnBoth).unwrap();
        assert_eq!(log.color_of("Alpha"), Some(Color::Black));
        assert_eq!(log.caption(), "Game won by Alpha");
    }

    #[test]
    fn test_reader_with_crlf() {
        let log = game("x;x;x;x;1\r\nx;x;x;x;0");
        assert_eq!(log.black_moves.len(), 2);
        assert_eq!(log.white_moves.len(), 1);
        assert_eq!(log.players.len(), 2);
    }

    #[test]
    fn test_black_win_caption() {
        let log = game("x;x;x;x;1\r\nx;x;x;x;0");
        assert_eq!(log.outcome, Outcome::Winner(0));
        assert_eq!(log.caption(), "Game won by A");
    }

    #[test]
    fn test_draw_caption() {
        let log = game("x;x;x;x;0\r\nx;x;x;x;0");
        assert_eq!(log.outcome, Outcome::Draw);
        assert_eq!(log.caption(), "Game ended in a draw");
    }

    #[test]
    fn test_color_of_is_exact_match() {
        let log = game("x;x;x;x;0\r\nx;x;x;x;1");
        assert_eq!(log.color_of("B"), Some(Color::White));
        assert_eq!(log.color_of("A"), Some(Color::Black));
        assert_eq!(log.color_of("b"), None);
        assert_eq!(log.player(Color::White).map(|p| p.label()), Some("B (2)".to_string()));
    }

    #[test]
    fn test_display_summary() {
        let log = game("x;x;x;x;0\r\nx;x;x;x;1");
        assert_eq!(
            log.to_string(),
            "A (1) vs B (2); 2 black moves, 1 white moves; Game won by B"
        );
    }

    #[test]
    fn test_from_csv_missing_file() {
        let err = GameLog::from_csv(Path::new("does/not/exist.csv"), ResultPolicy::default())
            .unwrap_err();
        assert!(matches!(err, GameLogError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }

    #[test]
    fn test_min_and_max() {
        assert_eq!(min_and_max(&[3, 1, 2]), Some((1, 3)));
        assert_eq!(min_and_max::<i64>(&[]), None);
    }
}
