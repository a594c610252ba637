use std::str::FromStr;

use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::core::{Outcome, PlayerMark};
use crate::error::{Error, InvalidMoveReason, Result};

/// Represents a coordinate on the board, zero based and row major
///
///  (0,0) (0,1) (0,2)
///  (1,0) (1,1) (1,2)
///  (2,0) (2,1) (2,2)
///
/// invariant: both numbers are in 0..=2, also when read back through serde
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row > 2 || col > 2 {
            return Err(Error::OutOfBounds { row, col });
        }
        Ok(Move { row, col })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

impl TryFrom<(usize, usize)> for Move {
    type Error = Error;
    fn try_from((row, col): (usize, usize)) -> Result<Self> {
        Move::new(row, col)
    }
}

impl From<Move> for (usize, usize) {
    fn from(mv: Move) -> Self {
        (mv.row, mv.col)
    }
}

/// Alphanumeric notation: a column letter a-c and a row number 1-3, counted from the bottom.
/// So "a3" is the top left corner and "c1" the bottom right one.
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = (b'a' + self.col as u8) as char;
        write!(f, "{}{}", letter, 3 - self.row)
    }
}

impl FromStr for Move {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::InvalidNotation(s.to_string());
        let mut chars = s.trim().chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(bad());
        };
        let col = match letter.to_ascii_lowercase() {
            'a' => 0,
            'b' => 1,
            'c' => 2,
            _ => return Err(bad()),
        };
        let row = match digit {
            '1' => 2,
            '2' => 1,
            '3' => 0,
            _ => return Err(bad()),
        };
        Move::new(row, col)
    }
}

/// The board entries, row wise from the top left to the bottom right.
/// `None` is an empty cell.
///
/// A board is a value. Playing on it gives you a new board, so a search can branch
/// from the same position as often as it likes.
#[derive(
    Clone, Copy, Debug, Default, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "Cells", into = "Cells")]
pub struct Board(Cells);

type Cells = [[Option<PlayerMark>; 3]; 3];

/// 3 rows (top to bottom), 3 columns (left to right) and two diagonals
/// (first the one that points to southeast, then the one to northeast)
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, mv: Move) -> Option<PlayerMark> {
        self.0[mv.row][mv.col]
    }

    pub fn occupied_count(&self) -> usize {
        self.0.iter().flatten().filter(|q| q.is_some()).count()
    }

    fn empty_count(&self) -> usize {
        9 - self.occupied_count()
    }

    /// Who places the next mark. `None` once the board is full.
    pub fn whose_turn(&self) -> Option<PlayerMark> {
        match self.empty_count() {
            0 => None,
            n if n % 2 == 1 => Some(PlayerMark::Cross),
            _ => Some(PlayerMark::Naught),
        }
    }

    /// Is there a winner?
    pub fn winner(&self) -> Option<PlayerMark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.0[a.0][a.1]?;
            (self.0[b.0][b.1] == Some(mark) && self.0[c.0][c.1] == Some(mark)).then_some(mark)
        })
    }

    fn has_line(&self, mark: PlayerMark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.0[r][c] == Some(mark)))
    }

    fn count(&self, mark: PlayerMark) -> usize {
        self.0.iter().flatten().filter(|&&q| q == Some(mark)).count()
    }

    pub fn outcome(&self) -> Outcome {
        if let Some(p) = self.winner() {
            Outcome::Won(p)
        } else if self.empty_count() == 0 {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// The coordinates where the next mark may go, in row major order.
    /// Empty once the game is decided.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        iproduct!(0..3, 0..3)
            .filter(|&(row, col)| self.0[row][col].is_none())
            .map(|(row, col)| Move { row, col })
            .collect()
    }

    /// Every legal move paired with the board it leads to, in row major order.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Board)> {
        let board = *self;
        self.whose_turn().into_iter().flat_map(move |marker| {
            board.legal_moves().into_iter().map(move |mv| {
                let mut next = board;
                next.0[mv.row][mv.col] = Some(marker);
                (mv, next)
            })
        })
    }

    /// The board after the player to move has marked `mv`.
    pub fn apply_move(&self, mv: Move) -> Result<Board> {
        let marker = match self.whose_turn() {
            Some(p) if !self.is_terminal() => p,
            _ => {
                return Err(Error::InvalidMove {
                    mv,
                    reason: InvalidMoveReason::GameOver,
                })
            }
        };
        if self.cell(mv).is_some() {
            return Err(Error::InvalidMove {
                mv,
                reason: InvalidMoveReason::Occupied,
            });
        }
        let mut next = *self;
        next.0[mv.row][mv.col] = Some(marker);
        Ok(next)
    }
}

/// Reads nine cells row wise. `x` and `o` (any case) are marks, a space or `.` is empty.
impl FromStr for Board {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(Error::InvalidBoard(format!(
                "expected 9 cells, got {} in '{s}'",
                chars.len()
            )));
        }
        let mut b = Board::new();
        for (num, c) in chars.into_iter().enumerate() {
            b.0[num / 3][num % 3] = match c {
                'x' | 'X' => Some(PlayerMark::Cross),
                'o' | 'O' => Some(PlayerMark::Naught),
                ' ' | '.' => None,
                _ => {
                    return Err(Error::InvalidBoard(format!(
                        "invalid character '{c}' at position {num} in '{s}'"
                    )))
                }
            };
        }
        Board::try_from(b.0)
    }
}

/// Accepts only cells a real game can produce: X moves first, turns alternate,
/// and nobody plays on after a line is complete.
impl TryFrom<Cells> for Board {
    type Error = Error;
    fn try_from(cells: Cells) -> Result<Self> {
        let b = Board(cells);
        let (crosses, naughts) = (b.count(PlayerMark::Cross), b.count(PlayerMark::Naught));
        if crosses != naughts && crosses != naughts + 1 {
            return Err(Error::InvalidBoard(format!(
                "X={crosses}, O={naughts} (X moves first, so X must equal O or lead by one)"
            )));
        }
        match (b.has_line(PlayerMark::Cross), b.has_line(PlayerMark::Naught)) {
            (true, true) => Err(Error::InvalidBoard("both X and O have a line".into())),
            (true, false) if crosses == naughts => Err(Error::InvalidBoard(
                "O moved after X had already won".into(),
            )),
            (false, true) if crosses != naughts => Err(Error::InvalidBoard(
                "X moved after O had already won".into(),
            )),
            _ => Ok(b),
        }
    }
}

impl From<Board> for Cells {
    fn from(b: Board) -> Self {
        b.0
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = |m: Option<PlayerMark>| match m {
            None => ' ',
            Some(PlayerMark::Cross) => 'X',
            Some(PlayerMark::Naught) => 'O',
        };
        writeln!(f, "    a   b   c")?;
        writeln!(f, "  -------------")?;
        for (row, cells) in self.0.iter().enumerate() {
            write!(f, "{} |", 3 - row)?;
            cells
                .iter()
                .try_for_each(|&mark| write!(f, " {} |", m(mark)))?;
            writeln!(f)?;
            writeln!(f, "  -------------")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mv(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn empty_board_is_crosses_turn() {
        let b = Board::new();
        assert_eq!(b.whose_turn(), Some(PlayerMark::Cross));
        assert_eq!(b.outcome(), Outcome::InProgress);
        assert_eq!(b.legal_moves().len(), 9);
    }

    #[test]
    fn turns_alternate() {
        let b = Board::new().apply_move(mv(1, 1)).unwrap();
        assert_eq!(b.cell(mv(1, 1)), Some(PlayerMark::Cross));
        assert_eq!(b.whose_turn(), Some(PlayerMark::Naught));
        let b = b.apply_move(mv(0, 0)).unwrap();
        assert_eq!(b.cell(mv(0, 0)), Some(PlayerMark::Naught));
        assert_eq!(b.whose_turn(), Some(PlayerMark::Cross));
    }

    #[test]
    fn legal_moves_are_row_major() {
        let b = Board::from_str("x...o....").unwrap();
        let moves = b.legal_moves();
        assert_eq!(
            moves,
            vec![mv(0, 1), mv(0, 2), mv(1, 0), mv(1, 2), mv(2, 0), mv(2, 1), mv(2, 2)]
        );
    }

    #[test]
    fn successors_agree_with_apply_move() {
        let b = Board::from_str("xo..x...o").unwrap();
        let succ: Vec<_> = b.successors().collect();
        assert_eq!(succ.len(), b.legal_moves().len());
        for (m, next) in succ {
            assert_eq!(b.apply_move(m).unwrap(), next);
        }
        assert_eq!(Board::from_str("xxxoo....").unwrap().successors().count(), 0);
    }

    #[test]
    fn detects_every_line() {
        let wins = [
            "xxxoo....",
            "oo.xxx...",
            "oo....xxx",
            "xo.xo.x..",
            "ox.ox..x.",
            "o.xo.x..x",
            "xo.ox...x",
            "o.xox.x..",
        ];
        for s in wins {
            let b = Board::from_str(s).unwrap();
            assert_eq!(b.outcome(), Outcome::Won(PlayerMark::Cross), "{s}");
            assert!(b.legal_moves().is_empty(), "{s}");
        }
    }

    #[test]
    fn naughts_can_win() {
        let b = Board::from_str("xx.ooox..").unwrap();
        assert_eq!(b.outcome(), Outcome::Won(PlayerMark::Naught));
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let b = Board::from_str("xoxxoooxx").unwrap();
        assert_eq!(b.outcome(), Outcome::Draw);
        assert_eq!(b.whose_turn(), None);
        assert!(b.legal_moves().is_empty());
    }

    #[test]
    fn occupied_cell_is_rejected_and_board_kept() {
        let b = Board::from_str("x........").unwrap();
        let before = b;
        let err = b.apply_move(mv(0, 0)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMove {
                reason: InvalidMoveReason::Occupied,
                ..
            }
        ));
        assert_eq!(b, before);
    }

    #[test]
    fn finished_game_rejects_moves() {
        let b = Board::from_str("xxxoo....").unwrap();
        let err = b.apply_move(mv(2, 2)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMove {
                reason: InvalidMoveReason::GameOver,
                ..
            }
        ));
    }

    #[test]
    fn parse_rejects_bad_boards() {
        assert!(Board::from_str("xx").is_err());
        assert!(Board::from_str("xxo......q").is_err());
        assert!(Board::from_str("xx.......").is_err());
        assert!(Board::from_str("o........").is_err());
        assert!(Board::from_str("x?.......").is_err());
    }

    #[test]
    fn parse_rejects_play_after_a_win() {
        assert!(Board::from_str("xxxooo..x").is_err());
        assert!(Board::from_str("xxxoo.o..").is_err());
        assert!(Board::from_str("ooox.x.xx").is_err());
        // one mark closing two lines at once is fine
        assert!(Board::from_str("xxxxooxoo").is_ok());
    }

    #[test]
    fn serde_checks_moves() {
        let m: Move = serde_json::from_str("[2, 1]").unwrap();
        assert_eq!(m, mv(2, 1));
        assert_eq!(serde_json::to_string(&m).unwrap(), "[2,1]");
        assert!(serde_json::from_str::<Move>("[5, 0]").is_err());
        assert!(serde_json::from_str::<Move>(r#"{"row":5,"col":0}"#).is_err());
    }

    #[test]
    fn serde_checks_boards() {
        let b = Board::from_str("x...o...x").unwrap();
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), b);
        let two_naughts = r#"[["Naught","Naught",null],[null,null,null],[null,null,null]]"#;
        assert!(serde_json::from_str::<Board>(two_naughts).is_err());
        let both_won = serde_json::to_string(&[
            [Some(PlayerMark::Cross); 3],
            [Some(PlayerMark::Naught); 3],
            [None, None, Some(PlayerMark::Cross)],
        ])
        .unwrap();
        assert!(serde_json::from_str::<Board>(&both_won).is_err());
    }

    #[test]
    fn move_bounds() {
        assert!(Move::new(2, 2).is_ok());
        assert!(matches!(
            Move::new(3, 0),
            Err(Error::OutOfBounds { row: 3, col: 0 })
        ));
        assert!(Move::try_from((0, 5)).is_err());
    }

    #[test]
    fn notation_matches_grid_labels() {
        assert_eq!(Move::from_str("a3").unwrap(), mv(0, 0));
        assert_eq!(Move::from_str("C1").unwrap(), mv(2, 2));
        assert_eq!(Move::from_str(" b2\n").unwrap(), mv(1, 1));
        assert_eq!(mv(0, 2).to_string(), "c3");
        assert_eq!(mv(2, 0).to_string(), "a1");
        for m in Board::new().legal_moves() {
            assert_eq!(Move::from_str(&m.to_string()).unwrap(), m);
        }
    }

    #[test]
    fn notation_rejects_garbage() {
        for s in ["", "a", "d1", "a4", "a0", "1a", "a12", "b 2"] {
            assert!(
                matches!(Move::from_str(s), Err(Error::InvalidNotation(_))),
                "{s:?}"
            );
        }
    }

    #[test]
    fn display_shows_marks_and_labels() {
        let b = Board::from_str("x...o....").unwrap();
        let s = b.to_string();
        assert!(s.contains("a   b   c"));
        assert!(s.contains("3 | X |   |   |"));
        assert!(s.contains("2 |   | O |   |"));
    }
}
