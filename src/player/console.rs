use std::io::{BufRead, Cursor, Stdin, Stdout, Write};

use log::debug;

use crate::core::{Player, PlayerMark};
use crate::error::{Error, Result};
use crate::game::tictactoe::{Board, Move};

/// Where a console player reads its lines from
pub trait LineInput {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize>;
}

/// Locks stdin for one line at a time, so two players can share the keyboard
impl LineInput for Stdin {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// A human at the terminal, typing moves like `b2`
pub struct ConsolePlayer<R = Stdin, W = Stdout> {
    pub name: String,
    input: R,
    output: W,
}

impl ConsolePlayer {
    pub fn new(mark: PlayerMark) -> Self {
        ConsolePlayer::with_io(mark, std::io::stdin(), std::io::stdout())
    }
}

impl<R: LineInput, W: Write> ConsolePlayer<R, W> {
    pub fn with_io(mark: PlayerMark, input: R, output: W) -> Self {
        ConsolePlayer {
            name: mark.to_string(),
            input,
            output,
        }
    }

    fn prompt(&mut self) -> Result<String> {
        write!(self.output, "Player {}'s move: ", self.name)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Input(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before a move was made",
            )));
        }
        Ok(line)
    }
}

impl<R: LineInput, W: Write> Player for ConsolePlayer<R, W> {
    /// Keeps asking until the input names a free cell
    fn play(&mut self, b: &Board) -> Result<Move> {
        let legal = b.legal_moves();
        if legal.is_empty() {
            return Err(Error::NoMoveAvailable);
        }
        loop {
            let line = self.prompt()?;
            match line.parse::<Move>() {
                Ok(mv) if legal.contains(&mv) => return Ok(mv),
                Ok(mv) => debug!("{} asked for the occupied cell {mv}", self.name),
                Err(e) => debug!("{e}"),
            }
            let mut names: Vec<String> = legal.iter().map(ToString::to_string).collect();
            names.sort();
            writeln!(
                self.output,
                "Please enter a valid move: [LETTER A-C][NUMBER 1-3]"
            )?;
            writeln!(self.output, "Possible moves: {}\n", names.join(", "))?;
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    fn player(input: &str) -> ConsolePlayer<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePlayer::with_io(
            PlayerMark::Cross,
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    #[test]
    fn reads_a_move() {
        let mut p = player("b2\n");
        let mv = p.play(&Board::new()).unwrap();
        assert_eq!(mv, Move::new(1, 1).unwrap());
        assert_eq!(String::from_utf8(p.output).unwrap(), "Player X's move: ");
    }

    #[test]
    fn reprompts_on_garbage_and_taken_cells() {
        let b = Board::from_str("xo.......").unwrap();
        let mut p = player("z9\na3\nc3\n");
        let mv = p.play(&b).unwrap();
        assert_eq!(mv, Move::new(0, 2).unwrap());
        let out = String::from_utf8(p.output).unwrap();
        assert_eq!(out.matches("Player X's move: ").count(), 3);
        assert_eq!(out.matches("Please enter a valid move").count(), 2);
        assert!(out.contains("Possible moves: a1, a2, b1, b2, c1, c2, c3\n"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = player("nope\n");
        assert!(matches!(p.play(&Board::new()), Err(Error::Input(_))));
    }
}
