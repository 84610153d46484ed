pub mod coord;
pub mod error;
pub mod search;

use std::fmt::{self, Write};

use bitvec::{
    bitbox,
    prelude::{BitBox, BitVec, Lsb0},
};

use crate::coord::{Coord, Position, Triangle};
pub use crate::error::SolitaireError;

/// A jump of the peg on `from` over the peg on `over` into the hole `to`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Jump {
    pub from: Position,
    pub over: Position,
    pub to: Position,
}

impl Jump {
    pub const fn new(from: Position, over: Position, to: Position) -> Self {
        Jump { from, over, to }
    }

    /// Build the jump `a -> c` over `b`. The coordinates must lie on the board.
    fn from_coords(shape: Triangle, a: Coord, b: Coord, c: Coord) -> Jump {
        Jump {
            from: shape.position_unchecked(a),
            over: shape.position_unchecked(b),
            to: shape.position_unchecked(c),
        }
    }

    pub fn reversed(self) -> Jump {
        Jump {
            from: self.to,
            over: self.over,
            to: self.from,
        }
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} over {} to {}", self.from, self.over, self.to)
    }
}

/// Empty hole of the classic starting layout.
pub const DEFAULT_HOLE: Position = Position(5);

/// Occupancy of every hole on a triangular board, in position order.
///
/// Boards are values: applying a jump produces a new board and equality or
/// hashing only looks at the shape and the cells.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    shape: Triangle,
    cells: BitBox<u32, Lsb0>,
}

impl Board {
    /// Every hole filled with a peg.
    pub fn full(shape: Triangle) -> Self {
        Board {
            shape,
            cells: bitbox![u32, Lsb0; 1; shape.nr_holes()],
        }
    }

    /// Every hole filled except `hole`.
    pub fn with_hole(shape: Triangle, hole: Position) -> Result<Self, SolitaireError> {
        shape.position_to_coord(hole)?;
        Ok(Self::full(shape).without_peg(hole))
    }

    /// The classic starting layout: 15 holes, the hole in the middle of the
    /// third row.
    pub fn default_start() -> Self {
        Self::full(Triangle::standard()).without_peg(DEFAULT_HOLE)
    }

    /// `hole` must be on the board.
    fn without_peg(mut self, hole: Position) -> Self {
        self.cells.set(hole.index(), false);
        self
    }

    /// Build a board from nested rows of `0` (hole) and `1` (peg).
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, SolitaireError> {
        let shape = Triangle::new(rows.len())?;
        let mut cells = bitbox![u32, Lsb0; 0; shape.nr_holes()];

        for (row, values) in rows.iter().enumerate() {
            if values.len() != shape.row_len(row) {
                return Err(SolitaireError::InvalidShape {
                    message: format!(
                        "row {row} has {} cells, expected {}",
                        values.len(),
                        shape.row_len(row)
                    ),
                });
            }

            for (col, &value) in values.iter().enumerate() {
                let occupied = match value {
                    0 => false,
                    1 => true,
                    _ => {
                        return Err(SolitaireError::InvalidCell {
                            value: value.to_string(),
                            row,
                        });
                    }
                };
                cells.set(shape.row_start(row) + col, occupied);
            }
        }

        Ok(Board { shape, cells })
    }

    /// Parse a drawing of the board where `#` is a peg and `.` is a hole.
    /// Whitespace is ignored, so the cells can be laid out as a triangle.
    pub fn from_ascii(text: &str) -> Result<Self, SolitaireError> {
        let mut bits = Vec::new();
        for (row, line) in text.lines().enumerate() {
            for c in line.chars() {
                match c {
                    '#' => bits.push(true),
                    '.' => bits.push(false),
                    c if c.is_whitespace() => {}
                    c => {
                        return Err(SolitaireError::InvalidCell {
                            value: c.to_string(),
                            row,
                        });
                    }
                }
            }
        }

        let Some(shape) = Triangle::from_nr_holes(bits.len()) else {
            return Err(SolitaireError::InvalidShape {
                message: format!("{} cells do not form a triangle", bits.len()),
            });
        };

        Ok(Board {
            shape,
            cells: bits
                .into_iter()
                .collect::<BitVec<u32, Lsb0>>()
                .into_boxed_bitslice(),
        })
    }

    pub fn shape(&self) -> Triangle {
        self.shape
    }

    /// Number of pegs left on the board
    pub fn peg_count(&self) -> usize {
        self.cells.count_ones()
    }

    /// A board is solved once a single peg remains.
    pub fn is_goal(&self) -> bool {
        self.peg_count() == 1
    }

    pub fn is_occupied(&self, pos: Position) -> Result<bool, SolitaireError> {
        match self.cells.get(pos.index()) {
            Some(bit) => Ok(*bit),
            None => Err(SolitaireError::OutOfRange {
                position: pos.get(),
                nr_holes: self.shape.nr_holes(),
            }),
        }
    }

    /// Nested `0`/`1` view of the board, one vector per row.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        (0..self.shape.side()).map(|row| self.row_cells(row)).collect()
    }

    fn row_cells(&self, row: usize) -> Vec<u8> {
        let start = self.shape.row_start(row);
        self.cells[start..start + self.shape.row_len(row)]
            .iter()
            .map(|bit| u8::from(*bit))
            .collect()
    }

    fn peg_at(&self, pos: Position) -> bool {
        self.cells.get(pos.index()).is_some_and(|bit| *bit)
    }

    fn hole_at(&self, pos: Position) -> bool {
        self.cells.get(pos.index()).is_some_and(|bit| !*bit)
    }

    /// A jump is legal if both `from` and `over` hold a peg and `to` is empty.
    pub fn can_jump(&self, jump: Jump) -> bool {
        self.peg_at(jump.from) && self.peg_at(jump.over) && self.hole_at(jump.to)
    }

    pub fn apply_jump(&self, jump: Jump) -> Result<Board, SolitaireError> {
        if !self.can_jump(jump) {
            return Err(SolitaireError::IllegalMove { jump });
        }
        Ok(self.apply_jump_unchecked(jump))
    }

    /// Caller must have checked `can_jump`.
    pub(crate) fn apply_jump_unchecked(&self, jump: Jump) -> Board {
        let mut next = self.clone();
        next.cells.set(jump.from.index(), false);
        next.cells.set(jump.over.index(), false);
        next.cells.set(jump.to.index(), true);
        next
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.shape.side();
        for row in 0..side {
            write!(f, "{}", " ".repeat(side - row - 1))?;
            for (col, value) in self.row_cells(row).into_iter().enumerate() {
                if col > 0 {
                    f.write_char(' ')?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render a solve path, one numbered step per board.
pub fn render_path(path: &[Board]) -> String {
    let mut out = String::new();
    for (step, board) in path.iter().enumerate() {
        // writing into a String can't fail
        let _ = write!(out, "Step {}:\n{board}\n", step + 1);
    }
    out
}

/// Every geometrically possible jump on one board shape.
///
/// The order is fixed: cells are visited in position order and for each cell
/// the upward, sideways and downward-right jumps are listed, each followed
/// by its reverse. The search explores jumps in this order, so the order
/// decides which solution is found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveTable {
    shape: Triangle,
    jumps: Vec<Jump>,
}

impl MoveTable {
    pub fn new(shape: Triangle) -> Self {
        let mut jumps = Vec::new();
        let mut push_pair = |a: Coord, b: Coord, c: Coord| {
            let jump = Jump::from_coords(shape, a, b, c);
            jumps.push(jump);
            jumps.push(jump.reversed());
        };

        for Coord { row, col } in shape.coords() {
            if row >= 2 && col + 2 <= row {
                push_pair(
                    Coord::new(row, col),
                    Coord::new(row - 1, col),
                    Coord::new(row - 2, col),
                );
            }
            if col + 2 < shape.row_len(row) {
                push_pair(
                    Coord::new(row, col),
                    Coord::new(row, col + 1),
                    Coord::new(row, col + 2),
                );
            }
            if row + 2 < shape.side() {
                push_pair(
                    Coord::new(row, col),
                    Coord::new(row + 1, col + 1),
                    Coord::new(row + 2, col + 2),
                );
            }
        }

        log::debug!("built {} candidate jumps for {} rows", jumps.len(), shape.side());
        MoveTable { shape, jumps }
    }

    pub fn shape(&self) -> Triangle {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.jumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jumps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Jump> + '_ {
        self.jumps.iter().copied()
    }

    pub fn contains(&self, jump: Jump) -> bool {
        self.jumps.contains(&jump)
    }

    /// The legal jumps on `board`, in table order.
    pub fn legal_jumps(&self, board: &Board) -> Vec<Jump> {
        self.iter().filter(|&jump| board.can_jump(jump)).collect()
    }
}
