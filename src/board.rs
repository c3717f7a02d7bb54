//! The 3x3 grid and its geometry.
//!
//! Cells are indexed 0..=8 row-major (`row * 3 + col`). Adjacency moves by
//! index offset: up -3, down +3, left -1, right +1, with the left/right
//! moves blocked on the respective edge columns so neighbors never wrap
//! between rows.

use serde::{Deserialize, Serialize};

use crate::room::{Account, CardInstance};

/// Number of cells on the board, always exactly 9.
pub const BOARD_CELLS: usize = 9;

/// One of the four adjacency directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in capture-scan order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing back at this one.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Index offset for a step in this direction.
    #[must_use]
    pub const fn offset(self) -> isize {
        match self {
            Direction::Up => -3,
            Direction::Down => 3,
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// The neighboring cell index in this direction, if it exists.
    ///
    /// Left from column 0 and right from column 2 have no neighbor; rows
    /// never wrap.
    #[must_use]
    pub fn neighbor(self, index: usize) -> Option<usize> {
        debug_assert!(index < BOARD_CELLS);
        match self {
            Direction::Left if index % 3 == 0 => return None,
            Direction::Right if index % 3 == 2 => return None,
            _ => {}
        }
        let next = index as isize + self.offset();
        (0..BOARD_CELLS as isize).contains(&next).then(|| next as usize)
    }
}

/// The direction a card at `from` faces toward a card at `to`, for
/// long-range stat comparison.
///
/// Row difference decides before column difference, so a diagonal target is
/// compared vertically. `None` only for `from == to`.
#[must_use]
pub fn facing(from: usize, to: usize) -> Option<Direction> {
    debug_assert!(from < BOARD_CELLS && to < BOARD_CELLS);
    let (from_row, from_col) = (from / 3, from % 3);
    let (to_row, to_col) = (to / 3, to % 3);

    if to_row > from_row {
        Some(Direction::Down)
    } else if to_row < from_row {
        Some(Direction::Up)
    } else if to_col > from_col {
        Some(Direction::Right)
    } else if to_col < from_col {
        Some(Direction::Left)
    } else {
        None
    }
}

/// An occupied cell: the owning player's identity and the card there.
///
/// The cell owns its card; a flip reassigns `owner` and never copies the
/// card. The owner is a copy of the player's identity, not a live reference
/// into the player list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Account of the player currently owning this cell.
    pub owner: Account,
    /// The card placed here.
    pub card: CardInstance,
}

/// The 3x3 board: a fixed sequence of 9 cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Cell>; BOARD_CELLS],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cell at an index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index).and_then(|c| c.as_ref())
    }

    /// Get the cell at an index, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index).and_then(|c| c.as_mut())
    }

    /// Get the card at an index, if the cell is occupied.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&CardInstance> {
        self.get(index).map(|cell| &cell.card)
    }

    /// Get the card at an index, mutably.
    pub fn card_mut(&mut self, index: usize) -> Option<&mut CardInstance> {
        self.get_mut(index).map(|cell| &mut cell.card)
    }

    /// Whether the cell at an index is empty.
    #[must_use]
    pub fn is_empty(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    /// Place a cell at an empty index. Returns false if occupied.
    pub fn place(&mut self, index: usize, cell: Cell) -> bool {
        debug_assert!(index < BOARD_CELLS);
        if self.cells[index].is_some() {
            return false;
        }
        self.cells[index] = Some(cell);
        true
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether every cell is occupied.
    ///
    /// The engine never ends a match itself; callers use this to decide.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled_count() == BOARD_CELLS
    }

    /// Iterate over occupied cells in board order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|cell| (i, cell)))
    }

    /// The board length. Always [`BOARD_CELLS`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A board is never without cells.
    #[must_use]
    pub fn is_board_empty(&self) -> bool {
        self.filled_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::InstanceId;
    use crate::defs::CardDefId;

    fn cell(account: &str) -> Cell {
        Cell {
            owner: Account::new(account),
            card: CardInstance::with_stats(
                InstanceId(1),
                CardDefId::new(1),
                [5, 5, 5, 5],
                true,
            ),
        }
    }

    #[test]
    fn test_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }

    #[test]
    fn test_neighbor_center() {
        assert_eq!(Direction::Up.neighbor(4), Some(1));
        assert_eq!(Direction::Down.neighbor(4), Some(7));
        assert_eq!(Direction::Left.neighbor(4), Some(3));
        assert_eq!(Direction::Right.neighbor(4), Some(5));
    }

    #[test]
    fn test_neighbor_edges_do_not_wrap() {
        // Top-right corner: index 3 is the start of the next row, not a
        // right neighbor.
        assert_eq!(Direction::Right.neighbor(2), None);
        assert_eq!(Direction::Up.neighbor(2), None);
        assert_eq!(Direction::Left.neighbor(2), Some(1));
        assert_eq!(Direction::Down.neighbor(2), Some(5));

        // Left column.
        assert_eq!(Direction::Left.neighbor(3), None);
        assert_eq!(Direction::Left.neighbor(0), None);
        assert_eq!(Direction::Left.neighbor(6), None);

        // Bottom row.
        assert_eq!(Direction::Down.neighbor(7), None);
    }

    #[test]
    fn test_facing_row_before_column() {
        // Straight lines.
        assert_eq!(facing(4, 1), Some(Direction::Up));
        assert_eq!(facing(4, 7), Some(Direction::Down));
        assert_eq!(facing(4, 3), Some(Direction::Left));
        assert_eq!(facing(4, 5), Some(Direction::Right));

        // Diagonals compare vertically.
        assert_eq!(facing(0, 8), Some(Direction::Down));
        assert_eq!(facing(8, 0), Some(Direction::Up));
        assert_eq!(facing(6, 2), Some(Direction::Up));

        // Same row, far column.
        assert_eq!(facing(3, 5), Some(Direction::Right));

        assert_eq!(facing(4, 4), None);
    }

    #[test]
    fn test_board_place_and_lookup() {
        let mut board = Board::new();
        assert_eq!(board.len(), BOARD_CELLS);
        assert!(board.is_empty(4));

        assert!(board.place(4, cell("alice")));
        assert!(!board.place(4, cell("bob")));

        assert_eq!(board.get(4).unwrap().owner.as_str(), "alice");
        assert_eq!(board.filled_count(), 1);
        assert!(!board.is_full());
    }

    #[test]
    fn test_board_occupied_in_order() {
        let mut board = Board::new();
        board.place(7, cell("a"));
        board.place(2, cell("b"));
        board.place(4, cell("c"));

        let indices: Vec<_> = board.occupied().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![2, 4, 7]);
    }

    #[test]
    fn test_board_full() {
        let mut board = Board::new();
        for i in 0..BOARD_CELLS {
            board.place(i, cell("a"));
        }
        assert!(board.is_full());
        assert_eq!(board.len(), BOARD_CELLS);
    }
}
