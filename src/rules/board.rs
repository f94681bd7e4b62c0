use crate::{error::{Error, Result}, rules::Facing};

/// Shape of a serpentine board.
///
/// Cells are numbered `1..=total_cells`. Effective row `r` (counted from the
/// row holding cell 1) runs left to right when `r` is even and right to left
/// when it is odd. Visual coordinates are zero-based with `(0, 0)` at the top
/// left; `start_from_bottom` puts cell 1 on the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardGeometry {
    rows: u16,
    cols: u16,
    total_cells: u16,
    start_from_bottom: bool,
}

impl BoardGeometry {
    /// Fails unless the board holds between 4 and `u16::MAX` cells.
    pub fn new(rows: u16, cols: u16, start_from_bottom: bool) -> Result<Self> {
        let cells = rows as u32 * cols as u32;
        if cells < 4 {
            return Err(Error::BoardTooSmall { rows, cols });
        }
        let total_cells = u16::try_from(cells).map_err(|_| Error::BoardTooLarge { rows, cols })?;
        Ok(BoardGeometry { rows, cols, total_cells, start_from_bottom })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn start_from_bottom(&self) -> bool {
        self.start_from_bottom
    }

    pub fn total_cells(&self) -> u16 {
        self.total_cells
    }

    /// Pulls a position into `1..=total_cells`.
    pub fn clamp(&self, pos: u16) -> u16 {
        pos.clamp(1, self.total_cells())
    }

    fn effective_row(&self, pos: u16) -> u16 {
        (pos - 1) / self.cols
    }

    /// Visual `(row, col)` of a cell. Out-of-range positions are clamped first.
    pub fn pos_to_row_col(&self, pos: u16) -> (u16, u16) {
        let pos = self.clamp(pos);
        let effective_row = self.effective_row(pos);
        let pos_in_row = (pos - 1) % self.cols;

        let col = if effective_row % 2 == 0 { pos_in_row } else { self.cols - 1 - pos_in_row };
        let row = if self.start_from_bottom { self.rows - 1 - effective_row } else { effective_row };
        (row, col)
    }

    /// Cell number shown at visual `(row, col)`.
    pub fn cell_at(&self, row: u16, col: u16) -> u16 {
        let effective_row = if self.start_from_bottom { self.rows - 1 - row } else { row };
        let base = effective_row * self.cols;
        if effective_row % 2 == 0 {
            base + col + 1
        } else {
            base + (self.cols - col)
        }
    }

    /// Natural sweep direction of the row containing `pos`.
    pub fn forward_dir(&self, pos: u16) -> Facing {
        if self.effective_row(self.clamp(pos)) % 2 == 0 {
            Facing::Right
        } else {
            Facing::Left
        }
    }
}
