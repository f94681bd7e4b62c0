use crate::rules::{BoardGeometry, JumpMap};

/// Cosmetic orientation of a token glyph. Has no effect on the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn opposite(&self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Decides which way a token faces after moving `prev -> landed -> final`.
///
/// A snake at `landed` always faces left and a ladder always faces right. A plain
/// move along one visual row faces the way the column moved; a move that changes
/// rows faces the sweep direction of the row it ended on, flipped for a net
/// backward move.
pub fn facing_after_move(
    prev: u16,
    landed: u16,
    final_cell: u16,
    geometry: &BoardGeometry,
    ladders: &JumpMap,
    snakes: &JumpMap,
) -> Facing {
    if snakes.get(landed) == Some(final_cell) {
        return Facing::Left;
    }
    if ladders.get(landed) == Some(final_cell) {
        return Facing::Right;
    }

    let (prev_row, prev_col) = geometry.pos_to_row_col(prev);
    let (row, col) = geometry.pos_to_row_col(final_cell);

    if prev_row == row {
        if col > prev_col {
            return Facing::Right;
        }
        if col < prev_col {
            return Facing::Left;
        }
    }

    let forward = geometry.forward_dir(final_cell);
    if final_cell >= prev {
        forward
    } else {
        forward.opposite()
    }
}
