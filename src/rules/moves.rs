use crate::rules::{JumpMap, Roll};

/// Where a token stopped after the die (`landed`) and after any jump (`final_cell`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveOutcome {
    pub landed: u16,
    pub final_cell: u16,
}

impl MoveOutcome {
    pub fn jumped(&self) -> bool {
        self.landed != self.final_cell
    }
}

/// Moves a token from `position` by `roll`.
///
/// With `exact_finish` an overshoot voids the move and the token stays put.
/// Without it the token stops on the finish cell. A ladder or snake starting on
/// the landing cell is then followed once.
pub fn resolve_move(
    position: u16,
    roll: Roll,
    total_cells: u16,
    exact_finish: bool,
    ladders: &JumpMap,
    snakes: &JumpMap,
) -> MoveOutcome {
    debug_assert!((1..=total_cells).contains(&position), "position {position} off the board");

    let tentative = position as u32 + roll.value() as u32;
    if exact_finish && tentative > total_cells as u32 {
        return MoveOutcome { landed: position, final_cell: position };
    }

    let landed = tentative.min(total_cells as u32) as u16;
    let final_cell = ladders.get(landed)
        .or_else(|| snakes.get(landed))
        .unwrap_or(landed);

    MoveOutcome { landed, final_cell }
}
