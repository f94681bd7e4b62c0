use hashbrown::HashSet;
use rand::Rng;
use tracing::debug;

use crate::{error::{Error, Result}, rules::{JumpMap, ValidationMode, check_jumps}};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Ladders and snakes for one game. Replaced as a whole, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameLayout {
    ladders: JumpMap,
    snakes: JumpMap,
}

impl GameLayout {
    /// Wraps externally supplied maps after checking them with `mode`.
    pub fn from_maps(ladders: JumpMap, snakes: JumpMap, total_cells: u16, mode: ValidationMode) -> Result<Self> {
        check_jumps(&ladders, &snakes, total_cells, mode)?;
        Ok(GameLayout { ladders, snakes })
    }

    pub fn ladders(&self) -> &JumpMap {
        &self.ladders
    }

    pub fn snakes(&self) -> &JumpMap {
        &self.snakes
    }

    /// Random layout with `count` ladders and `count` snakes, at most
    /// [`DEFAULT_MAX_ATTEMPTS`] candidate draws.
    pub fn generate<R: Rng + ?Sized>(count: u16, total_cells: u16, rng: &mut R) -> Result<Self> {
        Self::generate_bounded(count, total_cells, DEFAULT_MAX_ATTEMPTS, rng)
    }

    /// Rejection sampling. Endpoints stay inside `2..total_cells` so the start
    /// and finish cells are never redirected, every jump moves at least two
    /// cells, and no cell is the endpoint of more than one jump.
    pub fn generate_bounded<R: Rng + ?Sized>(
        count: u16,
        total_cells: u16,
        max_attempts: u32,
        rng: &mut R,
    ) -> Result<Self> {
        if total_cells < 4 {
            return Err(Error::LayoutUnsatisfiable { count, total_cells });
        }
        if count > 0 && (total_cells < 5 || 4 * count as u32 > total_cells as u32 - 2) {
            return Err(Error::LayoutUnsatisfiable { count, total_cells });
        }

        let mut layout = GameLayout::default();
        let mut used: HashSet<u16> = HashSet::new();
        let mut attempts = 0;

        while layout.snakes.len() < count as usize {
            attempts += 1;
            if attempts > max_attempts {
                return Err(Error::LayoutExhausted { count, total_cells, attempts: max_attempts });
            }
            let head = rng.random_range(4..=total_cells - 1);
            let tail = rng.random_range(2..=head - 2);
            if !used.contains(&head) && !used.contains(&tail) {
                layout.snakes.insert(head, tail);
                used.insert(head);
                used.insert(tail);
            }
        }

        while layout.ladders.len() < count as usize {
            attempts += 1;
            if attempts > max_attempts {
                return Err(Error::LayoutExhausted { count, total_cells, attempts: max_attempts });
            }
            let start = rng.random_range(2..=total_cells - 3);
            let end = rng.random_range(start + 2..=total_cells - 1);
            if !used.contains(&start) && !used.contains(&end) {
                layout.ladders.insert(start, end);
                used.insert(start);
                used.insert(end);
            }
        }

        debug!(count, total_cells, attempts, "generated layout");
        Ok(layout)
    }
}
