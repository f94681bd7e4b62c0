use std::fmt::Display;

use hashbrown::{HashMap, HashSet};
use tracing::warn;

use crate::error::{Error, Result};

/// Source cell to destination cell. Ladders point up, snakes point down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpMap {
    jumps: HashMap<u16, u16>,
}

impl JumpMap {
    pub fn new() -> Self {
        JumpMap { jumps: HashMap::new() }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (u16, u16)>) -> Self {
        JumpMap { jumps: pairs.into_iter().collect() }
    }

    pub fn get(&self, from: u16) -> Option<u16> {
        self.jumps.get(&from).copied()
    }

    pub fn contains(&self, from: u16) -> bool {
        self.jumps.contains_key(&from)
    }

    pub fn len(&self) -> usize {
        self.jumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jumps.is_empty()
    }

    pub(crate) fn insert(&mut self, from: u16, to: u16) {
        self.jumps.insert(from, to);
    }

    /// Jumps ordered by source cell.
    pub fn sorted(&self) -> Vec<(u16, u16)> {
        let mut pairs: Vec<(u16, u16)> = self.jumps.iter().map(|(&from, &to)| (from, to)).collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.jumps.iter().map(|(&from, &to)| (from, to))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpKind {
    Ladder,
    Snake,
}

impl Display for JumpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JumpKind::Ladder => write!(f, "ladder"),
            JumpKind::Snake => write!(f, "snake"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpIssue {
    StartOutOfRange { kind: JumpKind, cell: u16, total_cells: u16 },
    EndOutOfRange { kind: JumpKind, cell: u16, total_cells: u16 },
    WrongDirection { kind: JumpKind, from: u16, to: u16 },
    SharedStart { cell: u16 },
}

impl Display for JumpIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JumpIssue::StartOutOfRange { kind, cell, total_cells } => {
                write!(f, "{kind}: start {cell} out of range 1..{total_cells}")
            }
            JumpIssue::EndOutOfRange { kind, cell, total_cells } => {
                write!(f, "{kind}: end {cell} out of range 1..{total_cells}")
            }
            JumpIssue::WrongDirection { kind: JumpKind::Ladder, from, to } => {
                write!(f, "ladder: end ({to}) must be > start ({from})")
            }
            JumpIssue::WrongDirection { kind: JumpKind::Snake, from, to } => {
                write!(f, "snake: tail ({to}) must be < head ({from})")
            }
            JumpIssue::SharedStart { cell } => {
                write!(f, "cell {cell} is both a ladder start and a snake head")
            }
        }
    }
}

/// What to do with a jump layout that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Log every issue and keep going.
    #[default]
    Warn,
    /// Refuse the layout.
    Strict,
}

/// Collects every range, direction and overlap problem in a pair of jump maps.
pub fn validate_jumps(ladders: &JumpMap, snakes: &JumpMap, total_cells: u16) -> Vec<JumpIssue> {
    let mut issues = Vec::new();
    let in_range = |cell: u16| (1..=total_cells).contains(&cell);

    for (kind, map) in [(JumpKind::Ladder, ladders), (JumpKind::Snake, snakes)] {
        for (from, to) in map.sorted() {
            if !in_range(from) {
                issues.push(JumpIssue::StartOutOfRange { kind, cell: from, total_cells });
            }
            if !in_range(to) {
                issues.push(JumpIssue::EndOutOfRange { kind, cell: to, total_cells });
            }
            let goes_right_way = match kind {
                JumpKind::Ladder => to > from,
                JumpKind::Snake => to < from,
            };
            if !goes_right_way {
                issues.push(JumpIssue::WrongDirection { kind, from, to });
            }
        }
    }

    let ladder_starts: HashSet<u16> = ladders.iter().map(|(from, _)| from).collect();
    let mut shared: Vec<u16> = snakes.iter()
        .map(|(from, _)| from)
        .filter(|from| ladder_starts.contains(from))
        .collect();
    shared.sort_unstable();
    issues.extend(shared.into_iter().map(|cell| JumpIssue::SharedStart { cell }));

    issues
}

/// Validates and applies `mode`: warnings are logged, strict mode turns any issue into an error.
pub fn check_jumps(ladders: &JumpMap, snakes: &JumpMap, total_cells: u16, mode: ValidationMode) -> Result<()> {
    let issues = validate_jumps(ladders, snakes, total_cells);
    if issues.is_empty() {
        return Ok(());
    }
    match mode {
        ValidationMode::Strict => Err(Error::InvalidJumps(issues)),
        ValidationMode::Warn => {
            for issue in &issues {
                warn!(%issue, "jump layout issue");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_layout_has_no_issues() {
        let ladders = JumpMap::from_pairs([(3, 11), (8, 20)]);
        let snakes = JumpMap::from_pairs([(29, 10), (17, 4)]);
        assert!(validate_jumps(&ladders, &snakes, 30).is_empty());
    }

    #[test]
    fn test_reports_range_and_direction() {
        let ladders = JumpMap::from_pairs([(0, 12), (20, 5)]);
        let snakes = JumpMap::from_pairs([(40, 2), (6, 9)]);
        let issues = validate_jumps(&ladders, &snakes, 30);
        assert_eq!(issues, vec![
            JumpIssue::StartOutOfRange { kind: JumpKind::Ladder, cell: 0, total_cells: 30 },
            JumpIssue::WrongDirection { kind: JumpKind::Ladder, from: 20, to: 5 },
            JumpIssue::WrongDirection { kind: JumpKind::Snake, from: 6, to: 9 },
            JumpIssue::StartOutOfRange { kind: JumpKind::Snake, cell: 40, total_cells: 30 },
        ]);
    }

    #[test]
    fn test_reports_shared_start() {
        let ladders = JumpMap::from_pairs([(5, 15)]);
        let snakes = JumpMap::from_pairs([(5, 2)]);
        let issues = validate_jumps(&ladders, &snakes, 30);
        assert_eq!(issues, vec![JumpIssue::SharedStart { cell: 5 }]);
    }

    #[test]
    fn test_check_modes() {
        let ladders = JumpMap::from_pairs([(10, 4)]);
        let snakes = JumpMap::new();
        assert!(check_jumps(&ladders, &snakes, 30, ValidationMode::Warn).is_ok());
        match check_jumps(&ladders, &snakes, 30, ValidationMode::Strict) {
            Err(Error::InvalidJumps(issues)) => assert_eq!(issues.len(), 1),
            other => panic!("expected InvalidJumps, got {other:?}"),
        }
    }

    #[test]
    fn test_issue_messages() {
        let issue = JumpIssue::WrongDirection { kind: JumpKind::Snake, from: 6, to: 9 };
        assert_eq!(issue.to_string(), "snake: tail (9) must be < head (6)");
        let issue = JumpIssue::EndOutOfRange { kind: JumpKind::Ladder, cell: 31, total_cells: 30 };
        assert_eq!(issue.to_string(), "ladder: end 31 out of range 1..30");
    }
}
