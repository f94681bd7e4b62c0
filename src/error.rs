use std::path::PathBuf;

use thiserror::Error as ThisError;

use crate::rules::{JumpIssue, Player};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("board {rows}x{cols} has fewer than 4 cells")]
    BoardTooSmall { rows: u16, cols: u16 },

    #[error("board {rows}x{cols} has more than {} cells", u16::MAX)]
    BoardTooLarge { rows: u16, cols: u16 },

    #[error("cannot place {count} ladders and {count} snakes on a board of {total_cells} cells")]
    LayoutUnsatisfiable { count: u16, total_cells: u16 },

    #[error("gave up placing {count} ladders and {count} snakes on {total_cells} cells after {attempts} attempts")]
    LayoutExhausted { count: u16, total_cells: u16, attempts: u32 },

    #[error("invalid jump layout:{}", list_issues(.0))]
    InvalidJumps(Vec<JumpIssue>),

    #[error("{winner} has already won, reset the game to keep playing")]
    GameOver { winner: Player },

    #[error("failed to read config file {}: {source}", .path.display())]
    ReadConfig { path: PathBuf, source: std::io::Error },

    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),
}

fn list_issues(issues: &[JumpIssue]) -> String {
    issues.iter().map(|issue| format!("\n- {issue}")).collect()
}
