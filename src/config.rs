use std::path::Path;

use rand::Rng;
use serde::Deserialize;

use crate::{error::{Error, Result}, rules::{BoardGeometry, DEFAULT_MAX_ATTEMPTS, GameLayout, JumpMap, ValidationMode}};

/// Game settings, read from TOML. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: u16,
    pub cols: u16,
    /// Overshooting the finish forfeits the move.
    pub exact_finish: bool,
    /// Number of ladders, and separately of snakes, in a generated layout.
    pub jump_count: u16,
    /// Cell 1 on the bottom row instead of the top row.
    pub start_from_bottom: bool,
    /// Refuse a configured layout with problems instead of logging them.
    pub strict_validation: bool,
    pub max_attempts: u32,
    /// Fixed layout used instead of a random one.
    pub layout: Option<LayoutConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub ladders: Vec<(u16, u16)>,
    pub snakes: Vec<(u16, u16)>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 7,
            cols: 6,
            exact_finish: true,
            jump_count: 3,
            start_from_bottom: true,
            strict_validation: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            layout: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| Error::ReadConfig { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry().map(|_| ())
    }

    pub fn geometry(&self) -> Result<BoardGeometry> {
        BoardGeometry::new(self.rows, self.cols, self.start_from_bottom)
    }

    pub fn validation_mode(&self) -> ValidationMode {
        if self.strict_validation {
            ValidationMode::Strict
        } else {
            ValidationMode::Warn
        }
    }

    /// The configured fixed layout when there is one, a fresh random one otherwise.
    pub fn build_layout<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GameLayout> {
        let total_cells = self.geometry()?.total_cells();
        match &self.layout {
            Some(fixed) => GameLayout::from_maps(
                JumpMap::from_pairs(fixed.ladders.iter().copied()),
                JumpMap::from_pairs(fixed.snakes.iter().copied()),
                total_cells,
                self.validation_mode(),
            ),
            None => GameLayout::generate_bounded(self.jump_count, total_cells, self.max_attempts, rng),
        }
    }
}
