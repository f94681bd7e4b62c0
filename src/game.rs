use rand::Rng;
use tracing::{debug, info};

use crate::{
    config::GameConfig,
    error::{Error, Result},
    rules::{
        BoardGeometry, Facing, GameLayout, MoveOutcome, Player, Roll, check_jumps, facing_after_move, resolve_move,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Win(Player),
}

/// What a single roll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub player: Player,
    pub roll: Roll,
    pub from: u16,
    pub outcome: MoveOutcome,
    pub facing: Facing,
    pub won: bool,
}

/// Two players racing over one layout. The rules functions stay pure; all
/// mutation happens here.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    geometry: BoardGeometry,
    layout: GameLayout,
    positions: [u16; 2],
    facings: [Facing; 2],
    current_player: Player,
    last_roll: Option<Roll>,
    winner: Option<Player>,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let geometry = config.geometry()?;
        let layout = config.build_layout(rng)?;
        Ok(Game::start(config, geometry, layout))
    }

    /// Starts a game on a layout the caller already holds. The board size is
    /// checked and the layout is validated against it with the configured mode.
    pub fn with_layout(config: GameConfig, layout: GameLayout) -> Result<Self> {
        let geometry = config.geometry()?;
        check_jumps(layout.ladders(), layout.snakes(), geometry.total_cells(), config.validation_mode())?;
        Ok(Game::start(config, geometry, layout))
    }

    fn start(config: GameConfig, geometry: BoardGeometry, layout: GameLayout) -> Self {
        Game {
            config,
            geometry,
            layout,
            positions: [1; 2],
            facings: [Facing::default(); 2],
            current_player: Player::One,
            last_roll: None,
            winner: None,
        }
    }

    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &GameLayout {
        &self.layout
    }

    pub fn position(&self, player: Player) -> u16 {
        self.positions[player.index()]
    }

    pub fn facing(&self, player: Player) -> Facing {
        self.facings[player.index()]
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn last_roll(&self) -> Option<Roll> {
        self.last_roll
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.winner {
            Some(player) => GameOutcome::Win(player),
            None => GameOutcome::Ongoing,
        }
    }

    /// Moves the player whose turn it is. The turn passes unless the move wins,
    /// in which case the game is frozen until [`Game::reset`] or [`Game::new_layout`].
    ///
    /// A jump that leaves the board (only possible with a warn-mode layout)
    /// stops on the nearest cell instead.
    pub fn apply_roll(&mut self, roll: Roll) -> Result<Turn> {
        if let Some(winner) = self.winner {
            return Err(Error::GameOver { winner });
        }

        let player = self.current_player;
        let from = self.position(player);
        let geometry = self.geometry;
        let total_cells = geometry.total_cells();
        let (ladders, snakes) = (self.layout.ladders(), self.layout.snakes());

        let outcome = resolve_move(from, roll, total_cells, self.config.exact_finish, ladders, snakes);
        let facing = facing_after_move(from, outcome.landed, outcome.final_cell, &geometry, ladders, snakes);
        let outcome = MoveOutcome { final_cell: geometry.clamp(outcome.final_cell), ..outcome };
        debug!(%player, roll = roll.value(), from, landed = outcome.landed, final_cell = outcome.final_cell, "turn");

        self.positions[player.index()] = outcome.final_cell;
        self.facings[player.index()] = facing;
        self.last_roll = Some(roll);

        let won = outcome.final_cell == total_cells;
        if won {
            info!(%player, "reached the finish");
            self.winner = Some(player);
        } else {
            self.current_player = player.opposite();
        }

        Ok(Turn { player, roll, from, outcome, facing, won })
    }

    /// Back to the start on the same layout.
    pub fn reset(&mut self) {
        self.positions = [1; 2];
        self.facings = [Facing::default(); 2];
        self.current_player = Player::One;
        self.last_roll = None;
        self.winner = None;
    }

    /// Replaces the layout with a fresh random one and resets. On error the
    /// current layout and positions are left untouched.
    pub fn new_layout<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let layout = GameLayout::generate_bounded(
            self.config.jump_count,
            self.geometry.total_cells(),
            self.config.max_attempts,
            rng,
        )?;
        info!(ladders = layout.ladders().len(), snakes = layout.snakes().len(), "new layout");
        self.layout = layout;
        self.reset();
        Ok(())
    }

    pub fn to_fancy_string(&self) -> String {
        let geometry = self.geometry;
        let total_cells = geometry.total_cells();
        let (p1, p2) = (geometry.clamp(self.positions[0]), geometry.clamp(self.positions[1]));
        let mut out = String::new();

        let separator = "+-------".repeat(geometry.cols() as usize) + "+\n";
        out.push_str(&separator);
        for row in 0..geometry.rows() {
            let mut line = String::new();
            for col in 0..geometry.cols() {
                let cell = geometry.cell_at(row, col);
                let tag = match (cell == p1, cell == p2) {
                    (true, true) => "1&2",
                    (true, false) => "P1",
                    (false, true) => "P2",
                    _ if self.layout.ladders().contains(cell) => "L",
                    _ if self.layout.snakes().contains(cell) => "S",
                    _ if cell == total_cells => "END",
                    _ => "",
                };
                line.push_str(&format!("|{cell:>3} {tag:<3}"));
            }
            out.push_str(&line);
            out.push_str("|\n");
            out.push_str(&separator);
        }

        let list = |pairs: Vec<(u16, u16)>| {
            pairs.iter().map(|(from, to)| format!("{from}->{to}")).collect::<Vec<_>>().join(", ")
        };
        out.push_str(&format!("Ladders: {}\n", list(self.layout.ladders().sorted())));
        out.push_str(&format!("Snakes:  {}", list(self.layout.snakes().sorted())));
        out
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::rules::{JumpMap, ValidationMode};

    fn roll(pips: u8) -> Roll {
        Roll::new(pips).unwrap()
    }

    fn small_game() -> Game {
        let config = GameConfig { rows: 5, cols: 6, ..GameConfig::default() };
        let layout = GameLayout::from_maps(
            JumpMap::from_pairs([(8, 20)]),
            JumpMap::from_pairs([(29, 10)]),
            30,
            Default::default(),
        ).unwrap();
        Game::with_layout(config, layout).unwrap()
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = small_game();
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.last_roll(), None);

        let turn = game.apply_roll(roll(3)).unwrap();
        assert_eq!(turn.player, Player::One);
        assert_eq!(turn.outcome, MoveOutcome { landed: 4, final_cell: 4 });
        assert_eq!(game.position(Player::One), 4);
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.last_roll(), Some(roll(3)));

        game.apply_roll(roll(6)).unwrap();
        assert_eq!(game.position(Player::Two), 7);
        assert_eq!(game.current_player(), Player::One);
    }

    #[test]
    fn test_ladder_and_snake_update_facing() {
        let mut game = small_game();
        // Player one: 1 -> 8 -> 20.
        let turn = game.apply_roll(roll(6)).unwrap();
        assert_eq!(turn.outcome.landed, 7);
        game.apply_roll(roll(1)).unwrap();
        let turn = game.apply_roll(roll(1)).unwrap();
        assert_eq!(turn.outcome, MoveOutcome { landed: 8, final_cell: 20 });
        assert_eq!(game.facing(Player::One), Facing::Right);
        assert_eq!(game.facing(Player::Two), Facing::Right);

        let mut game = small_game();
        for pips in [5, 1, 5, 1, 5, 1, 5, 1, 5, 1] {
            game.apply_roll(roll(pips)).unwrap();
        }
        // Player one moved 1 -> 6 -> 11 -> 16 -> 21 -> 26.
        assert_eq!(game.position(Player::One), 26);
        let turn = game.apply_roll(roll(3)).unwrap();
        assert_eq!(turn.outcome, MoveOutcome { landed: 29, final_cell: 10 });
        assert_eq!(game.facing(Player::One), Facing::Left);
    }

    #[test]
    fn test_win_freezes_game() {
        let mut game = small_game();
        for pips in [5, 1, 5, 1, 5, 1, 5, 1, 5, 1] {
            game.apply_roll(roll(pips)).unwrap();
        }
        // Overshoot from 26 is void under exact finish.
        let turn = game.apply_roll(roll(6)).unwrap();
        assert_eq!(turn.outcome, MoveOutcome { landed: 26, final_cell: 26 });
        assert!(!turn.won);
        game.apply_roll(roll(1)).unwrap();

        let turn = game.apply_roll(roll(4)).unwrap();
        assert!(turn.won);
        assert_eq!(game.outcome(), GameOutcome::Win(Player::One));
        assert_eq!(game.current_player(), Player::One);
        assert!(matches!(game.apply_roll(roll(1)), Err(Error::GameOver { winner: Player::One })));

        game.reset();
        assert_eq!(game.outcome(), GameOutcome::Ongoing);
        assert_eq!(game.position(Player::One), 1);
        assert_eq!(game.position(Player::Two), 1);
        assert_eq!(game.facing(Player::One), Facing::Right);
        assert_eq!(game.last_roll(), None);
        assert!(game.apply_roll(roll(1)).is_ok());
    }

    #[test]
    fn test_new_layout_replaces_and_resets() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = small_game();
        let before = game.layout().clone();
        game.apply_roll(roll(4)).unwrap();

        game.new_layout(&mut rng).unwrap();
        assert_ne!(game.layout(), &before);
        assert_eq!(game.layout().ladders().len(), 3);
        assert_eq!(game.layout().snakes().len(), 3);
        assert_eq!(game.position(Player::One), 1);
        assert_eq!(game.current_player(), Player::One);
    }

    #[test]
    fn test_new_generates_layout() {
        let game = Game::new(GameConfig::default(), &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(game.geometry().total_cells(), 42);
        assert_eq!(game.layout().ladders().len(), 3);
        assert_eq!(game.outcome(), GameOutcome::Ongoing);
    }

    #[test]
    fn test_off_board_snake_stops_on_first_cell() {
        let config = GameConfig::from_toml_str("rows = 5\ncols = 6\n[layout]\nsnakes = [[4, 0]]\n").unwrap();
        let mut game = Game::new(config, &mut StdRng::seed_from_u64(0)).unwrap();

        let turn = game.apply_roll(roll(3)).unwrap();
        assert_eq!(turn.outcome, MoveOutcome { landed: 4, final_cell: 1 });
        assert_eq!(turn.facing, Facing::Left);
        assert_eq!(game.position(Player::One), 1);

        game.apply_roll(roll(1)).unwrap();
        let turn = game.apply_roll(roll(1)).unwrap();
        assert_eq!(turn.outcome, MoveOutcome { landed: 2, final_cell: 2 });
        assert_eq!(game.position(Player::One), 2);
        assert_eq!(game.position(Player::Two), 2);
        assert!(game.to_fancy_string().ends_with("Snakes:  4->0"));
    }

    #[test]
    fn test_warn_mode_layout_plays_through() {
        // Ladder 3 leaves the board, ladder 12 points down, snake 20 points up.
        let config = GameConfig::from_toml_str(
            "rows = 5\ncols = 6\n[layout]\nladders = [[3, 40], [12, 6]]\nsnakes = [[20, 25]]\n",
        ).unwrap();
        let mut game = Game::new(config, &mut StdRng::seed_from_u64(0)).unwrap();

        for pips in [4, 4, 6, 6] {
            game.apply_roll(roll(pips)).unwrap();
        }
        assert_eq!(game.position(Player::One), 11);
        let turn = game.apply_roll(roll(1)).unwrap();
        assert_eq!(turn.outcome, MoveOutcome { landed: 12, final_cell: 6 });
        assert_eq!(turn.facing, Facing::Right);

        // Player two: 11 -> 15, then player one 6 -> 10, then 15 -> 20 -> 25.
        game.apply_roll(roll(4)).unwrap();
        game.apply_roll(roll(4)).unwrap();
        let turn = game.apply_roll(roll(5)).unwrap();
        assert_eq!(turn.outcome, MoveOutcome { landed: 20, final_cell: 25 });
        assert_eq!(turn.facing, Facing::Left);

        game.reset();
        let turn = game.apply_roll(roll(2)).unwrap();
        assert_eq!(turn.outcome, MoveOutcome { landed: 3, final_cell: 30 });
        assert!(turn.won);
        assert_eq!(game.outcome(), GameOutcome::Win(Player::One));
    }

    #[test]
    fn test_with_layout_checks_board_and_layout() {
        let config = GameConfig { rows: 0, ..GameConfig::default() };
        assert!(matches!(
            Game::with_layout(config.clone(), GameLayout::default()),
            Err(Error::BoardTooSmall { rows: 0, cols: 6 })
        ));
        assert!(matches!(
            Game::new(config, &mut StdRng::seed_from_u64(0)),
            Err(Error::BoardTooSmall { .. })
        ));

        // Fits a 42-cell board but not a 30-cell one.
        let layout = GameLayout::from_maps(
            JumpMap::from_pairs([(30, 40)]),
            JumpMap::new(),
            42,
            ValidationMode::Strict,
        ).unwrap();
        let strict = GameConfig { rows: 5, cols: 6, strict_validation: true, ..GameConfig::default() };
        assert!(matches!(Game::with_layout(strict, layout.clone()), Err(Error::InvalidJumps(_))));
        let warn = GameConfig { rows: 5, cols: 6, ..GameConfig::default() };
        assert!(Game::with_layout(warn, layout).is_ok());
    }

    #[test]
    fn test_fancy_string() {
        let game = small_game();
        let board = game.to_fancy_string();
        assert!(board.contains("|  1 1&2"));
        assert!(board.contains("|  8 L  "));
        assert!(board.contains("| 29 S  "));
        assert!(board.contains("| 30 END"));
        assert!(board.ends_with("Ladders: 8->20\nSnakes:  29->10"));
    }
}
