use std::fmt::Display;

use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::info;

use crate::{game::Game, rules::{Player, Roll}};

pub const DEFAULT_MAX_TURNS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedGame {
    /// `None` when the turn limit ran out first.
    pub winner: Option<Player>,
    pub turns: u32,
    pub ladders_climbed: u32,
    pub snakes_hit: u32,
}

/// Plays one game from the start of `start`'s board and layout with random
/// rolls until someone wins or `max_turns` rolls are used.
pub fn simulate_game<R: Rng + ?Sized>(start: &Game, rng: &mut R, max_turns: u32) -> SimulatedGame {
    let mut game = start.clone();
    game.reset();
    let mut result = SimulatedGame { winner: None, turns: 0, ladders_climbed: 0, snakes_hit: 0 };

    while result.turns < max_turns {
        let Ok(turn) = game.apply_roll(Roll::roll_with(rng)) else {
            break;
        };
        result.turns += 1;
        if turn.outcome.final_cell > turn.outcome.landed {
            result.ladders_climbed += 1;
        } else if turn.outcome.final_cell < turn.outcome.landed {
            result.snakes_hit += 1;
        }
        if turn.won {
            result.winner = Some(turn.player);
            break;
        }
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationStats {
    pub games: u32,
    pub wins: [u32; 2],
    pub unfinished: u32,
    /// Summed over finished games only.
    pub total_turns: u64,
    pub min_turns: Option<u32>,
    pub max_turns: Option<u32>,
    pub ladders_climbed: u64,
    pub snakes_hit: u64,
}

impl SimulationStats {
    fn record(mut self, game: SimulatedGame) -> Self {
        self.games += 1;
        self.ladders_climbed += game.ladders_climbed as u64;
        self.snakes_hit += game.snakes_hit as u64;
        match game.winner {
            Some(player) => {
                self.wins[player.index()] += 1;
                self.total_turns += game.turns as u64;
                self.min_turns = Some(self.min_turns.map_or(game.turns, |t| t.min(game.turns)));
                self.max_turns = Some(self.max_turns.map_or(game.turns, |t| t.max(game.turns)));
            }
            None => self.unfinished += 1,
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        let pick = |a: Option<u32>, b: Option<u32>, f: fn(u32, u32) -> u32| match (a, b) {
            (Some(a), Some(b)) => Some(f(a, b)),
            (a, b) => a.or(b),
        };
        SimulationStats {
            games: self.games + other.games,
            wins: [self.wins[0] + other.wins[0], self.wins[1] + other.wins[1]],
            unfinished: self.unfinished + other.unfinished,
            total_turns: self.total_turns + other.total_turns,
            min_turns: pick(self.min_turns, other.min_turns, u32::min),
            max_turns: pick(self.max_turns, other.max_turns, u32::max),
            ladders_climbed: self.ladders_climbed + other.ladders_climbed,
            snakes_hit: self.snakes_hit + other.snakes_hit,
        }
    }

    pub fn finished(&self) -> u32 {
        self.wins[0] + self.wins[1]
    }

    pub fn mean_turns(&self) -> Option<f64> {
        match self.finished() {
            0 => None,
            n => Some(self.total_turns as f64 / n as f64),
        }
    }

    pub fn win_rate(&self, player: Player) -> f64 {
        match self.games {
            0 => 0.0,
            n => self.wins[player.index()] as f64 / n as f64 * 100.0,
        }
    }
}

/// Plays `games` games on `start`'s layout across the rayon pool. Game `i`
/// rolls from its own RNG seeded with `seed + i`, so the totals do not depend
/// on scheduling.
pub fn run_simulations(start: &Game, games: u32, seed: u64) -> SimulationStats {
    let stats = (0..games)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            simulate_game(start, &mut rng, DEFAULT_MAX_TURNS)
        })
        .fold(SimulationStats::default, SimulationStats::record)
        .reduce(SimulationStats::default, SimulationStats::merge);

    info!(games = stats.games, finished = stats.finished(), "simulation done");
    stats
}

impl Display for SimulationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Games: {}, Finished: {}, Unfinished: {}", self.games, self.finished(), self.unfinished)?;
        for player in Player::ALL {
            writeln!(f, "{} Wins: {}, Winrate: {:.2}%", player, self.wins[player.index()], self.win_rate(player))?;
        }
        match (self.mean_turns(), self.min_turns, self.max_turns) {
            (Some(mean), Some(min), Some(max)) => writeln!(f, "Turns: mean {mean:.2}, min {min}, max {max}")?,
            _ => writeln!(f, "Turns: no finished games")?,
        }
        write!(f, "Ladders climbed: {}, Snakes hit: {}", self.ladders_climbed, self.snakes_hit)
    }
}
